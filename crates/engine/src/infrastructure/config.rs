//! Engine configuration

use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

/// Engine configuration loaded from environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// SQLite database file for profiles, reviews and likes
    pub database_path: String,
    /// How long a cached review list may be served without refetching
    pub review_cache_ttl: Duration,
    /// Number of reviews the runner logs at startup
    pub review_list_log_limit: usize,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| "./data/reviews.db".to_string()),
            review_cache_ttl: Duration::from_secs(
                lookup("REVIEW_CACHE_TTL_SECONDS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("REVIEW_CACHE_TTL_SECONDS must be a whole number of seconds")?,
            ),
            review_list_log_limit: lookup("REVIEW_LIST_LOG_LIMIT")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("REVIEW_LIST_LOG_LIMIT must be a whole number")?,
        })
    }
}

/// Load `.env.local` then `.env` from the repo root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<EngineConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_keys_use_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_path, "./data/reviews.db");
        assert_eq!(config.review_cache_ttl, Duration::from_secs(30));
        assert_eq!(config.review_list_log_limit, 5);
    }

    #[test]
    fn set_keys_override_defaults() {
        let config = config_from(&[
            ("DATABASE_PATH", "/tmp/kind.db"),
            ("REVIEW_CACHE_TTL_SECONDS", "5"),
            ("REVIEW_LIST_LOG_LIMIT", "12"),
        ])
        .unwrap();
        assert_eq!(config.database_path, "/tmp/kind.db");
        assert_eq!(config.review_cache_ttl, Duration::from_secs(5));
        assert_eq!(config.review_list_log_limit, 12);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config_from(&[("REVIEW_LIST_LOG_LIMIT", "lots")]).unwrap_err();
        assert!(err.to_string().contains("REVIEW_LIST_LOG_LIMIT"));

        let err = config_from(&[("REVIEW_CACHE_TTL_SECONDS", "-1")]).unwrap_err();
        assert!(err.to_string().contains("REVIEW_CACHE_TTL_SECONDS"));
    }
}
