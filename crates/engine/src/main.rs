//! Kindness engine - review store runner.
//!
//! Opens the review database, ensures its schema and logs the current
//! review list. Performs no writes.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kindness_engine::infrastructure::{
    clock::SystemClock,
    config::{load_dotenv_from_repo_root, EngineConfig},
    ports::{ClockPort, SessionPort},
    session::LocalSession,
    sqlite::SqliteReviewStore,
};
use kindness_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the runner may start from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kindness_engine=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Kindness engine");

    let config = EngineConfig::from_env()?;

    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    tracing::info!(path = %config.database_path, "Opening review database");
    let store = SqliteReviewStore::new(&config.database_path, clock)
        .await
        .with_context(|| format!("opening review database at {}", config.database_path))?;

    let session: Arc<dyn SessionPort> = Arc::new(LocalSession::anonymous());
    let app = App::new(Arc::new(store), session, config.review_cache_ttl);

    let reviews = app
        .use_cases
        .engagement
        .list_reviews
        .execute(app.current_caller())
        .await
        .context("listing reviews")?;

    tracing::info!(count = reviews.len(), "Reviews loaded");
    for view in reviews.iter().take(config.review_list_log_limit) {
        tracing::info!(
            review_id = %view.review.id,
            author = view.author_name(),
            rating = view.review.rating.value(),
            likes = view.like_count,
            created_at = %view.review.created_at,
            "{}",
            view.review.content.as_str()
        );
    }

    Ok(())
}
