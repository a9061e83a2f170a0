//! Profile entity - public identity of a reader account
//!
//! Profiles are provisioned when an account is created and edited by the
//! settings flow; the engagement core only reads them to attribute reviews.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Label shown when a profile has neither a username nor a full name.
pub const PROFILE_FALLBACK_LABEL: &str = "Reader";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Same value as the account's user id
    pub id: UserId,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            full_name: None,
            avatar_url: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Username, then full name, ignoring blank values.
    fn name_source(&self) -> Option<&str> {
        [self.username.as_deref(), self.full_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
    }

    /// Name to attribute a review to.
    pub fn display_name(&self) -> &str {
        self.name_source().unwrap_or(PROFILE_FALLBACK_LABEL)
    }

    /// Avatar placeholder letter.
    pub fn initial(&self) -> char {
        self.name_source()
            .and_then(|name| name.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }
}
