//! Review body text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum number of characters in a review body
pub const MAX_REVIEW_LENGTH: usize = 5000;

/// Validated review text (non-empty, <=5000 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReviewContent(String);

impl ReviewContent {
    /// Create validated review content.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The content is empty after trimming
    /// - The content exceeds 5000 characters after trimming
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Review content cannot be empty"));
        }
        if trimmed.chars().count() > MAX_REVIEW_LENGTH {
            return Err(DomainError::validation(format!(
                "Review content cannot exceed {} characters",
                MAX_REVIEW_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ReviewContent {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ReviewContent> for String {
    fn from(content: ReviewContent) -> String {
        content.0
    }
}
