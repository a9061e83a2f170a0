//! Engagement operation errors.

use kindness_domain::{DomainError, ReviewId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during engagement operations.
#[derive(Debug, thiserror::Error)]
pub enum EngagementError {
    /// Mutation attempted without a signed-in caller. Never retried.
    #[error("Sign in required")]
    AuthRequired,
    /// Input rejected before (or by) the store; nothing was written.
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Review not found: {0}")]
    ReviewNotFound(ReviewId),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl EngagementError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    /// Transport or storage failure; the caller may re-issue the command.
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::Repo(err) if err.is_unavailable())
    }
}

impl From<RepoError> for EngagementError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(message) => Self::Validation(DomainError::Validation(message)),
            other => Self::Repo(other),
        }
    }
}
