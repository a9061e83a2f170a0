//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across ports and stores to fulfill user stories.

pub mod engagement;

// Re-export main types
pub use engagement::{EngagementError, EngagementUseCases};
