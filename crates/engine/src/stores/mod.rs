//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in the database:
//! - `ReviewListStore` - Cached review list read model

pub mod review_list;

// Re-export store types
pub use review_list::{ReviewListKey, ReviewListStore};
