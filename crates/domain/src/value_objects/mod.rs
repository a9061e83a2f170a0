//! Value objects - Immutable objects defined by their attributes

mod rating;
mod review_content;
mod review_draft;

pub use rating::{Rating, DEFAULT_RATING};
pub use review_content::{ReviewContent, MAX_REVIEW_LENGTH};
pub use review_draft::ReviewDraft;
