//! Kindness domain layer.
//!
//! Pure types for the reader engagement subsystem: profiles, reviews, likes
//! and the validated value objects that carry their invariants. No I/O lives
//! here; storage and orchestration belong to `kindness-engine`.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{Like, LikeToggle, Profile, Review, ReviewView, PROFILE_FALLBACK_LABEL};
pub use error::DomainError;
pub use ids::{ReviewId, UserId};
pub use value_objects::{
    Rating, ReviewContent, ReviewDraft, DEFAULT_RATING, MAX_REVIEW_LENGTH,
};
