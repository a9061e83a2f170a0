//! Domain entities - Core business objects with identity

mod like;
mod profile;
mod review;

pub use like::{Like, LikeToggle};
pub use profile::{Profile, PROFILE_FALLBACK_LABEL};
pub use review::{Review, ReviewView};
