//! Star rating attached to a review.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Star count a fresh review form starts with.
pub const DEFAULT_RATING: u8 = 5;

/// A validated star rating (1..=5 inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a new validated rating.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the value is outside `1..=5`.
    pub fn new(stars: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&stars) {
            return Err(DomainError::validation(format!(
                "Rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                stars
            )));
        }
        Ok(Self(stars))
    }

    /// Build a rating from a wider integer, as stored by SQL backends.
    pub fn from_i64(stars: i64) -> Result<Self, DomainError> {
        let narrowed = u8::try_from(stars).map_err(|_| {
            DomainError::validation(format!(
                "Rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                stars
            ))
        })?;
        Self::new(narrowed)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Per-star fill flags for rendering (`true` = filled).
    pub fn stars(self) -> [bool; Self::MAX as usize] {
        let mut stars = [false; Self::MAX as usize];
        for star in stars.iter_mut().take(self.0 as usize) {
            *star = true;
        }
        stars
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(DEFAULT_RATING)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}
