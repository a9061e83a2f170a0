//! Shared helpers for the review store adapters.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use kindness_domain::{Rating, ReviewContent};

use crate::infrastructure::ports::RepoError;

/// Re-check review fields at the storage boundary. Stores can be called
/// without going through the engagement use cases.
pub(crate) fn recheck_review_fields(
    content: &ReviewContent,
    rating: Rating,
) -> Result<(), RepoError> {
    ReviewContent::new(content.as_str()).map_err(RepoError::validation)?;
    Rating::new(rating.value()).map_err(RepoError::validation)?;
    Ok(())
}

/// Drop sub-microsecond precision so a value survives a storage round trip.
pub(crate) fn to_storage_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_nanosecond(at.nanosecond() / 1_000 * 1_000)
        .unwrap_or(at)
}

/// Fixed-width RFC 3339 so lexical order matches chronological order.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("Invalid timestamp '{}': {}", raw, e)))
}
