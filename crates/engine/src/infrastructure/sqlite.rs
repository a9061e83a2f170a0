//! SQLite-backed review storage.
//!
//! Uniqueness of likes is enforced by the `(user_id, review_id)` primary key,
//! so concurrent writers are arbitrated by the database, never by callers.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use kindness_domain::{
    Like, Profile, Rating, Review, ReviewContent, ReviewId, ReviewView, UserId,
};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::helpers::{
    format_timestamp, parse_timestamp, recheck_review_fields, to_storage_precision,
};
use crate::infrastructure::ports::{ClockPort, LikeRepo, ProfileRepo, RepoError, ReviewRepo};

const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT,
        full_name TEXT,
        avatar_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id TEXT PRIMARY KEY NOT NULL,
        author_id TEXT NOT NULL,
        content TEXT NOT NULL
            CHECK (length(trim(content, ' ' || char(9) || char(10) || char(13))) > 0),
        rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reviews_created_at ON reviews (created_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS review_likes (
        user_id TEXT NOT NULL,
        review_id TEXT NOT NULL REFERENCES reviews (id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        PRIMARY KEY (user_id, review_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_review_likes_review ON review_likes (review_id)",
];

/// SQLite implementation of the review, like and profile ports.
pub struct SqliteReviewStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteReviewStore {
    /// Open (creating if needed) a database file and ensure the schema.
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::from_pool(pool, clock).await
    }

    /// Private in-memory database. The database lives only while a
    /// connection is open, so the pool pins exactly one connection and never
    /// reaps it.
    pub async fn in_memory(clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::from_pool(pool, clock).await
    }

    pub async fn from_pool(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let store = Self { pool, clock };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), RepoError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::database("ensure_schema", e))?;
        }
        Ok(())
    }
}

/// Classify a failed write. Constraint failures are the caller's business;
/// anything else means the backend is unavailable.
fn classify_write_error(
    operation: &'static str,
    err: sqlx::Error,
    conflict: impl FnOnce() -> RepoError,
    missing: impl FnOnce() -> RepoError,
) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        let message = db_err.message();
        if db_err.is_unique_violation() || message.contains("UNIQUE constraint") {
            return conflict();
        }
        if db_err.is_foreign_key_violation() || message.contains("FOREIGN KEY constraint") {
            return missing();
        }
        if db_err.is_check_violation() || message.contains("CHECK constraint") {
            return RepoError::validation(message);
        }
    }
    RepoError::database(operation, err)
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::serialization(format!("column {}: {}", name, e)))
}

fn parse_id<T>(raw: &str) -> Result<T, RepoError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(RepoError::serialization)
}

fn review_from_row(row: &SqliteRow) -> Result<Review, RepoError> {
    let id: String = column(row, "id")?;
    let author_id: String = column(row, "author_id")?;
    let content: String = column(row, "content")?;
    let rating: i64 = column(row, "rating")?;
    let created_at: String = column(row, "created_at")?;

    Ok(Review::from_parts(
        parse_id(&id)?,
        parse_id(&author_id)?,
        ReviewContent::new(content).map_err(RepoError::serialization)?,
        Rating::from_i64(rating).map_err(RepoError::serialization)?,
        parse_timestamp(&created_at)?,
    ))
}

fn profile_from_row(row: &SqliteRow, id_column: &str) -> Result<Option<Profile>, RepoError> {
    let id: Option<String> = column(row, id_column)?;
    let Some(id) = id else {
        return Ok(None);
    };

    Ok(Some(Profile {
        id: parse_id(&id)?,
        username: column(row, "username")?,
        full_name: column(row, "full_name")?,
        avatar_url: column(row, "avatar_url")?,
    }))
}

fn count_from_i64(count: i64) -> Result<u32, RepoError> {
    u32::try_from(count).map_err(|_| RepoError::serialization(format!("bad like count {}", count)))
}

#[async_trait]
impl ReviewRepo for SqliteReviewStore {
    async fn list_reviews(&self, viewer: Option<UserId>) -> Result<Vec<ReviewView>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.author_id, r.content, r.rating, r.created_at,
                   p.id AS profile_id, p.username, p.full_name, p.avatar_url,
                   (SELECT COUNT(*) FROM review_likes l WHERE l.review_id = r.id) AS like_count,
                   EXISTS (
                       SELECT 1 FROM review_likes l
                       WHERE l.review_id = r.id AND l.user_id = ?
                   ) AS liked_by_viewer
            FROM reviews r
            LEFT JOIN profiles p ON p.id = r.author_id
            ORDER BY r.created_at DESC, r.rowid DESC
            "#,
        )
        .bind(viewer.map(|id| id.to_string()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_reviews", e))?;

        rows.iter()
            .map(|row| {
                let like_count: i64 = column(row, "like_count")?;
                let liked_by_viewer: i64 = column(row, "liked_by_viewer")?;
                Ok(ReviewView {
                    review: review_from_row(row)?,
                    author: profile_from_row(row, "profile_id")?,
                    like_count: count_from_i64(like_count)?,
                    liked_by_viewer: liked_by_viewer != 0,
                })
            })
            .collect()
    }

    async fn insert_review(
        &self,
        author_id: UserId,
        content: &ReviewContent,
        rating: Rating,
    ) -> Result<Review, RepoError> {
        recheck_review_fields(content, rating)?;

        let now = to_storage_precision(self.clock.now());
        let review = Review::new(author_id, content.clone(), rating, now);

        sqlx::query(
            r#"
            INSERT INTO reviews (id, author_id, content, rating, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.id.to_string())
        .bind(review.author_id.to_string())
        .bind(review.content.as_str())
        .bind(i64::from(review.rating.value()))
        .bind(format_timestamp(review.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_write_error(
                "insert_review",
                e,
                || RepoError::conflict("Review", review.id),
                || RepoError::not_found("Review", review.id),
            )
        })?;

        Ok(review)
    }

    async fn get_review(&self, id: ReviewId) -> Result<Option<Review>, RepoError> {
        let row = sqlx::query(
            "SELECT id, author_id, content, rating, created_at FROM reviews WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_review", e))?;

        row.as_ref().map(review_from_row).transpose()
    }
}

#[async_trait]
impl LikeRepo for SqliteReviewStore {
    async fn find_like(
        &self,
        user_id: UserId,
        review_id: ReviewId,
    ) -> Result<Option<Like>, RepoError> {
        let row = sqlx::query(
            "SELECT created_at FROM review_likes WHERE user_id = ? AND review_id = ?",
        )
        .bind(user_id.to_string())
        .bind(review_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("find_like", e))?;

        match row {
            Some(row) => {
                let created_at: String = column(&row, "created_at")?;
                Ok(Some(Like::new(
                    user_id,
                    review_id,
                    parse_timestamp(&created_at)?,
                )))
            }
            None => Ok(None),
        }
    }

    async fn insert_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError> {
        let now = to_storage_precision(self.clock.now());

        sqlx::query("INSERT INTO review_likes (user_id, review_id, created_at) VALUES (?, ?, ?)")
            .bind(user_id.to_string())
            .bind(review_id.to_string())
            .bind(format_timestamp(now))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write_error(
                    "insert_like",
                    e,
                    || RepoError::conflict("Like", format!("{}:{}", user_id, review_id)),
                    || RepoError::not_found("Review", review_id),
                )
            })?;

        Ok(())
    }

    async fn delete_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM review_likes WHERE user_id = ? AND review_id = ?")
            .bind(user_id.to_string())
            .bind(review_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_like", e))?;
        Ok(())
    }

    async fn count_likes(&self, review_id: ReviewId) -> Result<u32, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM review_likes WHERE review_id = ?")
            .bind(review_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_likes", e))?;
        count_from_i64(count)
    }
}

#[async_trait]
impl ProfileRepo for SqliteReviewStore {
    async fn get(&self, id: UserId) -> Result<Option<Profile>, RepoError> {
        let row = sqlx::query(
            "SELECT id, username, full_name, avatar_url FROM profiles WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_profile", e))?;

        match row {
            Some(row) => profile_from_row(&row, "id"),
            None => Ok(None),
        }
    }

    async fn save(&self, profile: &Profile) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, username, full_name, avatar_url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                full_name = excluded.full_name,
                avatar_url = excluded.avatar_url
            "#,
        )
        .bind(profile.id.to_string())
        .bind(profile.username.as_deref())
        .bind(profile.full_name.as_deref())
        .bind(profile.avatar_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_profile", e))?;
        Ok(())
    }
}
