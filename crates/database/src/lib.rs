//! SQLite entitlement store for Amora.
//!
//! All engine mutations pass through this crate: per-user tier and budget
//! state, the rolling chat-history column, pending payment records, and
//! in-progress onboarding sessions. Operations are atomic at the
//! single-record granularity, which is all the engine assumes.
//!
//! # Example
//!
//! ```no_run
//! use database::{user, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:amora.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     user::create_if_absent(db.pool(), 42).await?;
//!     let record = user::get(db.pool(), 42).await?;
//!     assert_eq!(record.tier, "none");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod onboarding;
pub mod pending_payment;
pub mod user;

pub use error::{DatabaseError, Result};
pub use models::{OnboardingState, PendingPayment, UserRecord};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size; per-user writes are short, so a modest pool is
    /// enough even with many concurrent users.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// Use `sqlite:path/to/db.sqlite?mode=rwc` for a file database or
    /// `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations. Call once after connecting.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_new_user_defaults() {
        let db = test_db().await;

        user::create_if_absent(db.pool(), 7).await.unwrap();
        let record = user::get(db.pool(), 7).await.unwrap();

        assert_eq!(record.user_id, 7);
        assert_eq!(record.tier, "none");
        assert!(!record.free_preview_used);
        assert!(record.profile.is_none());
        assert_eq!(record.chat_history, "[]");
        assert_eq!(record.message_count, 0);
        assert!(record.persona_name.is_none());
        assert!(record.display_name.is_none());
    }

    #[tokio::test]
    async fn test_create_if_absent_is_idempotent() {
        let db = test_db().await;

        user::create_if_absent(db.pool(), 7).await.unwrap();
        user::finalize_profile(db.pool(), 7, "a profile", "Luna")
            .await
            .unwrap();

        // Re-running must not wipe the populated row.
        user::create_if_absent(db.pool(), 7).await.unwrap();
        let record = user::get(db.pool(), 7).await.unwrap();
        assert_eq!(record.profile.as_deref(), Some("a profile"));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let db = test_db().await;
        let result = user::get(db.pool(), 999).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
        assert!(user::try_get(db.pool(), 999).await.unwrap().is_none());
    }
}
