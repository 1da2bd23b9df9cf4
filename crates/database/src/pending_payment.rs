//! Pending payment storage.
//!
//! At most one pending payment exists per user; `start_session` replaces
//! any earlier request (last request wins), and only a successful confirm
//! deletes the row.

use sqlx::SqlitePool;

use crate::models::PendingPayment;
use crate::Result;

/// Create or replace the pending payment for a user.
pub async fn upsert(pool: &SqlitePool, user_id: i64, requested_tier: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO pending_payments (user_id, requested_tier)
        VALUES (?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            requested_tier = excluded.requested_tier,
            created_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(requested_tier)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the pending payment for a user, if any.
pub async fn get(pool: &SqlitePool, user_id: i64) -> Result<Option<PendingPayment>> {
    let record = sqlx::query_as::<_, PendingPayment>(
        r#"
        SELECT user_id, requested_tier, created_at
        FROM pending_payments
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Delete the pending payment for a user. No-op if none exists.
pub async fn delete(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM pending_payments
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}
