//! User record operations.
//!
//! These are the only mutation paths for per-user entitlement state. Each
//! function is a single statement (or statement pair) so the engine's
//! per-user lock is the only serialization needed above it.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::UserRecord;

/// Create an empty user row if none exists. Idempotent.
pub async fn create_if_absent(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (user_id)
        VALUES (?)
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a user record by id.
pub async fn get(pool: &SqlitePool, user_id: i64) -> Result<UserRecord> {
    try_get(pool, user_id).await?.ok_or(DatabaseError::NotFound {
        entity: "User",
        id: user_id,
    })
}

/// Get a user record by id, or `None` if the user has never onboarded.
pub async fn try_get(pool: &SqlitePool, user_id: i64) -> Result<Option<UserRecord>> {
    let record = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT user_id, tier, free_preview_used, profile, chat_history,
               message_count, persona_name, display_name, preferences
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Assign a tier, resetting the session message count.
///
/// Upserts so a confirmed payment lands even if the user row was never
/// created (the other columns take their schema defaults).
pub async fn assign_tier(pool: &SqlitePool, user_id: i64, tier: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (user_id, tier, message_count)
        VALUES (?, ?, 0)
        ON CONFLICT(user_id) DO UPDATE SET
            tier = excluded.tier,
            message_count = 0
        "#,
    )
    .bind(user_id)
    .bind(tier)
    .execute(pool)
    .await?;

    Ok(())
}

/// Consume the one-time free preview: tier becomes "mild", the message
/// count resets, and the monotonic preview flag is set.
pub async fn consume_free_preview(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET tier = 'mild', message_count = 0, free_preview_used = 1
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id,
        });
    }

    Ok(())
}

/// Expire the current session: tier back to "none", count reset.
pub async fn expire_session(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET tier = 'none', message_count = 0
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id,
        });
    }

    Ok(())
}

/// Replace the stored chat history JSON.
pub async fn update_history(pool: &SqlitePool, user_id: i64, history_json: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET chat_history = ?
        WHERE user_id = ?
        "#,
    )
    .bind(history_json)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id,
        });
    }

    Ok(())
}

/// Increment the session message count and return the new value.
pub async fn increment_message_count(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET message_count = message_count + 1
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id,
        });
    }

    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT message_count FROM users WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Set the display name only if none is stored yet; never overwrites.
pub async fn set_display_name_if_missing(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET display_name = ?
        WHERE user_id = ? AND display_name IS NULL
        "#,
    )
    .bind(name)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Install a finalized profile: description, persona name, empty history.
pub async fn finalize_profile(
    pool: &SqlitePool,
    user_id: i64,
    profile: &str,
    persona_name: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET profile = ?, persona_name = ?, chat_history = '[]'
        WHERE user_id = ?
        "#,
    )
    .bind(profile)
    .bind(persona_name)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id,
        });
    }

    Ok(())
}

/// Clear profile, persona name, display name, and history while keeping
/// the identity row, tier, and the free-preview flag.
pub async fn reset_profile(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET profile = NULL, persona_name = NULL, display_name = NULL, chat_history = '[]'
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_free_preview_flag_is_set_once() {
        let db = test_db().await;
        create_if_absent(db.pool(), 1).await.unwrap();

        consume_free_preview(db.pool(), 1).await.unwrap();
        let record = get(db.pool(), 1).await.unwrap();
        assert_eq!(record.tier, "mild");
        assert!(record.free_preview_used);
        assert_eq!(record.message_count, 0);

        // Expiry resets the tier but never the flag.
        expire_session(db.pool(), 1).await.unwrap();
        let record = get(db.pool(), 1).await.unwrap();
        assert_eq!(record.tier, "none");
        assert!(record.free_preview_used);
    }

    #[tokio::test]
    async fn test_assign_tier_resets_count() {
        let db = test_db().await;
        create_if_absent(db.pool(), 1).await.unwrap();

        increment_message_count(db.pool(), 1).await.unwrap();
        increment_message_count(db.pool(), 1).await.unwrap();

        assign_tier(db.pool(), 1, "moderate").await.unwrap();
        let record = get(db.pool(), 1).await.unwrap();
        assert_eq!(record.tier, "moderate");
        assert_eq!(record.message_count, 0);
    }

    #[tokio::test]
    async fn test_assign_tier_upserts_missing_row() {
        let db = test_db().await;

        assign_tier(db.pool(), 5, "explicit").await.unwrap();
        let record = get(db.pool(), 5).await.unwrap();
        assert_eq!(record.tier, "explicit");
        assert!(!record.free_preview_used);
    }

    #[tokio::test]
    async fn test_increment_returns_running_count() {
        let db = test_db().await;
        create_if_absent(db.pool(), 1).await.unwrap();

        assert_eq!(increment_message_count(db.pool(), 1).await.unwrap(), 1);
        assert_eq!(increment_message_count(db.pool(), 1).await.unwrap(), 2);
        assert_eq!(increment_message_count(db.pool(), 1).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_display_name_set_once() {
        let db = test_db().await;
        create_if_absent(db.pool(), 1).await.unwrap();

        set_display_name_if_missing(db.pool(), 1, "Alex").await.unwrap();
        set_display_name_if_missing(db.pool(), 1, "Blake").await.unwrap();

        let record = get(db.pool(), 1).await.unwrap();
        assert_eq!(record.display_name.as_deref(), Some("Alex"));
    }

    #[tokio::test]
    async fn test_reset_preserves_identity_and_preview_flag() {
        let db = test_db().await;
        create_if_absent(db.pool(), 1).await.unwrap();
        finalize_profile(db.pool(), 1, "profile text", "Luna").await.unwrap();
        set_display_name_if_missing(db.pool(), 1, "Alex").await.unwrap();
        consume_free_preview(db.pool(), 1).await.unwrap();

        reset_profile(db.pool(), 1).await.unwrap();

        let record = get(db.pool(), 1).await.unwrap();
        assert!(record.profile.is_none());
        assert!(record.persona_name.is_none());
        assert!(record.display_name.is_none());
        assert_eq!(record.chat_history, "[]");
        assert!(record.free_preview_used);
    }
}
