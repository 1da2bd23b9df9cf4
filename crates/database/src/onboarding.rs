//! Onboarding session storage.
//!
//! The questionnaire is a linear flow whose position must survive between
//! messages, so the stage and collected answers live in their own row
//! rather than in call-stack state.

use sqlx::SqlitePool;

use crate::models::OnboardingState;
use crate::Result;

/// Which answer column a stage writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerField {
    IdealType,
    Hair,
    BodyType,
    Personality,
    AgeRange,
}

/// Start (or restart) an onboarding session at the given first stage.
/// Any previously collected answers are discarded.
pub async fn begin(pool: &SqlitePool, user_id: i64, first_stage: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO onboarding_sessions (user_id, stage)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(first_stage)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the onboarding state for a user, if a session is active.
pub async fn get(pool: &SqlitePool, user_id: i64) -> Result<Option<OnboardingState>> {
    let record = sqlx::query_as::<_, OnboardingState>(
        r#"
        SELECT user_id, stage, ideal_type, hair, body_type, personality, age_range
        FROM onboarding_sessions
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Store one answer and advance to the next stage.
pub async fn record_answer(
    pool: &SqlitePool,
    user_id: i64,
    field: AnswerField,
    answer: &str,
    next_stage: &str,
) -> Result<()> {
    let sql = match field {
        AnswerField::IdealType => {
            "UPDATE onboarding_sessions SET ideal_type = ?, stage = ? WHERE user_id = ?"
        }
        AnswerField::Hair => {
            "UPDATE onboarding_sessions SET hair = ?, stage = ? WHERE user_id = ?"
        }
        AnswerField::BodyType => {
            "UPDATE onboarding_sessions SET body_type = ?, stage = ? WHERE user_id = ?"
        }
        AnswerField::Personality => {
            "UPDATE onboarding_sessions SET personality = ?, stage = ? WHERE user_id = ?"
        }
        AnswerField::AgeRange => {
            "UPDATE onboarding_sessions SET age_range = ?, stage = ? WHERE user_id = ?"
        }
    };

    sqlx::query(sql)
        .bind(answer)
        .bind(next_stage)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete the onboarding session. Used by both finalize and cancel.
pub async fn delete(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM onboarding_sessions
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

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
    async fn test_answers_accumulate_across_stages() {
        let db = test_db().await;

        begin(db.pool(), 1, "type").await.unwrap();
        record_answer(db.pool(), 1, AnswerField::IdealType, "girl next door", "hair")
            .await
            .unwrap();
        record_answer(db.pool(), 1, AnswerField::Hair, "brunette", "body")
            .await
            .unwrap();

        let state = get(db.pool(), 1).await.unwrap().unwrap();
        assert_eq!(state.stage, "body");
        assert_eq!(state.ideal_type.as_deref(), Some("girl next door"));
        assert_eq!(state.hair.as_deref(), Some("brunette"));
        assert!(state.body_type.is_none());
    }

    #[tokio::test]
    async fn test_begin_discards_previous_answers() {
        let db = test_db().await;

        begin(db.pool(), 1, "type").await.unwrap();
        record_answer(db.pool(), 1, AnswerField::IdealType, "confident", "hair")
            .await
            .unwrap();

        begin(db.pool(), 1, "type").await.unwrap();
        let state = get(db.pool(), 1).await.unwrap().unwrap();
        assert_eq!(state.stage, "type");
        assert!(state.ideal_type.is_none());
    }

    #[tokio::test]
    async fn test_delete_ends_session() {
        let db = test_db().await;

        begin(db.pool(), 1, "type").await.unwrap();
        delete(db.pool(), 1).await.unwrap();
        assert!(get(db.pool(), 1).await.unwrap().is_none());
    }
}
