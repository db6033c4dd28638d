//! Session ledger: per-session record of triggered attack steps
//!
//! One row per opaque session id. Flags only ever move from unset to set;
//! `last_active` is refreshed on every write. Each operation is a
//! self-contained statement against the pool, so nothing is held across
//! requests.

use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::debug;

use crate::models::{ActionKind, SessionStats};

const CREATE_USER_ACTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS user_actions (
    session_id TEXT PRIMARY KEY,
    email_clicked INTEGER NOT NULL DEFAULT 0,
    login_submitted INTEGER NOT NULL DEFAULT 0,
    ceo_attempt INTEGER NOT NULL DEFAULT 0,
    tech_support_attempt INTEGER NOT NULL DEFAULT 0,
    vishing_attempt INTEGER NOT NULL DEFAULT 0,
    quishing_attempt INTEGER NOT NULL DEFAULT 0,
    flags_identified INTEGER NOT NULL DEFAULT 0,
    last_active TIMESTAMP NOT NULL
)
"#;

/// Session ledger repository
#[derive(Clone)]
pub struct SessionLedger {
    pool: SqlitePool,
}

impl SessionLedger {
    /// Create a new session ledger over a pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `user_actions` table if it does not exist
    pub async fn init_schema(pool: &SqlitePool) -> DatabaseResult<()> {
        sqlx::query(CREATE_USER_ACTIONS)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::Schema(e.to_string()))?;

        Ok(())
    }

    /// Record a recognized attack step for a session.
    ///
    /// Atomic upsert: creates the record if absent (all flags false,
    /// counter 0), sets the step's flag, and refreshes `last_active`.
    /// Re-recording an already-set step is a no-op beyond the timestamp
    /// refresh.
    pub async fn record(&self, session_id: &str, kind: ActionKind) -> DatabaseResult<()> {
        let column = kind.column();
        let sql = format!(
            r#"
            INSERT INTO user_actions (session_id, {column}, last_active)
            VALUES (?1, 1, ?2)
            ON CONFLICT(session_id)
            DO UPDATE SET {column} = 1, last_active = excluded.last_active
            "#
        );

        sqlx::query(&sql)
            .bind(session_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        debug!(session_id, kind = kind.as_str(), "recorded action");

        Ok(())
    }

    /// Ensure a record exists for a session without setting any flag
    pub async fn touch(&self, session_id: &str) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_actions (session_id, last_active)
            VALUES (?1, ?2)
            ON CONFLICT(session_id) DO NOTHING
            "#,
        )
        .bind(session_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(())
    }

    /// Record an action given its wire-string kind.
    ///
    /// A recognized kind sets its flag; an unrecognized kind still creates
    /// the record but is otherwise silently ignored.
    pub async fn record_action(&self, session_id: &str, kind: &str) -> DatabaseResult<()> {
        match ActionKind::parse(kind) {
            Some(action) => self.record(session_id, action).await,
            None => {
                debug!(session_id, kind, "ignoring unrecognized action kind");
                self.touch(session_id).await
            }
        }
    }

    /// Fetch the ledger state for a session.
    ///
    /// Returns `None` when no record exists, which is distinct from a
    /// record with all flags false.
    pub async fn get_stats(&self, session_id: &str) -> DatabaseResult<Option<SessionStats>> {
        let stats = sqlx::query_as::<_, SessionStats>(
            r#"
            SELECT email_clicked, login_submitted, ceo_attempt,
                   tech_support_attempt, vishing_attempt, quishing_attempt,
                   flags_identified, last_active
            FROM user_actions
            WHERE session_id = ?1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(stats)
    }

    /// Delete a session's record entirely. No error if absent.
    pub async fn reset(&self, session_id: &str) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_actions
            WHERE session_id = ?1
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
