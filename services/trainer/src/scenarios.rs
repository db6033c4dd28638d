//! Training scenario catalog

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::Scenario;

const CREATE_SCENARIOS: &str = r#"
CREATE TABLE IF NOT EXISTS scenarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    difficulty TEXT NOT NULL
)
"#;

const DEFAULT_SCENARIOS: &[(&str, &str, &str)] = &[
    ("Phishing Email", "Simulated bank phishing email", "Easy"),
    ("CEO Fraud", "Fake CEO wire transfer request", "Medium"),
    ("Tech Support", "Fake Microsoft support scam", "Hard"),
    ("Vishing", "Fake tech support call", "Medium"),
];

/// Scenario catalog repository
#[derive(Clone)]
pub struct ScenarioRepository {
    pool: SqlitePool,
}

impl ScenarioRepository {
    /// Create a new scenario repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `scenarios` table and seed the default catalog.
    ///
    /// Seeding is guarded by a count check so restarts do not accumulate
    /// duplicate rows.
    pub async fn init_schema(pool: &SqlitePool) -> DatabaseResult<()> {
        sqlx::query(CREATE_SCENARIOS)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::Schema(e.to_string()))?;

        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scenarios")
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::Query)?;

        if row.0 == 0 {
            for (name, description, difficulty) in DEFAULT_SCENARIOS {
                sqlx::query(
                    r#"
                    INSERT INTO scenarios (name, description, difficulty)
                    VALUES (?1, ?2, ?3)
                    "#,
                )
                .bind(name)
                .bind(description)
                .bind(difficulty)
                .execute(pool)
                .await
                .map_err(DatabaseError::Query)?;
            }
            info!(count = DEFAULT_SCENARIOS.len(), "seeded scenario catalog");
        }

        Ok(())
    }

    /// List the full scenario catalog
    pub async fn list(&self) -> DatabaseResult<Vec<Scenario>> {
        let scenarios = sqlx::query_as::<_, Scenario>(
            r#"
            SELECT id, name, description, difficulty
            FROM scenarios
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(scenarios)
    }
}
