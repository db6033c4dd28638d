//! Application state shared across handlers

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;

use crate::{ledger::SessionLedger, scenarios::ScenarioRepository, templates::TemplateStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub ledger: SessionLedger,
    pub scenarios: ScenarioRepository,
    pub templates: TemplateStore,
    pub session_key: Key,
}

// Lets SignedCookieJar extract its signing key from the shared state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}
