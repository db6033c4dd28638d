//! Trainer service routes
//!
//! Every scenario follows the same linear flow: a page that sets up the
//! lure, a POST that records the step the user fell for and redirects, and
//! a debrief page walking through the red flags.

use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{ActionKind, StatsResponse},
    session::{current_session, ensure_session},
    state::AppState,
};

/// Create the router for the trainer service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(home))
        .route("/email-test", get(show_email_test))
        .route("/email-test/click", post(handle_email_click))
        .route("/email-test/submit", post(handle_email_submit))
        .route("/email-test/result", get(show_email_result))
        .route("/email-test/feedback", get(show_email_feedback))
        .route("/fake-login", get(show_fake_login))
        .route("/ceo-fraud", get(show_ceo_fraud))
        .route("/ceo-fraud/transfer", post(handle_ceo_transfer))
        .route("/ceo-fraud/result", get(show_ceo_fraud_result))
        .route("/tech-support", get(show_tech_support))
        .route("/tech-support/download", post(handle_tech_download))
        .route("/tech-support/result", get(show_tech_support_result))
        .route("/fraud-payment", get(show_fraud_payment))
        .route("/fraud-payment/complete", post(handle_fraud_payment))
        .route("/fraud-payment/result", get(show_fraud_payment_result))
        .route("/social-media", get(show_social_media))
        .route("/social-media/complete", post(handle_social_media))
        .route("/social-media/result", get(show_social_media_result))
        .route("/api/stats", get(get_user_stats))
        .route("/api/reset", post(reset_session))
        .route("/api/scenarios", get(list_scenarios))
        .with_state(state)
}

/// Render a scenario page, issuing a session cookie on first visit
fn render_page(
    state: &AppState,
    jar: SignedCookieJar,
    name: &str,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let (jar, _session_id) = ensure_session(jar);
    let body = state
        .templates
        .get(name)
        .ok_or_else(|| AppError::UnknownTemplate(name.to_string()))?;

    Ok((jar, Html(body.to_string())))
}

/// Record a step and redirect to the scenario's next page
async fn record_and_redirect(
    state: &AppState,
    jar: SignedCookieJar,
    kind: ActionKind,
    target: &str,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let (jar, session_id) = ensure_session(jar);

    state.ledger.record(&session_id, kind).await.map_err(|e| {
        tracing::error!("Failed to record action: {}", e);
        AppError::Database(e)
    })?;

    Ok((jar, Redirect::to(target)))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "trainer-service"
    }))
}

/// Home page listing the available scenarios
pub async fn home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "index")
}

/// Phishing email scenario page
pub async fn show_email_test(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "phishing_email")
}

/// The user clicked the phishing link; record it and send them to the
/// fake login page
pub async fn handle_email_click(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    record_and_redirect(&state, jar, ActionKind::EmailClick, "/fake-login?source=email").await
}

/// Fake bank login page.
///
/// The `source` query parameter in the redirect from the email scenario is
/// informational only; the page itself is a static document.
pub async fn show_fake_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "fake_login")
}

/// The user submitted credentials on the fake login page
pub async fn handle_email_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    record_and_redirect(&state, jar, ActionKind::FormSubmit, "/email-test/result").await
}

/// Red-flag debrief for the phishing email scenario
pub async fn show_email_result(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "phishing_result")
}

/// Detailed red-flag walkthrough for the phishing email scenario
pub async fn show_email_feedback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "email_feedback")
}

/// CEO wire-fraud scenario page
pub async fn show_ceo_fraud(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "ceo_fraud")
}

/// The user attempted the wire transfer
pub async fn handle_ceo_transfer(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    record_and_redirect(
        &state,
        jar,
        ActionKind::CeoTransferAttempt,
        "/ceo-fraud/result",
    )
    .await
}

/// Debrief for the CEO-fraud scenario
pub async fn show_ceo_fraud_result(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "ceo_fraud_result")
}

/// Tech-support scam scenario page
pub async fn show_tech_support(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "tech_support")
}

/// The user downloaded the fake support tool
pub async fn handle_tech_download(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    record_and_redirect(
        &state,
        jar,
        ActionKind::TechSupportAttempt,
        "/tech-support/result",
    )
    .await
}

/// Debrief for the tech-support scenario
pub async fn show_tech_support_result(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "tech_support_result")
}

/// Fraudulent payment scenario page
pub async fn show_fraud_payment(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "fraud_payment")
}

/// The user completed the fraudulent payment
pub async fn handle_fraud_payment(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    record_and_redirect(
        &state,
        jar,
        ActionKind::TechSupportAttempt,
        "/fraud-payment/result",
    )
    .await
}

/// Debrief for the fraudulent payment scenario
pub async fn show_fraud_payment_result(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "fraud_payment_result")
}

/// Social-media scam scenario page
pub async fn show_social_media(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "social_media")
}

/// The user took the bait in the social-media scenario
pub async fn handle_social_media(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    record_and_redirect(
        &state,
        jar,
        ActionKind::TechSupportAttempt,
        "/social-media/result",
    )
    .await
}

/// Debrief for the social-media scenario
pub async fn show_social_media_result(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    render_page(&state, jar, "social_media_result")
}

/// Ledger state for the current session.
///
/// Responds 401 when the request carries no session cookie; a session that
/// has no ledger record yet serializes as all-false/zero.
pub async fn get_user_stats(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let session_id = current_session(&jar).ok_or(AppError::NoSession)?;

    let stats = state.ledger.get_stats(&session_id).await.map_err(|e| {
        tracing::error!("Failed to get stats: {}", e);
        AppError::Database(e)
    })?;

    Ok(Json(StatsResponse::from(stats)))
}

/// Clear the current session's ledger record (test/demo cleanup)
pub async fn reset_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let session_id = current_session(&jar).ok_or(AppError::NoSession)?;

    let deleted = state.ledger.reset(&session_id).await.map_err(|e| {
        tracing::error!("Failed to reset session: {}", e);
        AppError::Database(e)
    })?;

    Ok(Json(json!({
        "message": "Session reset",
        "deleted": deleted
    })))
}

/// Scenario catalog
pub async fn list_scenarios(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let scenarios = state.scenarios.list().await.map_err(|e| {
        tracing::error!("Failed to list scenarios: {}", e);
        AppError::Database(e)
    })?;

    Ok(Json(scenarios))
}
