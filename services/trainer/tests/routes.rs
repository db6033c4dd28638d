//! Router integration tests
//!
//! The router is exercised with `tower::ServiceExt::oneshot`; ledger state
//! lives in an in-memory SQLite pool, so no external services are needed.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use axum_extra::extract::cookie::Key;
use tower::util::ServiceExt; // for `oneshot`

use common::database::{init_pool, DatabaseConfig};
use trainer::{
    ledger::SessionLedger, routes::create_router, scenarios::ScenarioRepository, state::AppState,
    templates::TemplateStore,
};

async fn test_app() -> Router {
    let pool = init_pool(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to create in-memory pool");
    SessionLedger::init_schema(&pool)
        .await
        .expect("Failed to create ledger schema");
    ScenarioRepository::init_schema(&pool)
        .await
        .expect("Failed to create scenario schema");

    let templates = TemplateStore::load(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
        .expect("Failed to load templates");

    let state = AppState {
        db_pool: pool.clone(),
        ledger: SessionLedger::new(pool.clone()),
        scenarios: ScenarioRepository::new(pool),
        templates,
        session_key: Key::generate(),
    };

    create_router(state)
}

/// First `name=value` pair of a Set-Cookie header, for echoing back
fn cookie_pair(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .expect("cookie header should be valid UTF-8")
        .split(';')
        .next()
        .expect("cookie header should have a name=value pair")
        .to_string()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn health_endpoint_works() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn scenario_pages_render_and_issue_session_cookie() {
    let app = test_app().await;

    for path in [
        "/",
        "/email-test",
        "/email-test/result",
        "/email-test/feedback",
        "/fake-login",
        "/ceo-fraud",
        "/ceo-fraud/result",
        "/tech-support",
        "/tech-support/result",
        "/fraud-payment",
        "/fraud-payment/result",
        "/social-media",
        "/social-media/result",
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        assert!(
            response.headers().contains_key(header::SET_COOKIE),
            "GET {path} should issue a session cookie on first visit"
        );
    }
}

#[tokio::test]
async fn fake_login_accepts_source_query_param() {
    let app = test_app().await;

    // The email scenario redirects here with ?source=email; the page is
    // static, but the decorated URL must still render.
    for uri in ["/fake-login?source=email", "/fake-login?source=direct"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }
}

#[tokio::test]
async fn action_posts_redirect_to_result_views() {
    let app = test_app().await;

    for (path, target) in [
        ("/email-test/click", "/fake-login?source=email"),
        ("/email-test/submit", "/email-test/result"),
        ("/ceo-fraud/transfer", "/ceo-fraud/result"),
        ("/tech-support/download", "/tech-support/result"),
        ("/fraud-payment/complete", "/fraud-payment/result"),
        ("/social-media/complete", "/social-media/result"),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(path)
                    .method("POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {path}");
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some(target),
            "POST {path}"
        );
    }
}

#[tokio::test]
async fn stats_without_session_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No active session");
}

#[tokio::test]
async fn clicking_through_a_scenario_shows_up_in_stats() {
    let app = test_app().await;

    // First visit issues the cookie
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cookie = cookie_pair(&response);

    // Fall for the phishing email, then submit credentials
    for path in ["/email-test/click", "/email-test/submit"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(path)
                    .method("POST")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {path}");
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email_clicked"], true);
    assert_eq!(body["login_submitted"], true);
    assert_eq!(body["flags_identified"], 0);
}

#[tokio::test]
async fn stats_for_session_without_record_are_all_false() {
    let app = test_app().await;

    // Visiting a page issues a cookie but records nothing
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cookie = cookie_pair(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email_clicked"], false);
    assert_eq!(body["login_submitted"], false);
    assert_eq!(body["flags_identified"], 0);
}

#[tokio::test]
async fn reset_clears_the_session_record() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cookie = cookie_pair(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/email-test/click")
                .method("POST")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reset")
                .method("POST")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], true);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email_clicked"], false);
}

#[tokio::test]
async fn scenario_catalog_is_seeded() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/scenarios")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let scenarios = body.as_array().expect("catalog should be an array");
    assert_eq!(scenarios.len(), 4);
    assert_eq!(scenarios[0]["name"], "Phishing Email");
    assert_eq!(scenarios[0]["difficulty"], "Easy");
}
