//! Session-cookie identity
//!
//! Each visiting browser gets an opaque UUIDv4 session id in a signed
//! cookie, created on first visit. The ledger treats the id as opaque and
//! never generates or validates it itself.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_id";

/// Read the current session id, if the request carries one
pub fn current_session(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Get the session id for this request, creating one on first visit.
///
/// Returns the (possibly updated) jar, which must be included in the
/// response for a new cookie to reach the client.
pub fn ensure_session(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(session_id) = current_session(&jar) {
        return (jar, session_id);
    }

    let session_id = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, session_id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), session_id)
}
