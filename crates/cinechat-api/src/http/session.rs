//! Session identity via browser cookie.
//!
//! The session id is an opaque value minted on first contact and carried in
//! the `cinechat_session` cookie. A handler that calls [`session_from_jar`]
//! must send the returned jar back with its response, or a freshly minted
//! id never reaches the client.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use cinechat_types::session::SessionId;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "cinechat_session";

/// Read the session id from the jar, minting and setting one if absent.
///
/// The value is opaque to the rest of the system; nothing downstream parses
/// it back into a UUID.
pub fn session_from_jar(jar: CookieJar) -> (CookieJar, SessionId) {
    if let Some(value) = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
    {
        return (jar, SessionId::new(value));
    }

    let session_id = SessionId::new(Uuid::now_v7().to_string());

    let cookie = Cookie::build((SESSION_COOKIE, session_id.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), session_id)
}
