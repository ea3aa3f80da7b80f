//! Test helpers for inbound HTTP components.

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use super::session::USER_ID_KEY;

/// Path of the login stand-in mounted by [`login_route`].
pub const TEST_LOGIN_PATH: &str = "/test/login/{user_id}";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Route that stores `user_id` in the session the way the identity service
/// does, so handler tests can obtain an authenticated cookie.
pub fn login_route() -> actix_web::Route {
    web::get().to(|session: Session, path: web::Path<i32>| async move {
        match session.insert(USER_ID_KEY, path.into_inner()) {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    })
}

/// Extract the session cookie from a login response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
