//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the app wiring and cookie plumbing they share lives here.

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::LOCATION;
use actix_web::{test, web};
use serde_json::Value;

use heritage::inbound::http::health::HealthState;
use heritage::inbound::http::session_config::SessionSettings;
use heritage::inbound::http::state::HttpState;
use heritage::server::{AppDependencies, build_app, build_memory_state};

/// Full site wired to fresh in-memory stores and the bundled reference data.
pub async fn init_site()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let http_state = web::Data::new(build_memory_state(2025).expect("memory state"));
    init_site_with(http_state, Key::generate()).await
}

/// Full site over existing stores.
///
/// Apps built with the same key accept each other's session cookies.
pub async fn init_site_with(
    http_state: web::Data<HttpState>,
    key: Key,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    let session = SessionSettings {
        key,
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    test::init_service(build_app(AppDependencies {
        health_state,
        http_state,
        session,
    }))
    .await
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_owned()
}

/// Decode a JSON response body.
pub async fn body_json<B: MessageBody>(response: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("json body")
}

/// Register `username` and return the authenticated session cookie.
pub async fn sign_up<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", username),
            ("password", password),
            ("confirmPassword", password),
        ])
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status().as_u16(), 302, "registration redirects");
    session_cookie(&response)
}

/// Create a post as the holder of `cookie` and return its id.
pub async fn create_post<S>(app: &S, cookie: &Cookie<'static>, title: &str, content: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/blog")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({ "post": { "title": title, "content": content } }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status().as_u16(), 302, "creation redirects");
    location(&response)
        .strip_prefix("/blog/")
        .expect("post location")
        .to_owned()
}
