//! Method override for HTML forms.
//!
//! Browsers only submit `GET` and `POST`, so edit and delete forms post to
//! `/blog/{id}?_method=PUT` or `?_method=DELETE`. This middleware rewrites
//! the request method before routing. Only `POST` requests are rewritten
//! and only to `PUT`, `PATCH` or `DELETE`.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::web::Query;
use futures_util::future::{Ready, ready};
use serde::Deserialize;

/// Query parameter naming the intended method.
pub const OVERRIDE_PARAM: &str = "_method";

#[derive(Debug, Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

fn requested_method(query: &str) -> Option<Method> {
    let requested = Query::<OverrideQuery>::from_query(query)
        .ok()?
        .into_inner()
        .method?;
    match requested.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Middleware factory rewriting `POST ?_method=...` requests.
///
/// Wrap it on the `App` so the rewrite happens before routing.
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = requested_method(req.query_string()) {
                tracing::debug!(%method, path = %req.path(), "method override");
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}
