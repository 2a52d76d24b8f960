//! Authentication gate redirecting signed-out visitors to the login form.
//!
//! Requests pass when the session carries a valid user id or the path is
//! exactly `/login` or `/register`. Everything else is answered with
//! `302 Found` to `/login` before any handler runs. The gate must sit inside
//! the session middleware.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse, http::header::LOCATION};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::inbound::http::session::SessionContext;

/// Where signed-out visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH, "/register"];

/// Middleware factory for the authentication gate.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use heritage::middleware::AuthGate;
///
/// let app = App::new().service(web::scope("").wrap(AuthGate));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`AuthGate`].
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
}

fn is_signed_in(req: &ServiceRequest) -> bool {
    match SessionContext::new(req.get_session()).user_id() {
        Ok(user) => user.is_some(),
        Err(error) => {
            tracing::warn!(%error, "unreadable session treated as signed out");
            false
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if PUBLIC_PATHS.contains(&req.path()) || is_signed_in(&req) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        tracing::debug!(path = %req.path(), "redirecting signed-out visitor");
        let response = HttpResponse::Found()
            .insert_header((LOCATION, LOGIN_PATH))
            .finish()
            .map_into_right_body();
        let (request, _) = req.into_parts();
        Box::pin(ready(Ok(ServiceResponse::new(request, response))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{SessionCookieExt, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use rstest::rstest;

    fn gated_app() -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl actix_web::body::MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .route(
                "/test/sign-in",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(&UserId::random())?;
                    Ok::<_, crate::domain::Error>(HttpResponse::Ok().finish())
                }),
            )
            .service(
                web::scope("")
                    .wrap(AuthGate)
                    .default_service(web::to(|| async { HttpResponse::Ok().body("inside") })),
            )
            .wrap(test_session_middleware())
    }

    #[rstest]
    #[case("/")]
    #[case("/blog")]
    #[case("/login/extra")]
    #[case("/registered")]
    #[actix_web::test]
    async fn signed_out_visitors_are_sent_to_login(#[case] path: &str) {
        let app = test::init_service(gated_app()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }

    #[rstest]
    #[case("/login")]
    #[case("/register")]
    #[actix_web::test]
    async fn public_paths_pass_through(#[case] path: &str) {
        let app = test::init_service(gated_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::post().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn signed_in_visitors_pass_through() {
        let app = test::init_service(gated_app()).await;
        let cookie = test::call_service(
            &app,
            test::TestRequest::get().uri("/test/sign-in").to_request(),
        )
        .await
        .session_cookie();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/blog")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "inside");
    }
}
