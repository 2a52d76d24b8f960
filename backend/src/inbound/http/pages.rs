//! Static views and the catch-all 404.

use actix_web::{HttpResponse, web};

use crate::domain::Error;
use crate::inbound::http::session::Viewer;
use crate::inbound::http::views::{EmptyPage, render};

/// Message for paths no route claims.
pub const PAGE_NOT_FOUND: &str = "Page Not Found!";

/// Paths served by a fixed view, paired with the view name.
pub const STATIC_PAGES: &[(&str, &str)] = &[
    ("/", "index"),
    ("/map-nav", "map"),
    ("/states/maharashtra/heritage", "heritage"),
    ("/states/maharashtra/heritage/rajgad", "rajgad-3d"),
    ("/states/maharashtra/heritage/daulatabad", "daulatabad-3d"),
    ("/states/maharashtra/cuisine", "cuisine"),
    ("/states/maharashtra/cuisine/thali", "thali-3d"),
    ("/states/maharashtra/cuisine/vada-pav", "vada-pav-3d"),
];

/// Register every entry of [`STATIC_PAGES`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    for &(path, view) in STATIC_PAGES {
        cfg.route(
            path,
            web::get().to(move |viewer: Viewer| async move {
                render(view, EmptyPage::default(), &viewer)
            }),
        );
    }
}

/// Default service: every unmatched request is a 404.
pub async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found(PAGE_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_session_middleware, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("/", "index")]
    #[case("/map-nav", "map")]
    #[case("/states/maharashtra/heritage/rajgad", "rajgad-3d")]
    #[case("/states/maharashtra/cuisine/vada-pav", "vada-pav-3d")]
    #[actix_web::test]
    async fn static_paths_render_their_view(#[case] uri: &str, #[case] view: &str) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(test_state()))
                .configure(configure),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["view"], view);
    }

    #[rstest]
    #[actix_web::test]
    async fn unmatched_paths_are_not_found() {
        let app = test::init_service(
            App::new()
                .configure(configure)
                .default_service(web::to(not_found)),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/nowhere").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], PAGE_NOT_FOUND);
        assert_eq!(body["view"], "error");
    }
}
