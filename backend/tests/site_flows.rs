//! End-to-end flows through the full app wiring with in-memory stores.

// Each test crate uses a different subset of the helpers.
#[allow(dead_code)]
mod support;

use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{test, web};
use rstest::rstest;
use serde_json::{Value, json};

use heritage::domain::TRACE_ID_HEADER;
use heritage::inbound::http::state::HttpState;
use heritage::server::build_memory_state;
use support::{
    body_json, create_post, init_site, init_site_with, location, session_cookie, sign_up,
};

fn fresh_stores() -> web::Data<HttpState> {
    web::Data::new(build_memory_state(2025).expect("memory state"))
}

#[rstest]
#[case("/")]
#[case("/blog")]
#[case("/blog/new")]
#[case("/festivals")]
#[case("/states/maharashtra")]
#[case("/states/maharashtra/cuisine/thali")]
#[case("/no/such/page")]
#[actix_web::test]
async fn anonymous_visitors_are_sent_to_login(#[case] path: &str) {
    let app = init_site().await;
    let response = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[rstest]
#[case("/login", "login")]
#[case("/register", "register")]
#[actix_web::test]
async fn login_and_register_pages_are_public(#[case] path: &str, #[case] view: &str) {
    let app = init_site().await;
    let response = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["view"], view);
    assert_eq!(body["currentUser"], Value::Null);
}

#[rstest]
#[case("/health/live")]
#[case("/health/ready")]
#[actix_web::test]
async fn health_probes_skip_the_gate(#[case] path: &str) {
    let app = init_site().await;
    let response = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn registered_author_publishes_a_post() {
    let app = init_site().await;
    let cookie = sign_up(&app, "alice", "secret1").await;

    let home = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(home.status(), StatusCode::OK);
    let body = body_json(home).await;
    assert_eq!(body["view"], "index");
    assert_eq!(body["currentUser"]["username"], "alice");

    let id = create_post(&app, &cookie, "Hi", "Hello").await;
    let shown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blog/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(shown.status(), StatusCode::OK);
    let body = body_json(shown).await;
    assert_eq!(body["view"], "show");
    assert_eq!(body["post"]["title"], "Hi");
    assert_eq!(body["post"]["content"], "Hello");
    assert_eq!(body["post"]["author"]["username"], "alice");
}

#[rstest]
#[actix_web::test]
async fn blog_lists_newest_posts_first() {
    let app = init_site().await;
    let cookie = sign_up(&app, "alice", "secret1").await;
    create_post(&app, &cookie, "First", "one").await;
    create_post(&app, &cookie, "Second", "two").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/blog").cookie(cookie).to_request(),
    )
    .await;
    let body = body_json(response).await;
    let titles: Vec<&str> = body["posts"]
        .as_array()
        .expect("posts array")
        .iter()
        .filter_map(|post| post["title"].as_str())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"First") && titles.contains(&"Second"));
}

#[rstest]
#[case("PUT")]
#[case("DELETE")]
#[actix_web::test]
async fn other_users_cannot_touch_a_post(#[case] method: &str) {
    let app = init_site().await;
    let alice = sign_up(&app, "alice", "secret1").await;
    let bob = sign_up(&app, "bob", "secret2").await;
    let id = create_post(&app, &alice, "Hi", "Hello").await;

    let request = test::TestRequest::post()
        .uri(&format!("/blog/{id}?_method={method}"))
        .cookie(bob)
        .set_form([("post[title]", "Hijacked"), ("post[content]", "Nope")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/blog");

    let shown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blog/{id}"))
            .cookie(alice)
            .to_request(),
    )
    .await;
    let body = body_json(shown).await;
    assert_eq!(body["post"]["title"], "Hi");
    assert_eq!(body["post"]["content"], "Hello");
}

#[rstest]
#[case::no_body(None)]
#[case::broken_json(Some("{\"post\": "))]
#[actix_web::test]
async fn strangers_are_sent_back_whatever_they_submit(#[case] body: Option<&'static str>) {
    let app = init_site().await;
    let alice = sign_up(&app, "alice", "secret1").await;
    let bob = sign_up(&app, "bob", "secret2").await;
    let id = create_post(&app, &alice, "Hi", "Hello").await;

    let mut request = test::TestRequest::post()
        .uri(&format!("/blog/{id}?_method=PUT"))
        .cookie(bob);
    if let Some(raw) = body {
        request = request
            .insert_header(ContentType::json())
            .set_payload(raw);
    }
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/blog");
}

#[rstest]
#[case::create(None)]
#[case::update(Some("PUT"))]
#[actix_web::test]
async fn undecodable_post_bodies_are_invalid_post_data(#[case] method: Option<&str>) {
    let app = init_site().await;
    let alice = sign_up(&app, "alice", "secret1").await;
    let uri = match method {
        None => "/blog".to_owned(),
        Some(method) => {
            let id = create_post(&app, &alice, "Hi", "Hello").await;
            format!("/blog/{id}?_method={method}")
        }
    };

    let bare = test::TestRequest::post()
        .uri(&uri)
        .cookie(alice.clone())
        .to_request();
    let response = test::call_service(&app, bare).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid post data");

    let broken = test::TestRequest::post()
        .uri(&uri)
        .cookie(alice)
        .insert_header(ContentType::json())
        .set_payload("{\"post\": ")
        .to_request();
    let response = test::call_service(&app, broken).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid post data");
}

#[rstest]
#[actix_web::test]
async fn sessions_outliving_their_account_cannot_publish() {
    let key = Key::generate();
    let before_restart = init_site_with(fresh_stores(), key.clone()).await;
    let alice = sign_up(&before_restart, "alice", "secret1").await;

    let after_restart = init_site_with(fresh_stores(), key).await;
    let request = test::TestRequest::post()
        .uri("/blog")
        .cookie(alice)
        .set_json(json!({ "post": { "title": "Hi", "content": "Hello" } }))
        .to_request();
    let response = test::call_service(&after_restart, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");

    let reader = sign_up(&after_restart, "bob", "secret2").await;
    let listed = test::call_service(
        &after_restart,
        test::TestRequest::get().uri("/blog").cookie(reader).to_request(),
    )
    .await;
    assert_eq!(body_json(listed).await["posts"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn authors_edit_and_delete_through_method_override() {
    let app = init_site().await;
    let alice = sign_up(&app, "alice", "secret1").await;
    let id = create_post(&app, &alice, "Hi", "Hello").await;

    let update = test::TestRequest::post()
        .uri(&format!("/blog/{id}?_method=PUT"))
        .cookie(alice.clone())
        .set_form([("post[title]", "Hi again"), ("post[content]", "Hello again")])
        .to_request();
    let response = test::call_service(&app, update).await;
    assert_eq!(location(&response), format!("/blog/{id}"));

    let shown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blog/{id}"))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(body_json(shown).await["post"]["title"], "Hi again");

    let delete = test::TestRequest::post()
        .uri(&format!("/blog/{id}?_method=DELETE"))
        .cookie(alice.clone())
        .to_request();
    let response = test::call_service(&app, delete).await;
    assert_eq!(location(&response), "/blog");

    let gone = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blog/{id}"))
            .cookie(alice)
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("mallory", "secret1")]
#[case("alice", "wrong-password")]
#[actix_web::test]
async fn failed_logins_share_one_message(#[case] username: &str, #[case] password: &str) {
    let app = init_site().await;
    sign_up(&app, "alice", "secret1").await;

    let request = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", username), ("password", password)])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["view"], "error");
    assert_eq!(body["message"], "Invalid username or password");
}

#[rstest]
#[actix_web::test]
async fn login_then_logout_round_trip() {
    let app = init_site().await;
    sign_up(&app, "alice", "secret1").await;

    let login = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", "alice"), ("password", "secret1")])
        .to_request();
    let response = test::call_service(&app, login).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);

    let logout = test::call_service(
        &app,
        test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(location(&logout), "/login");
    let cleared = session_cookie(&logout);

    let after = test::call_service(
        &app,
        test::TestRequest::get().uri("/blog").cookie(cleared).to_request(),
    )
    .await;
    assert_eq!(location(&after), "/login");
}

#[rstest]
#[case("abcde", StatusCode::BAD_REQUEST)]
#[case("abcdef", StatusCode::FOUND)]
#[actix_web::test]
async fn registration_enforces_password_length(
    #[case] password: &str,
    #[case] expected: StatusCode,
) {
    let app = init_site().await;
    let request = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", "alice"),
            ("password", password),
            ("confirmPassword", password),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn duplicate_usernames_are_rejected() {
    let app = init_site().await;
    sign_up(&app, "alice", "secret1").await;

    let request = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", "alice"),
            ("password", "another1"),
            ("confirmPassword", "another1"),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Username already exists");
}

#[rstest]
#[case("/festivals")]
#[case("/states/maharashtra/calendar")]
#[actix_web::test]
async fn calendars_run_january_to_december(#[case] path: &str) {
    let app = init_site().await;
    let cookie = sign_up(&app, "alice", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri(path).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let orders: Vec<u64> = body["festivals"]
        .as_array()
        .expect("month groups")
        .iter()
        .filter_map(|group| group["sortOrder"].as_u64())
        .collect();
    assert!(!orders.is_empty());
    assert!(orders.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(
        body["festivals"][0]["month"],
        "January",
        "bundled data opens the year in January"
    );
}

#[rstest]
#[actix_web::test]
async fn maharashtra_page_renders_its_profile() {
    let app = init_site().await;
    let cookie = sign_up(&app, "alice", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/states/maharashtra")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["view"], "maharashtra");
    assert_eq!(body["state"]["stateId"], "INMH");
}

#[rstest]
#[case("/states/kerala")]
#[case("/states/kerala/calendar")]
#[actix_web::test]
async fn other_states_are_coming_soon(#[case] path: &str) {
    let app = init_site().await;
    let cookie = sign_up(&app, "alice", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri(path).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Information about kerala will be available soon. For now, you can explore Maharashtra state."
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_pages_render_the_error_view() {
    let app = init_site().await;
    let cookie = sign_up(&app, "alice", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/no/such/page")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body = body_json(response).await;
    assert_eq!(body["traceId"], trace_id.as_str());
    insta::assert_json_snapshot!(body, { ".traceId" => "[trace-id]" }, @r#"
    {
      "code": "not_found",
      "message": "Page Not Found!",
      "redirectLink": "/states/maharashtra",
      "redirectText": "Explore Maharashtra",
      "traceId": "[trace-id]",
      "view": "error"
    }
    "#);
}

#[rstest]
#[actix_web::test]
async fn malformed_post_ids_are_bad_requests() {
    let app = init_site().await;
    let cookie = sign_up(&app, "alice", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/blog/not-a-uuid")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid ID format");
}
