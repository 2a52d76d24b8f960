//! JSON view models returned in place of rendered templates.
//!
//! Every page response is `{ "view": <name>, ...data, "currentUser": <user|null> }`
//! so a front end can pick a template by name and fill it from the same
//! fields the server would have rendered.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AuthoredPost, Error, Post, User};
use crate::inbound::http::session::Viewer;

/// Link offered on every error page.
pub const ERROR_REDIRECT_LINK: &str = "/states/maharashtra";
/// Caption for [`ERROR_REDIRECT_LINK`].
pub const ERROR_REDIRECT_TEXT: &str = "Explore Maharashtra";

/// Envelope naming the view and carrying its data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel<'a, T> {
    view: &'a str,
    #[serde(flatten)]
    data: T,
    current_user: Option<&'a User>,
}

/// View without page-specific data.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct EmptyPage {}

/// Render `view` with `data` for the current visitor.
///
/// # Examples
/// ```
/// use heritage::inbound::http::session::Viewer;
/// use heritage::inbound::http::views::{EmptyPage, render};
///
/// let response = render("index", EmptyPage::default(), &Viewer::anonymous());
/// assert_eq!(response.status(), actix_web::http::StatusCode::OK);
/// ```
pub fn render<T: Serialize>(view: &str, data: T, viewer: &Viewer) -> HttpResponse {
    HttpResponse::Ok().json(ViewModel {
        view,
        data,
        current_user: viewer.user(),
    })
}

/// `302 Found` pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::build(StatusCode::FOUND)
        .insert_header((LOCATION, location))
        .finish()
}

/// Post as shown on list, detail and edit pages.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Author record; `null` when the account no longer resolves.
    pub author: Option<User>,
}

impl PostView {
    /// Pair a post with an already resolved author.
    pub fn new(post: &Post, author: Option<User>) -> Self {
        Self {
            id: post.id().to_string(),
            title: post.title().to_owned(),
            content: post.content().to_owned(),
            created_at: post.created_at(),
            author,
        }
    }
}

impl From<AuthoredPost> for PostView {
    fn from(value: AuthoredPost) -> Self {
        Self::new(&value.post, value.author)
    }
}

/// Error page payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorView<'a> {
    view: &'static str,
    #[serde(flatten)]
    error: &'a Error,
    redirect_link: &'static str,
    redirect_text: &'static str,
}

impl<'a> ErrorView<'a> {
    /// Wrap an error that is already safe to show.
    pub fn new(error: &'a Error) -> Self {
        Self {
            view: "error",
            error,
            redirect_link: ERROR_REDIRECT_LINK,
            redirect_text: ERROR_REDIRECT_TEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PostDraft, PostId};
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[actix_web::test]
    async fn render_flattens_data_beside_view_and_user() {
        let user = User::try_from_strings("11111111-1111-4111-8111-111111111111", "alice")
            .expect("user");
        let viewer = Viewer::signed_in(user);
        let response = render("festivals", json!({ "festivals": [] }), &viewer);

        let body = body_json(response).await;
        assert_eq!(body["view"], "festivals");
        assert_eq!(body["festivals"], json!([]));
        assert_eq!(body["currentUser"]["username"], "alice");
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_visitors_render_null_user() {
        let body = body_json(render("login", EmptyPage::default(), &Viewer::anonymous())).await;
        assert_eq!(body, json!({ "view": "login", "currentUser": null }));
    }

    #[rstest]
    fn redirect_sets_location() {
        let response = redirect("/blog");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/blog")
        );
    }

    #[rstest]
    fn post_view_keeps_missing_author_as_null() {
        let draft = PostDraft::try_from_parts(Some("Hi"), Some("Hello")).expect("draft");
        let post = Post::new(
            PostId::random(),
            draft,
            crate::domain::UserId::random(),
            Utc::now(),
        );
        let view = serde_json::to_value(PostView::new(&post, None)).expect("serialise");
        assert_eq!(view["author"], Value::Null);
        assert_eq!(view["title"], "Hi");
    }

    #[rstest]
    fn error_view_carries_redirect_link() {
        let error = Error::not_found("Post not found").with_trace_id("abc");
        let view = serde_json::to_value(ErrorView::new(&error)).expect("serialise");
        assert_eq!(
            view,
            json!({
                "view": "error",
                "code": "not_found",
                "message": "Post not found",
                "traceId": "abc",
                "redirectLink": "/states/maharashtra",
                "redirectText": "Explore Maharashtra",
            })
        );
    }
}
