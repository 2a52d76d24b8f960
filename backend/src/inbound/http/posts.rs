//! Blog handlers.
//!
//! ```text
//! GET    /blog             list, newest first
//! GET    /blog/new         empty edit form
//! POST   /blog             {"post":{"title":"Hi","content":"Hello"}}
//! GET    /blog/{id}        single post
//! GET    /blog/{id}/edit   edit form (author only)
//! PUT    /blog/{id}        replace title and content (author only)
//! DELETE /blog/{id}        remove (author only)
//! ```
//!
//! Mutating routes claim the post once; a visitor who is not the author is
//! sent back to `/blog` and nothing changes.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, OwnedPost, PostAccess, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{PostPayload, PostSubmission, post_draft};
use crate::inbound::http::session::{SessionContext, Viewer};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{PostView, redirect, render};

const BLOG_PATH: &str = "/blog";
const LOGIN_PATH: &str = "/login";

/// Data for the `blog` view.
#[derive(Debug, Serialize, ToSchema)]
pub struct BlogPage {
    pub posts: Vec<PostView>,
}

/// Data for the `show` and `edit` views.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostPage {
    /// `null` on the new-post form.
    pub post: Option<PostView>,
}

fn post_path(id: PostId) -> String {
    format!("{BLOG_PATH}/{id}")
}

/// Ownership gate: the claimed post, or `None` when the visitor is not its
/// author.
async fn claim(
    state: &HttpState,
    session: &SessionContext,
    id: &PostId,
) -> Result<Option<OwnedPost>, Error> {
    let user_id = session.require_user_id()?;
    match state.posts_query.claim_post(id, &user_id).await? {
        PostAccess::Owner(owned) => Ok(Some(owned)),
        PostAccess::NotOwner => Ok(None),
    }
}

/// List every post with its author.
#[utoipa::path(
    get,
    path = "/blog",
    responses((status = 200, description = "Blog view", body = BlogPage)),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/blog")]
pub async fn list_posts(state: web::Data<HttpState>, viewer: Viewer) -> ApiResult<HttpResponse> {
    let posts = state
        .posts_query
        .list_posts()
        .await?
        .into_iter()
        .map(PostView::from)
        .collect();
    Ok(render("blog", BlogPage { posts }, &viewer))
}

/// Empty form for a new post.
#[utoipa::path(
    get,
    path = "/blog/new",
    responses((status = 200, description = "Edit view without a post", body = PostPage)),
    tags = ["posts"],
    operation_id = "newPostForm"
)]
#[get("/blog/new")]
pub async fn new_post_form(viewer: Viewer) -> HttpResponse {
    render("edit", PostPage { post: None }, &viewer)
}

/// Publish a post as the signed-in user.
#[utoipa::path(
    post,
    path = "/blog",
    request_body = PostPayload,
    responses(
        (status = 302, description = "Created; redirect to the post, or to /login when the account is gone"),
        (status = 400, description = "Invalid post data", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/blog")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: PostSubmission,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let draft = post_draft(payload)?;
    match state.posts.create(&author, draft).await {
        Ok(post) => Ok(redirect(&post_path(post.id()))),
        Err(error) if matches!(error.code(), ErrorCode::Unauthorized) => {
            session.purge();
            Ok(redirect(LOGIN_PATH))
        }
        Err(error) => Err(error),
    }
}

/// Show one post.
#[utoipa::path(
    get,
    path = "/blog/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Show view", body = PostPage),
        (status = 400, description = "Invalid ID format", body = Error),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "showPost"
)]
#[get("/blog/{id}")]
pub async fn show_post(
    state: web::Data<HttpState>,
    viewer: Viewer,
    id: web::Path<PostId>,
) -> ApiResult<HttpResponse> {
    let post = state.posts_query.get_post(&id).await?;
    Ok(render(
        "show",
        PostPage {
            post: Some(post.into()),
        },
        &viewer,
    ))
}

/// Edit form for the author's own post.
#[utoipa::path(
    get,
    path = "/blog/{id}/edit",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Edit view", body = PostPage),
        (status = 302, description = "Not the author; redirect to /blog"),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "editPostForm"
)]
#[get("/blog/{id}/edit")]
pub async fn edit_post_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
    id: web::Path<PostId>,
) -> ApiResult<HttpResponse> {
    let Some(owned) = claim(&state, &session, &id).await? else {
        return Ok(redirect(BLOG_PATH));
    };
    // Only the author gets past the gate, so the viewer is the author.
    let post = PostView::new(owned.post(), viewer.user().cloned());
    Ok(render("edit", PostPage { post: Some(post) }, &viewer))
}

/// Replace the title and content of the author's own post.
#[utoipa::path(
    put,
    path = "/blog/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = PostPayload,
    responses(
        (status = 302, description = "Updated, or not the author"),
        (status = 400, description = "Invalid post data", body = Error),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/blog/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<PostId>,
    payload: PostSubmission,
) -> ApiResult<HttpResponse> {
    let Some(owned) = claim(&state, &session, &id).await? else {
        return Ok(redirect(BLOG_PATH));
    };
    let draft = post_draft(payload)?;
    let post = state.posts.update(owned, draft).await?;
    Ok(redirect(&post_path(post.id())))
}

/// Delete the author's own post.
#[utoipa::path(
    delete,
    path = "/blog/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 302, description = "Deleted, or not the author; redirect to /blog"),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/blog/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<PostId>,
) -> ApiResult<HttpResponse> {
    if let Some(owned) = claim(&state, &session, &id).await? {
        state.posts.delete(owned).await?;
    }
    Ok(redirect(BLOG_PATH))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
