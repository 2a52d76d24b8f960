//! Account handlers: login, registration and logout.
//!
//! ```text
//! GET  /login     login form, or redirect home when signed in
//! POST /login     {"username":"alice","password":"secret1"}
//! GET  /register  registration form
//! POST /register  {"username":"alice","password":"secret1","confirmPassword":"secret1"}
//! GET  /logout
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{LoginForm, RegisterForm, Submitted, submitted};
use crate::inbound::http::session::{SessionContext, Viewer};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{EmptyPage, redirect, render};

/// Show the login form, or send signed-in visitors home.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login view"),
        (status = 302, description = "Already signed in; redirect to /")
    ),
    tags = ["accounts"],
    operation_id = "loginPage"
)]
#[get("/login")]
pub async fn login_page(session: SessionContext, viewer: Viewer) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_some() {
        return Ok(redirect("/"));
    }
    Ok(render("login", EmptyPage::default(), &viewer))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Signed in; redirect to /", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Username and password are required", body = Error),
        (status = 401, description = "Invalid username or password", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Submitted<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = submitted(payload).credentials()?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(user.id())?;
    tracing::info!(user_id = %user.id(), "signed in");
    Ok(redirect("/"))
}

/// Show the registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration view")),
    tags = ["accounts"],
    operation_id = "registerPage"
)]
#[get("/register")]
pub async fn register_page(viewer: Viewer) -> HttpResponse {
    render("register", EmptyPage::default(), &viewer)
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Registered; redirect to /"),
        (status = 400, description = "Missing field, short password, mismatch or taken username", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Submitted<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let registration = submitted(payload).registration()?;
    let user = state.accounts.register(&registration).await?;
    session.persist_user(user.id())?;
    Ok(redirect("/"))
}

/// Forget the session and return to the login form.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 302, description = "Session purged; redirect to /login")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    redirect("/login")
}
