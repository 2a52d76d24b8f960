//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every page and form handler, the view models they
//! render, and the session cookie security scheme. The document backs
//! Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Festival, FestivalMonthGroup, Month, StateProfile, User};
use crate::inbound::http::forms::{LoginForm, PostFields, PostPayload, RegisterForm};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::posts::{BlogPage, PostPage};
use crate::inbound::http::states::{CalendarPage, StatePage};
use crate::inbound::http::views::{EmptyPage, PostView};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /login or POST /register.",
            ))),
        );
    }
}

/// OpenAPI document for the site.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Heritage site API",
        description = "Pages, blog and festival calendars. Every path except /login, \
                       /register and the health probes needs a session."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::register_page,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::new_post_form,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::show_post,
        crate::inbound::http::posts::edit_post_form,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::states::festival_calendar,
        crate::inbound::http::states::state_page,
        crate::inbound::http::states::state_calendar,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Festival,
        FestivalMonthGroup,
        Month,
        StateProfile,
        LoginForm,
        RegisterForm,
        PostFields,
        PostPayload,
        EmptyPage,
        PostView,
        BlogPage,
        PostPage,
        CalendarPage,
        StatePage,
        ProbeStatus,
    )),
    tags(
        (name = "accounts", description = "Registration, login and logout"),
        (name = "posts", description = "Community blog"),
        (name = "calendar", description = "Festival calendars"),
        (name = "states", description = "State pages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
