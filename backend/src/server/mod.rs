//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, DEFAULT_BIND_ADDR, ServerConfig, SettingsError};
pub use state_builders::build_memory_state;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::accounts::{login, login_page, logout, register, register_page};
use crate::inbound::http::error::{form_error_handler, json_error_handler, path_error_handler};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::pages;
use crate::inbound::http::posts::{
    create_post, delete_post, edit_post_form, list_posts, new_post_form, show_post, update_post,
};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::states::{festival_calendar, state_calendar, state_page};
use crate::middleware::{AuthGate, MethodOverride, Trace};

/// Everything one app instance needs; cloned into each worker.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// Driving ports for the handlers.
    pub http_state: web::Data<HttpState>,
    /// Session cookie settings.
    pub session: SessionSettings,
}

/// Assemble the application.
///
/// Health probes and API docs sit outside the authentication gate. Every
/// other path, including the catch-all 404, is behind it. `Trace` is the
/// outermost layer so even gate redirects carry a trace id, and the method
/// override runs before routing.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let site = web::scope("")
        .wrap(AuthGate)
        .service(login_page)
        .service(login)
        .service(register_page)
        .service(register)
        .service(logout)
        .service(list_posts)
        .service(new_post_form)
        .service(create_post)
        .service(show_post)
        .service(edit_post_form)
        .service(update_post)
        .service(delete_post)
        .service(festival_calendar)
        .service(state_page)
        .service(state_calendar)
        .configure(pages::configure)
        .default_service(web::to(pages::not_found));

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::FormConfig::default().error_handler(form_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(MethodOverride)
        .wrap(session.middleware())
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(site)
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the stores cannot be prepared or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig {
        session,
        bind_addr,
        db_pool: _,
        calendar_year: _,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
