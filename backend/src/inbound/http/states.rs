//! Festival calendars and state pages.
//!
//! ```text
//! GET /festivals                 nationwide calendar, grouped by month
//! GET /states/{state}            state profile
//! GET /states/{state}/calendar   state and pan-India festivals
//! ```
//!
//! Slugs outside the supported registry answer 404 with a pointer back to
//! Maharashtra.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, FestivalMonthGroup, StateProfile, SupportedState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::Viewer;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::render;

/// Data for the calendar views.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarPage {
    /// Month groups, January first.
    pub festivals: Vec<FestivalMonthGroup>,
}

/// Data for a state view.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatePage {
    pub state: StateProfile,
}

fn supported(slug: &str) -> Result<&'static SupportedState, Error> {
    SupportedState::from_slug(slug)
        .ok_or_else(|| Error::not_found(SupportedState::coming_soon_message(slug)))
}

/// Nationwide festival calendar.
#[utoipa::path(
    get,
    path = "/festivals",
    responses((status = 200, description = "Festivals view", body = CalendarPage)),
    tags = ["calendar"],
    operation_id = "festivalCalendar"
)]
#[get("/festivals")]
pub async fn festival_calendar(
    state: web::Data<HttpState>,
    viewer: Viewer,
) -> ApiResult<HttpResponse> {
    let festivals = state.calendar.festival_calendar().await?;
    Ok(render("festivals", CalendarPage { festivals }, &viewer))
}

/// Heritage profile of a supported state.
#[utoipa::path(
    get,
    path = "/states/{state}",
    params(("state" = String, Path, description = "State slug", example = "maharashtra")),
    responses(
        (status = 200, description = "State view", body = StatePage),
        (status = 404, description = "State not covered yet, or its record is missing", body = Error)
    ),
    tags = ["states"],
    operation_id = "statePage"
)]
#[get("/states/{state}")]
pub async fn state_page(
    state: web::Data<HttpState>,
    viewer: Viewer,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let supported = supported(&slug)?;
    let profile = state.calendar.state_profile(supported).await?;
    Ok(render(supported.slug, StatePage { state: profile }, &viewer))
}

/// Festival calendar for a supported state.
#[utoipa::path(
    get,
    path = "/states/{state}/calendar",
    params(("state" = String, Path, description = "State slug", example = "maharashtra")),
    responses(
        (status = 200, description = "State calendar view", body = CalendarPage),
        (status = 404, description = "State not covered yet", body = Error)
    ),
    tags = ["states", "calendar"],
    operation_id = "stateCalendar"
)]
#[get("/states/{state}/calendar")]
pub async fn state_calendar(
    state: web::Data<HttpState>,
    viewer: Viewer,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let supported = supported(&slug)?;
    let festivals = state.calendar.state_calendar(supported).await?;
    let view = format!("{}-calendar", supported.slug);
    Ok(render(&view, CalendarPage { festivals }, &viewer))
}
