//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, Timelike};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::domain::{Coordinate, ServiceMinute};
use crate::planner::{SearchError, Target, rank_reachable, reachable_stops};

use super::dto::{ErrorResponse, SearchCondition, SearchRequest, SearchResponse};
use super::state::AppState;

/// A candidate within this distance of the target counts as reaching it.
const REACHABLE_RADIUS_KM: f64 = 1.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", post(search))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match self {
            SearchError::UnknownStation { .. } => StatusCode::NOT_FOUND,
            SearchError::MissingTarget | SearchError::MalformedTime { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Search for stations still reachable tonight.
async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, SearchError> {
    // All validation happens before exploration starts.
    let start = state
        .registry
        .resolve(&req.start_station)
        .ok_or_else(|| SearchError::UnknownStation {
            name: req.start_station.clone(),
        })?
        .clone();

    let (target, target_coord) = resolve_target(&req, &state)?;

    let time_text = req
        .current_time
        .clone()
        .unwrap_or_else(current_clock_time);
    let start_time = ServiceMinute::parse(&time_text, state.config.wrap_threshold_hour)
        .map_err(|_| SearchError::MalformedTime {
            input: time_text.clone(),
        })?;

    info!(start = %start.id, time = %time_text, "search request");

    let outcome = reachable_stops(&start.id, start_time, &state.index, &state.config);
    let candidates = rank_reachable(
        &outcome,
        &start.id,
        target_coord,
        &state.registry,
        &state.fares,
        &state.config,
    );

    let is_target_reachable = candidates
        .first()
        .is_some_and(|best| best.distance_to_target_km < REACHABLE_RADIUS_KM);

    Ok(Json(SearchResponse {
        status: "success".to_string(),
        is_target_reachable,
        truncated: outcome.truncated,
        search_condition: SearchCondition {
            start: req.start_station,
            target: describe_target(&target, &state),
            time: time_text,
        },
        candidates,
    }))
}

/// Turn the request's target fields into the single tagged target type
/// and the coordinate distances are measured against.
fn resolve_target(
    req: &SearchRequest,
    state: &AppState,
) -> Result<(Target, Coordinate), SearchError> {
    if let (Some(lat), Some(lon)) = (req.target_lat, req.target_lon) {
        let coord = Coordinate { lat, lon };
        return Ok((Target::Coordinate(coord), coord));
    }
    if let Some(name) = req.target_station.as_deref() {
        if !name.trim().is_empty() {
            let station = state
                .registry
                .resolve(name)
                .ok_or_else(|| SearchError::UnknownStation {
                    name: name.to_string(),
                })?;
            return Ok((Target::Station(station.id.clone()), station.coordinate()));
        }
    }
    Err(SearchError::MissingTarget)
}

fn describe_target(target: &Target, state: &AppState) -> String {
    match target {
        Target::Station(id) => state
            .registry
            .get(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string()),
        Target::Coordinate(c) => format!("({:.4}, {:.4})", c.lat, c.lon),
    }
}

/// Current local wall-clock time as "HH:MM".
fn current_clock_time() -> String {
    let now = Local::now().time();
    format!("{:02}:{:02}", now.hour(), now.minute())
}
