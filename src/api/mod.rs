//! HTTP API endpoints.
//!
//! Handlers are thin: they extract path and body, call into [`AppState`]
//! and shape the JSON response. Failures are returned as [`AppError`],
//! which renders `{success: false, message}` with a matching status.
//!
//! [`AppError`]: crate::error::AppError

mod games;
mod judges;
mod state;
mod votes;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::state::AppState;

/// Plain acknowledgement body for mutations without a payload
#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// All `/api` routes, without middleware
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        // Games
        .route("/api", get(games::list_games))
        .route("/api/", get(games::list_games))
        .route("/api/game", post(games::create_game))
        .route("/api/game/{game_id}/votes", get(games::votes_for_game))
        // The segment is an edition label; it shares the capture name so the
        // router sees one parameter at this position.
        .route("/api/game/{game_id}/sort", get(games::sorted_by_score))
        .route(
            "/api/games/{game_id}/average-score",
            get(games::average_score),
        )
        .route(
            "/api/game/delete/{id}",
            delete(games::delete_game).get(games::get_under_delete),
        )
        .route(
            "/api/game/update/{id}",
            put(games::update_game).get(games::get_under_update),
        )
        // Judges
        .route(
            "/api/judge",
            get(judges::list_judges).post(judges::create_judge),
        )
        .route("/api/judge/{id}/votes", get(judges::judge_votes))
        .route("/api/judge/delete/{id}", delete(judges::delete_judge))
        .route("/api/judge/update/{id}", put(judges::update_judge))
        // Votes
        .route("/api/vote", get(votes::list_votes).post(votes::create_vote))
        .route("/api/vote/{id}", get(votes::get_vote))
        // State snapshot
        .route("/api/state/export", get(state::export_state))
        .route("/api/state/import", post(state::import_state))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// CORS restricted to the frontend origin, falling back to permissive
/// when the origin is not a valid header value
pub fn cors_layer(origin: &str) -> CorsLayer {
    match HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::PATCH,
                Method::POST,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true),
        Err(e) => {
            tracing::warn!(
                "Invalid frontend origin '{}': {}. Falling back to permissive CORS",
                origin,
                e
            );
            CorsLayer::permissive()
        }
    }
}

/// Complete application router with CORS and request tracing
pub fn router(state: Arc<AppState>, frontend_origin: &str) -> Router {
    routes()
        .layer(cors_layer(frontend_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
