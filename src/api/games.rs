use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::Ack;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::types::*;

#[derive(Debug, Serialize)]
pub struct GameList {
    pub success: bool,
    pub games: Vec<Game>,
}

#[derive(Debug, Serialize)]
pub struct GameCreated {
    pub success: bool,
    pub message: String,
    pub game: Game,
}

#[derive(Debug, Serialize)]
pub struct Ranking {
    pub games: Vec<RankedGame>,
}

/// GET /api/
pub async fn list_games(State(state): State<Arc<AppState>>) -> AppResult<Json<GameList>> {
    let games = state.list_games().await?;
    Ok(Json(GameList {
        success: true,
        games,
    }))
}

/// GET /api/game/{game_id}/votes
pub async fn votes_for_game(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<GameVotes>> {
    let Path(game_id) = path?;
    Ok(Json(state.votes_for_game(&game_id).await?))
}

/// GET /api/game/{edition}/sort
pub async fn sorted_by_score(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Ranking>> {
    let Path(edition) = path?;
    let games = state.rank_edition(&edition).await?;
    Ok(Json(Ranking { games }))
}

/// GET /api/games/{game_id}/average-score
pub async fn average_score(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<GameAverage>> {
    let Path(game_id) = path?;
    Ok(Json(state.average_score(&game_id).await?))
}

/// POST /api/game
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewGame>, JsonRejection>,
) -> AppResult<Json<GameCreated>> {
    let Json(new_game) = payload?;
    let game = state.create_game(new_game).await?;
    Ok(Json(GameCreated {
        success: true,
        message: "Game created successfully".to_string(),
        game,
    }))
}

/// DELETE /api/game/delete/{id}
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Ack>> {
    let Path(id) = path?;
    state.delete_game(&id).await?;
    Ok(Ack::ok("Game deleted successfully"))
}

/// PUT /api/game/update/{id}
pub async fn update_game(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<GameUpdate>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let Path(id) = path?;
    let Json(update) = payload?;
    state.update_game(&id, update).await?;
    Ok(Ack::ok("Game updated successfully"))
}

/// GET /api/game/delete/{action} and GET /api/game/update/{action}
///
/// The static `delete` and `update` segments take priority over
/// `{game_id}` and `{edition}`, so a game or edition with one of those
/// names lands here and is dispatched on the trailing segment.
async fn shadowed_game_route(state: &AppState, segment: &str, action: &str) -> Response {
    match action {
        "sort" => state
            .rank_edition(segment)
            .await
            .map(|games| Json(Ranking { games }))
            .into_response(),
        "votes" => state
            .votes_for_game(segment)
            .await
            .map(Json)
            .into_response(),
        _ => AppError::MethodNotAllowed.into_response(),
    }
}

pub async fn get_under_delete(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    match path {
        Ok(Path(action)) => shadowed_game_route(&state, "delete", &action).await,
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

pub async fn get_under_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    match path {
        Ok(Path(action)) => shadowed_game_route(&state, "update", &action).await,
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}
