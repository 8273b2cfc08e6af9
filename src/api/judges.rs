use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::Ack;
use crate::error::AppResult;
use crate::state::AppState;
use crate::types::*;

#[derive(Debug, Serialize)]
pub struct JudgeList {
    pub success: bool,
    pub judges: Vec<Judge>,
}

#[derive(Debug, Serialize)]
pub struct JudgeCreated {
    pub success: bool,
    pub message: String,
    pub judge: Judge,
}

#[derive(Debug, Serialize)]
pub struct JudgeVotes {
    pub success: bool,
    #[serde(rename = "judgeVotes")]
    pub judge_votes: Vec<GameVoteView>,
}

/// GET /api/judge
pub async fn list_judges(State(state): State<Arc<AppState>>) -> AppResult<Json<JudgeList>> {
    let judges = state.list_judges().await?;
    Ok(Json(JudgeList {
        success: true,
        judges,
    }))
}

/// GET /api/judge/{id}/votes
pub async fn judge_votes(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<JudgeVotes>> {
    let Path(id) = path?;
    let judge_votes = state.votes_for_judge(&id).await?;
    Ok(Json(JudgeVotes {
        success: true,
        judge_votes,
    }))
}

/// POST /api/judge
pub async fn create_judge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewJudge>, JsonRejection>,
) -> AppResult<Json<JudgeCreated>> {
    let Json(new_judge) = payload?;
    let judge = state.create_judge(new_judge).await?;
    Ok(Json(JudgeCreated {
        success: true,
        message: "Judge created successfully".to_string(),
        judge,
    }))
}

/// DELETE /api/judge/delete/{id}
pub async fn delete_judge(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Ack>> {
    let Path(id) = path?;
    state.delete_judge(&id).await?;
    Ok(Ack::ok("Judge deleted successfully"))
}

/// PUT /api/judge/update/{id}
pub async fn update_judge(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<JudgeUpdate>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let Path(id) = path?;
    let Json(update) = payload?;
    state.update_judge(&id, update).await?;
    Ok(Ack::ok("Judge updated successfully"))
}
