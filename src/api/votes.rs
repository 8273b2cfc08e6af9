use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppResult;
use crate::state::AppState;
use crate::types::*;

#[derive(Debug, Serialize)]
pub struct VoteList {
    pub success: bool,
    pub votes: Vec<Vote>,
}

#[derive(Debug, Serialize)]
pub struct VoteCreated {
    pub success: bool,
    pub message: String,
    pub vote: Vote,
}

/// GET /api/vote
pub async fn list_votes(State(state): State<Arc<AppState>>) -> AppResult<Json<VoteList>> {
    let votes = state.list_votes().await?;
    Ok(Json(VoteList {
        success: true,
        votes,
    }))
}

/// GET /api/vote/{id}
pub async fn get_vote(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<VoteDetail>> {
    let Path(id) = path?;
    Ok(Json(state.get_vote(&id).await?))
}

/// POST /api/vote
///
/// Missing or out-of-range fields give 400, unknown judge or game 404,
/// and a second vote for the same pair 409.
pub async fn create_vote(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VoteSubmission>, JsonRejection>,
) -> AppResult<Json<VoteCreated>> {
    let Json(submission) = payload?;
    let vote = state.submit_vote(submission).await?;
    Ok(Json(VoteCreated {
        success: true,
        message: "Vote created successfully".to_string(),
        vote,
    }))
}
