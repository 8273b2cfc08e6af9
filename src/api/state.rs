//! Snapshot endpoints used for backups between events.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::Ack;
use crate::error::AppResult;
use crate::state::AppState;
use crate::store::StoreSnapshot;

/// Export the entire store as JSON.
///
/// GET /api/state/export
pub async fn export_state(State(state): State<Arc<AppState>>) -> AppResult<Json<StoreSnapshot>> {
    Ok(Json(state.export_state().await?))
}

/// Import a store snapshot.
///
/// POST /api/state/import
///
/// Replaces all current games, judges and votes.
pub async fn import_state(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StoreSnapshot>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let Json(snapshot) = payload?;
    state.import_state(snapshot).await?;
    Ok(Ack::ok("State imported successfully"))
}
