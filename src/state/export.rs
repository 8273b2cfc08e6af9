//! State export/import for backup and restoration between events.

use super::AppState;
use crate::error::{AppError, AppResult};
use crate::store::{StoreError, StoreSnapshot};

impl AppState {
    /// Export every game, judge and vote as a snapshot
    pub async fn export_state(&self) -> AppResult<StoreSnapshot> {
        Ok(self.store.snapshot().await?)
    }

    /// Replace all current state with an imported snapshot.
    ///
    /// A snapshot that fails validation is reported as a validation error
    /// and leaves the current state untouched.
    pub async fn import_state(&self, snapshot: StoreSnapshot) -> AppResult<()> {
        let counts = (
            snapshot.games.len(),
            snapshot.judges.len(),
            snapshot.votes.len(),
        );

        match self.store.restore(snapshot).await {
            Ok(()) => {
                tracing::info!(
                    "Imported state: {} games, {} judges, {} votes",
                    counts.0,
                    counts.1,
                    counts.2
                );
                Ok(())
            }
            Err(StoreError::InvalidSnapshot(msg)) => Err(AppError::Validation(msg)),
            Err(StoreError::Conflict(key)) => {
                Err(AppError::Validation(format!("Conflicting record: {}", key)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
