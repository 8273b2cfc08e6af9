//! Entity store abstraction.
//!
//! The service layer owns an `Arc<dyn EntityStore>` that is opened at
//! startup and closed at shutdown. Every method is a single atomic store
//! operation; there is no cross-call transaction.

mod memory;
mod snapshot;

use async_trait::async_trait;

use crate::types::*;

pub use memory::MemoryStore;
pub use snapshot::{StoreSnapshot, SNAPSHOT_SCHEMA_VERSION};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur inside the entity store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record with the same key already exists
    #[error("{0} already exists")]
    Conflict(String),

    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding failed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Persistent records for games, judges and votes
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// All games in insertion order
    async fn list_games(&self) -> StoreResult<Vec<Game>>;

    /// Games whose edition equals `edition`, in insertion order
    async fn games_by_edition(&self, edition: &str) -> StoreResult<Vec<Game>>;

    async fn get_game(&self, id: &str) -> StoreResult<Option<Game>>;

    /// Insert a new game. Fails with `Conflict` if the id is taken.
    async fn insert_game(&self, game: Game) -> StoreResult<()>;

    /// Apply a partial update, returning the updated game if it exists
    async fn update_game(&self, id: &str, update: GameUpdate) -> StoreResult<Option<Game>>;

    /// Remove a game. Returns whether it existed. Votes are left alone.
    async fn delete_game(&self, id: &str) -> StoreResult<bool>;

    async fn list_judges(&self) -> StoreResult<Vec<Judge>>;

    async fn get_judge(&self, id: &str) -> StoreResult<Option<Judge>>;

    async fn insert_judge(&self, judge: Judge) -> StoreResult<()>;

    async fn rename_judge(&self, id: &str, name: String) -> StoreResult<Option<Judge>>;

    /// Remove a judge. Returns whether it existed. Votes are left alone.
    async fn delete_judge(&self, id: &str) -> StoreResult<bool>;

    async fn list_votes(&self) -> StoreResult<Vec<Vote>>;

    async fn get_vote(&self, id: &str) -> StoreResult<Option<Vote>>;

    async fn votes_for_game(&self, game_id: &str) -> StoreResult<Vec<Vote>>;

    async fn votes_for_judge(&self, judge_id: &str) -> StoreResult<Vec<Vote>>;

    /// The vote for an exact (judge, game) pair, if any
    async fn find_vote(&self, judge_id: &str, game_id: &str) -> StoreResult<Option<Vote>>;

    /// Insert a vote if no vote exists for its (judge, game) pair.
    ///
    /// The check and the insert happen atomically; a lost race fails with
    /// `Conflict`.
    async fn insert_vote(&self, vote: Vote) -> StoreResult<()>;

    /// Copy of the full store contents
    async fn snapshot(&self) -> StoreResult<StoreSnapshot>;

    /// Replace the full store contents. Invalid snapshots leave the store
    /// untouched.
    async fn restore(&self, snapshot: StoreSnapshot) -> StoreResult<()>;

    /// Flush and release the store
    async fn close(&self) -> StoreResult<()>;
}
