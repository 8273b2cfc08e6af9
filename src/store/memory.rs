//! In-memory entity store with optional JSON snapshot persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::{EntityStore, StoreError, StoreResult, StoreSnapshot};
use crate::types::*;

/// Rows keyed by id, remembering insertion order
#[derive(Debug, Clone)]
struct Table<T> {
    rows: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert(&mut self, id: &str, row: T) -> StoreResult<()> {
        if self.rows.contains_key(id) {
            return Err(StoreError::Conflict(format!("id '{}'", id)));
        }
        self.rows.insert(id.to_string(), row);
        self.order.push(id.to_string());
        Ok(())
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.rows.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.rows.get_mut(id)
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        let row = self.rows.remove(id)?;
        self.order.retain(|k| k != id);
        Some(row)
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

#[derive(Debug, Default)]
struct Tables {
    games: Table<Game>,
    judges: Table<Judge>,
    votes: Table<Vote>,
    /// Composite (judge_id, game_id) key -> vote id
    vote_index: HashMap<(JudgeId, GameId), VoteId>,
}

impl Tables {
    fn from_snapshot(snapshot: StoreSnapshot) -> StoreResult<Self> {
        snapshot.validate()?;

        let mut tables = Tables::default();
        for game in snapshot.games {
            tables.games.insert(&game.id.clone(), game)?;
        }
        for judge in snapshot.judges {
            tables.judges.insert(&judge.id.clone(), judge)?;
        }
        for vote in snapshot.votes {
            tables.insert_vote(vote)?;
        }
        Ok(tables)
    }

    fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(self.games.to_vec(), self.judges.to_vec(), self.votes.to_vec())
    }

    fn insert_vote(&mut self, vote: Vote) -> StoreResult<()> {
        let key = (vote.judge_id.clone(), vote.game_id.clone());
        if self.vote_index.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "vote by judge '{}' for game '{}'",
                vote.judge_id, vote.game_id
            )));
        }
        let id = vote.id.clone();
        self.votes.insert(&id, vote)?;
        self.vote_index.insert(key, id);
        Ok(())
    }
}

/// Entity store keeping all collections in memory.
///
/// A single `RwLock` guards every table and the vote index, so each trait
/// call observes and mutates a consistent view. When opened with a path,
/// the snapshot file is read on open and rewritten after every mutation,
/// before the write lock is released.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// A fresh store with no persistence
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            path: None,
        }
    }

    /// Open a store, loading the snapshot at `path` if one exists
    pub async fn open(path: Option<PathBuf>) -> StoreResult<Self> {
        let exists = match &path {
            Some(p) => tokio::fs::try_exists(p).await?,
            None => false,
        };

        let tables = match &path {
            Some(p) if exists => {
                let raw = tokio::fs::read_to_string(p).await?;
                let snapshot: StoreSnapshot = serde_json::from_str(&raw)?;
                let tables = Tables::from_snapshot(snapshot)?;
                tracing::info!(
                    "Loaded snapshot from {}: {} games, {} judges, {} votes",
                    p.display(),
                    tables.games.rows.len(),
                    tables.judges.rows.len(),
                    tables.votes.rows.len()
                );
                tables
            }
            Some(p) => {
                tracing::info!("No snapshot at {}, starting empty", p.display());
                Tables::default()
            }
            None => Tables::default(),
        };

        Ok(Self {
            tables: RwLock::new(tables),
            path,
        })
    }

    /// Path of the backing snapshot file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Rewrite the snapshot file from `tables`. No-op without a path.
    async fn persist(&self, tables: &Tables) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let encoded = serde_json::to_vec_pretty(&tables.to_snapshot())?;
        write_atomic(path, &encoded).await
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `contents` to `path` through a sibling temp file and a rename
async fn write_atomic(path: &Path, contents: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn list_games(&self) -> StoreResult<Vec<Game>> {
        Ok(self.tables.read().await.games.to_vec())
    }

    async fn games_by_edition(&self, edition: &str) -> StoreResult<Vec<Game>> {
        Ok(self
            .tables
            .read()
            .await
            .games
            .iter()
            .filter(|g| g.edition == edition)
            .cloned()
            .collect())
    }

    async fn get_game(&self, id: &str) -> StoreResult<Option<Game>> {
        Ok(self.tables.read().await.games.get(id).cloned())
    }

    async fn insert_game(&self, game: Game) -> StoreResult<()> {
        let id = game.id.clone();
        let mut tables = self.tables.write().await;
        tables.games.insert(&id, game)?;
        self.persist(&tables).await
    }

    async fn update_game(&self, id: &str, update: GameUpdate) -> StoreResult<Option<Game>> {
        let mut tables = self.tables.write().await;
        let updated = tables.games.get_mut(id).map(|game| {
            update.apply(game);
            game.clone()
        });
        if updated.is_some() {
            self.persist(&tables).await?;
        }
        Ok(updated)
    }

    async fn delete_game(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.games.remove(id).is_some();
        if removed {
            self.persist(&tables).await?;
        }
        Ok(removed)
    }

    async fn list_judges(&self) -> StoreResult<Vec<Judge>> {
        Ok(self.tables.read().await.judges.to_vec())
    }

    async fn get_judge(&self, id: &str) -> StoreResult<Option<Judge>> {
        Ok(self.tables.read().await.judges.get(id).cloned())
    }

    async fn insert_judge(&self, judge: Judge) -> StoreResult<()> {
        let id = judge.id.clone();
        let mut tables = self.tables.write().await;
        tables.judges.insert(&id, judge)?;
        self.persist(&tables).await
    }

    async fn rename_judge(&self, id: &str, name: String) -> StoreResult<Option<Judge>> {
        let mut tables = self.tables.write().await;
        let renamed = tables.judges.get_mut(id).map(|judge| {
            judge.name = name;
            judge.clone()
        });
        if renamed.is_some() {
            self.persist(&tables).await?;
        }
        Ok(renamed)
    }

    async fn delete_judge(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.judges.remove(id).is_some();
        if removed {
            self.persist(&tables).await?;
        }
        Ok(removed)
    }

    async fn list_votes(&self) -> StoreResult<Vec<Vote>> {
        Ok(self.tables.read().await.votes.to_vec())
    }

    async fn get_vote(&self, id: &str) -> StoreResult<Option<Vote>> {
        Ok(self.tables.read().await.votes.get(id).cloned())
    }

    async fn votes_for_game(&self, game_id: &str) -> StoreResult<Vec<Vote>> {
        Ok(self
            .tables
            .read()
            .await
            .votes
            .iter()
            .filter(|v| v.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn votes_for_judge(&self, judge_id: &str) -> StoreResult<Vec<Vote>> {
        Ok(self
            .tables
            .read()
            .await
            .votes
            .iter()
            .filter(|v| v.judge_id == judge_id)
            .cloned()
            .collect())
    }

    async fn find_vote(&self, judge_id: &str, game_id: &str) -> StoreResult<Option<Vote>> {
        let tables = self.tables.read().await;
        let key = (judge_id.to_string(), game_id.to_string());
        Ok(tables
            .vote_index
            .get(&key)
            .and_then(|vote_id| tables.votes.get(vote_id))
            .cloned())
    }

    async fn insert_vote(&self, vote: Vote) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.insert_vote(vote)?;
        self.persist(&tables).await
    }

    async fn snapshot(&self) -> StoreResult<StoreSnapshot> {
        Ok(self.tables.read().await.to_snapshot())
    }

    async fn restore(&self, snapshot: StoreSnapshot) -> StoreResult<()> {
        // Build the replacement fully before taking the write lock
        let replacement = Tables::from_snapshot(snapshot)?;
        let mut tables = self.tables.write().await;
        *tables = replacement;
        self.persist(&tables).await
    }

    async fn close(&self) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        // Hold the lock so no mutation interleaves with the final write
        let tables = self.tables.read().await;
        self.persist(&tables).await?;
        tracing::info!("Wrote snapshot to {}", path.display());
        Ok(())
    }
}
