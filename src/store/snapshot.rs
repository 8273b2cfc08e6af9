//! Serializable snapshot of the whole entity store.
//!
//! Used both as the on-disk persistence format of [`super::MemoryStore`]
//! and as the body of the export/import endpoints.

use super::{StoreError, StoreResult};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema version for snapshot format compatibility
/// Version 1: games, judges, votes as insertion-ordered lists
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSnapshot {
    /// Schema version for forward compatibility
    pub schema_version: u32,
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// All games, in insertion order
    #[serde(default)]
    pub games: Vec<Game>,
    /// All judges, in insertion order
    #[serde(default)]
    pub judges: Vec<Judge>,
    /// All votes, in insertion order
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl StoreSnapshot {
    /// Create a new snapshot stamped with the current time
    pub fn new(games: Vec<Game>, judges: Vec<Judge>, votes: Vec<Vote>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            exported_at: chrono::Utc::now().to_rfc3339(),
            games,
            judges,
            votes,
        }
    }

    /// An empty snapshot at the current schema version
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Validate the snapshot before loading it.
    ///
    /// Dangling vote references are accepted: deleting a game or judge
    /// leaves its votes behind, so a faithful snapshot may contain them.
    pub fn validate(&self) -> StoreResult<()> {
        if self.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(StoreError::InvalidSnapshot(format!(
                "schema version {} is newer than supported version {}",
                self.schema_version, SNAPSHOT_SCHEMA_VERSION
            )));
        }

        check_unique_ids("game", self.games.iter().map(|g| g.id.as_str()))?;
        check_unique_ids("judge", self.judges.iter().map(|j| j.id.as_str()))?;
        check_unique_ids("vote", self.votes.iter().map(|v| v.id.as_str()))?;

        let mut pairs = HashSet::new();
        for vote in &self.votes {
            if !vote.criteria.in_range() {
                return Err(StoreError::InvalidSnapshot(format!(
                    "vote '{}' has a criterion outside {}..={}",
                    vote.id, MIN_CRITERION, MAX_CRITERION
                )));
            }
            if !pairs.insert((vote.judge_id.as_str(), vote.game_id.as_str())) {
                return Err(StoreError::InvalidSnapshot(format!(
                    "judge '{}' has more than one vote for game '{}'",
                    vote.judge_id, vote.game_id
                )));
            }
        }

        Ok(())
    }
}

fn check_unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(StoreError::InvalidSnapshot(format!("{} with empty id", kind)));
        }
        if !seen.insert(id) {
            return Err(StoreError::InvalidSnapshot(format!(
                "duplicate {} id '{}'",
                kind, id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(id: &str, judge: &str, game: &str, value: u8) -> Vote {
        Vote {
            id: id.to_string(),
            judge_id: judge.to_string(),
            game_id: game.to_string(),
            criteria: Criteria {
                gameplay: value,
                art: value,
                sound: value,
                thematic_fit: value,
            },
        }
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        let snapshot = StoreSnapshot::empty();
        assert_eq!(snapshot.schema_version, SNAPSHOT_SCHEMA_VERSION);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_rejects_newer_schema() {
        let mut snapshot = StoreSnapshot::empty();
        snapshot.schema_version = SNAPSHOT_SCHEMA_VERSION + 1;
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_rejects_duplicate_pair() {
        let snapshot = StoreSnapshot::new(
            vec![],
            vec![],
            vec![vote("v1", "j1", "g1", 5), vote("v2", "j1", "g1", 6)],
        );
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("more than one vote"));
    }

    #[test]
    fn test_rejects_out_of_range_criteria() {
        let snapshot = StoreSnapshot::new(vec![], vec![], vec![vote("v1", "j1", "g1", 11)]);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let judge = Judge {
            id: "j1".to_string(),
            name: "J1".to_string(),
        };
        let snapshot = StoreSnapshot::new(vec![], vec![judge.clone(), judge], vec![]);
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate judge id"));
    }

    #[test]
    fn test_accepts_dangling_references() {
        let snapshot = StoreSnapshot::new(vec![], vec![], vec![vote("v1", "gone", "gone", 3)]);
        assert!(snapshot.validate().is_ok());
    }
}
