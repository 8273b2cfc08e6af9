mod export;
mod game;
mod judge;
mod ranking;
mod score;
mod vote;

pub use score::{average_scores, sum_score};
pub use vote::validate_submission;

use crate::error::{AppError, AppResult};
use crate::store::{EntityStore, MemoryStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Injected entity store, opened before the server starts
    pub store: Arc<dyn EntityStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// State backed by a fresh, non-persistent store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// A required, non-blank text field
fn require_text(field: &str, value: Option<String>) -> AppResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

/// An optional text field that must not be blank when provided
fn optional_text(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    value.map(|v| require_text(field, Some(v))).transpose()
}

/// A non-blank identifier, trimmed
fn require_id(id: &str) -> AppResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::Validation("id is required".to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(
            require_text("name", Some("  Pong ".to_string())).unwrap(),
            "Pong"
        );
        assert!(require_text("name", Some("   ".to_string())).is_err());
        let err = require_text("name", None).unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("genre", None).unwrap(), None);
        assert_eq!(
            optional_text("genre", Some("RPG".to_string())).unwrap(),
            Some("RPG".to_string())
        );
        assert!(optional_text("genre", Some(String::new())).is_err());
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(" abc ").unwrap(), "abc");
        assert!(matches!(require_id(""), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_default_state_is_empty() {
        let state = AppState::default();
        assert!(state.list_games().await.unwrap().is_empty());
        assert!(state.list_judges().await.unwrap().is_empty());
        assert!(state.list_votes().await.unwrap().is_empty());
    }
}
