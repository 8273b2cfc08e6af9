use super::score::sum_score;
use super::AppState;
use crate::error::{AppError, AppResult};
use crate::types::*;

impl AppState {
    /// Games of an edition ordered by summed score, highest first.
    ///
    /// Ties keep the order in which the store returned the games
    /// (registration order).
    pub async fn rank_edition(&self, edition: &str) -> AppResult<Vec<RankedGame>> {
        let edition = edition.trim();
        if edition.is_empty() {
            return Err(AppError::Validation("edition is required".to_string()));
        }

        let games = self.store.games_by_edition(edition).await?;

        let store = &self.store;
        let scores = futures::future::try_join_all(games.iter().map(|game| async move {
            let votes = store.votes_for_game(&game.id).await?;
            Ok::<_, AppError>(sum_score(&votes))
        }))
        .await?;

        let mut ranked: Vec<RankedGame> = games
            .into_iter()
            .zip(scores)
            .map(|(game, score)| RankedGame { game, score })
            .collect();

        // Stable sort keeps retrieval order among equal scores
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!("Ranked {} games for edition {}", ranked.len(), edition);
        Ok(ranked)
    }
}
