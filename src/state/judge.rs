use super::{require_id, require_text, AppState};
use crate::error::{AppError, AppResult};
use crate::types::*;

impl AppState {
    pub async fn list_judges(&self) -> AppResult<Vec<Judge>> {
        Ok(self.store.list_judges().await?)
    }

    /// Register a new judge
    pub async fn create_judge(&self, new_judge: NewJudge) -> AppResult<Judge> {
        let judge = Judge {
            id: ulid::Ulid::new().to_string(),
            name: require_text("name", new_judge.name)?,
        };

        self.store.insert_judge(judge.clone()).await?;
        tracing::info!("Created judge {} ({})", judge.name, judge.id);
        Ok(judge)
    }

    /// Rename a judge
    pub async fn update_judge(&self, id: &str, update: JudgeUpdate) -> AppResult<Judge> {
        let id = require_id(id)?;
        let name = require_text("name", update.name)?;

        let judge = self
            .store
            .rename_judge(id, name)
            .await?
            .ok_or(AppError::NotFound("judge"))?;
        tracing::info!("Updated judge {}", id);
        Ok(judge)
    }

    /// Delete a judge. Votes cast by the judge are kept.
    pub async fn delete_judge(&self, id: &str) -> AppResult<()> {
        let id = require_id(id)?;
        if !self.store.delete_judge(id).await? {
            return Err(AppError::NotFound("judge"));
        }
        tracing::info!("Deleted judge {}", id);
        Ok(())
    }

    /// Every vote cast by a judge, joined with the game's name.
    ///
    /// An unknown judge simply has no votes.
    pub async fn votes_for_judge(&self, judge_id: &str) -> AppResult<Vec<GameVoteView>> {
        let judge_id = require_id(judge_id)?;
        let votes = self.store.votes_for_judge(judge_id).await?;

        let mut views = Vec::with_capacity(votes.len());
        for vote in votes {
            let game_name = self.store.get_game(&vote.game_id).await?.map(|g| g.name);
            views.push(GameVoteView {
                id: vote.id,
                game_id: vote.game_id,
                game_name,
                criteria: vote.criteria,
            });
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> NewJudge {
        NewJudge {
            name: Some(name.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_judge() {
        let state = AppState::in_memory();
        let judge = state.create_judge(named("J1")).await.unwrap();

        assert_eq!(judge.name, "J1");
        assert_eq!(state.list_judges().await.unwrap(), vec![judge]);
    }

    #[tokio::test]
    async fn test_create_judge_requires_name() {
        let state = AppState::in_memory();
        let result = state.create_judge(NewJudge { name: None }).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_judge() {
        let state = AppState::in_memory();
        let judge = state.create_judge(named("J1")).await.unwrap();

        let renamed = state
            .update_judge(
                &judge.id,
                JudgeUpdate {
                    name: Some("Judy".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Judy");
        assert_eq!(renamed.id, judge.id);
    }

    #[tokio::test]
    async fn test_update_judge_requires_name() {
        let state = AppState::in_memory();
        let judge = state.create_judge(named("J1")).await.unwrap();

        let result = state
            .update_judge(&judge.id, JudgeUpdate { name: None })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_judge() {
        let state = AppState::in_memory();
        let judge = state.create_judge(named("J1")).await.unwrap();

        state.delete_judge(&judge.id).await.unwrap();
        assert!(state.list_judges().await.unwrap().is_empty());

        let result = state.delete_judge(&judge.id).await;
        assert!(matches!(result, Err(AppError::NotFound("judge"))));
    }

    #[tokio::test]
    async fn test_votes_for_judge_requires_id() {
        let state = AppState::in_memory();
        let result = state.votes_for_judge("").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_votes_for_unknown_judge_is_empty() {
        let state = AppState::in_memory();
        assert!(state.votes_for_judge("nobody").await.unwrap().is_empty());
    }
}
