use super::{optional_text, require_id, require_text, AppState};
use crate::error::{AppError, AppResult};
use crate::types::*;

impl AppState {
    /// All registered games
    pub async fn list_games(&self) -> AppResult<Vec<Game>> {
        Ok(self.store.list_games().await?)
    }

    /// Look up a game, failing with NotFound if it does not exist
    pub async fn find_game(&self, id: &str) -> AppResult<Game> {
        self.store
            .get_game(id)
            .await?
            .ok_or(AppError::NotFound("game"))
    }

    /// Register a new game
    pub async fn create_game(&self, new_game: NewGame) -> AppResult<Game> {
        let game = Game {
            id: ulid::Ulid::new().to_string(),
            name: require_text("name", new_game.name)?,
            genre: require_text("genre", new_game.genre)?,
            members: new_game.members,
            edition: require_text("edition", new_game.edition)?,
        };

        self.store.insert_game(game.clone()).await?;
        tracing::info!("Created game {} ({})", game.name, game.id);
        Ok(game)
    }

    /// Apply a partial update to a game
    pub async fn update_game(&self, id: &str, update: GameUpdate) -> AppResult<Game> {
        let id = require_id(id)?;
        let update = GameUpdate {
            name: optional_text("name", update.name)?,
            genre: optional_text("genre", update.genre)?,
            members: update.members,
            edition: optional_text("edition", update.edition)?,
        };

        let game = self
            .store
            .update_game(id, update)
            .await?
            .ok_or(AppError::NotFound("game"))?;
        tracing::info!("Updated game {}", id);
        Ok(game)
    }

    /// Delete a game. Votes referencing it are kept.
    pub async fn delete_game(&self, id: &str) -> AppResult<()> {
        let id = require_id(id)?;
        if !self.store.delete_game(id).await? {
            return Err(AppError::NotFound("game"));
        }
        tracing::info!("Deleted game {}", id);
        Ok(())
    }

    /// Every vote for a game, joined with the voting judge's name
    pub async fn votes_for_game(&self, game_id: &str) -> AppResult<GameVotes> {
        let game = self.find_game(require_id(game_id)?).await?;
        let votes = self.store.votes_for_game(&game.id).await?;

        let mut views = Vec::with_capacity(votes.len());
        for vote in votes {
            let judge_name = self.store.get_judge(&vote.judge_id).await?.map(|j| j.name);
            views.push(JudgeVoteView {
                judge_name,
                criteria: vote.criteria,
            });
        }

        Ok(GameVotes {
            game_name: game.name,
            votes: views,
        })
    }
}
