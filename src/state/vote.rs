use super::{require_id, AppState};
use crate::error::{AppError, AppResult};
use crate::store::StoreError;
use crate::types::*;

/// Check presence and range of every field of a vote submission
pub fn validate_submission(submission: VoteSubmission) -> AppResult<NewVote> {
    let judge_id = required_ref("judge_id", submission.judge_id)?;
    let game_id = required_ref("game_id", submission.game_id)?;

    let criteria = Criteria {
        gameplay: criterion("gameplay", submission.gameplay)?,
        art: criterion("art", submission.art)?,
        sound: criterion("sound", submission.sound)?,
        thematic_fit: criterion("thematic_fit", submission.thematic_fit)?,
    };

    Ok(NewVote {
        judge_id,
        game_id,
        criteria,
    })
}

fn required_ref(field: &str, value: Option<String>) -> AppResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn criterion(field: &str, value: Option<i64>) -> AppResult<u8> {
    let value = value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    u8::try_from(value)
        .ok()
        .filter(|v| (MIN_CRITERION..=MAX_CRITERION).contains(v))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field, MIN_CRITERION, MAX_CRITERION, value
            ))
        })
}

impl AppState {
    pub async fn list_votes(&self) -> AppResult<Vec<Vote>> {
        Ok(self.store.list_votes().await?)
    }

    /// Validate and record a judge's vote for a game.
    ///
    /// Checks run in order: fields, duplicate pair, judge, game. The final
    /// insert is atomic on the (judge, game) pair, so a concurrent duplicate
    /// that slipped past the first check is still rejected.
    pub async fn submit_vote(&self, submission: VoteSubmission) -> AppResult<Vote> {
        let new_vote = validate_submission(submission)?;

        if self
            .store
            .find_vote(&new_vote.judge_id, &new_vote.game_id)
            .await?
            .is_some()
        {
            tracing::warn!(
                "Duplicate vote rejected: judge {} already voted for game {}",
                new_vote.judge_id,
                new_vote.game_id
            );
            return Err(AppError::DuplicateVote);
        }

        if self.store.get_judge(&new_vote.judge_id).await?.is_none() {
            return Err(AppError::NotFound("judge"));
        }
        if self.store.get_game(&new_vote.game_id).await?.is_none() {
            return Err(AppError::NotFound("game"));
        }

        let vote = Vote {
            id: ulid::Ulid::new().to_string(),
            judge_id: new_vote.judge_id,
            game_id: new_vote.game_id,
            criteria: new_vote.criteria,
        };

        match self.store.insert_vote(vote.clone()).await {
            Ok(()) => {}
            Err(StoreError::Conflict(key)) => {
                tracing::warn!("Duplicate vote lost insert race: {}", key);
                return Err(AppError::DuplicateVote);
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            "Judge {} voted {} for game {}",
            vote.judge_id,
            vote.criteria.total(),
            vote.game_id
        );
        Ok(vote)
    }

    /// A single vote with judge and game resolved.
    ///
    /// References to deleted entities resolve to None.
    pub async fn get_vote(&self, id: &str) -> AppResult<VoteDetail> {
        let id = require_id(id)?;
        let vote = self
            .store
            .get_vote(id)
            .await?
            .ok_or(AppError::NotFound("vote"))?;

        let judge = self.store.get_judge(&vote.judge_id).await?.map(|j| EntityRef {
            id: j.id,
            name: j.name,
        });
        let game = self.store.get_game(&vote.game_id).await?.map(|g| EntityRef {
            id: g.id,
            name: g.name,
        });

        Ok(VoteDetail {
            id: vote.id,
            judge_id: vote.judge_id,
            game_id: vote.game_id,
            judge,
            game,
            criteria: vote.criteria,
        })
    }
}
