use super::{require_id, AppState};
use crate::error::AppResult;
use crate::types::*;

/// Summed score: all four criteria of every vote added together.
/// Zero votes yield 0.
pub fn sum_score(votes: &[Vote]) -> u32 {
    votes.iter().map(|v| v.criteria.total()).sum()
}

/// Per-criterion arithmetic mean. Zero votes yield all zeros.
pub fn average_scores(votes: &[Vote]) -> AverageScores {
    if votes.is_empty() {
        return AverageScores::default();
    }

    let mut sums = [0u32; 4];
    for vote in votes {
        let c = &vote.criteria;
        sums[0] += u32::from(c.gameplay);
        sums[1] += u32::from(c.art);
        sums[2] += u32::from(c.sound);
        sums[3] += u32::from(c.thematic_fit);
    }

    let count = votes.len() as f64;
    AverageScores {
        gameplay: f64::from(sums[0]) / count,
        art: f64::from(sums[1]) / count,
        sound: f64::from(sums[2]) / count,
        thematic_fit: f64::from(sums[3]) / count,
    }
}

impl AppState {
    /// Summed score of a single game
    pub async fn total_score(&self, game_id: &str) -> AppResult<u32> {
        let game = self.find_game(require_id(game_id)?).await?;
        let votes = self.store.votes_for_game(&game.id).await?;
        Ok(sum_score(&votes))
    }

    /// Per-criterion averages of a single game
    pub async fn average_score(&self, game_id: &str) -> AppResult<GameAverage> {
        let game = self.find_game(require_id(game_id)?).await?;
        let votes = self.store.votes_for_game(&game.id).await?;
        Ok(GameAverage {
            game,
            average_scores: average_scores(&votes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn vote(values: [u8; 4]) -> Vote {
        Vote {
            id: ulid::Ulid::new().to_string(),
            judge_id: ulid::Ulid::new().to_string(),
            game_id: "g1".to_string(),
            criteria: Criteria {
                gameplay: values[0],
                art: values[1],
                sound: values[2],
                thematic_fit: values[3],
            },
        }
    }

    #[test]
    fn test_no_votes_scores_zero() {
        assert_eq!(sum_score(&[]), 0);
        let avg = average_scores(&[]);
        assert_eq!(avg, AverageScores::default());
        assert_eq!(avg.gameplay, 0.0);
        assert!(!avg.thematic_fit.is_nan());
    }

    #[test]
    fn test_sum_score() {
        let votes = vec![vote([8, 7, 6, 9]), vote([1, 2, 3, 4])];
        assert_eq!(sum_score(&votes), 40);
    }

    #[test]
    fn test_average_scores() {
        let votes = vec![vote([2, 2, 2, 2]), vote([4, 4, 4, 4])];
        let avg = average_scores(&votes);
        assert_eq!(avg.gameplay, 3.0);
        assert_eq!(avg.art, 3.0);
        assert_eq!(avg.sound, 3.0);
        assert_eq!(avg.thematic_fit, 3.0);
    }

    #[test]
    fn test_average_is_not_rounded() {
        let votes = vec![vote([1, 1, 1, 1]), vote([2, 2, 2, 2])];
        assert_eq!(average_scores(&votes).art, 1.5);

        let votes = vec![vote([1, 1, 1, 1]), vote([1, 1, 1, 1]), vote([2, 1, 1, 1])];
        let avg = average_scores(&votes).gameplay;
        assert!((avg - 4.0 / 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_scores_for_unknown_game() {
        let state = AppState::in_memory();
        assert!(matches!(
            state.total_score("missing").await,
            Err(AppError::NotFound("game"))
        ));
        assert!(matches!(
            state.average_score("missing").await,
            Err(AppError::NotFound("game"))
        ));
    }

    #[tokio::test]
    async fn test_scores_for_game_without_votes() {
        let state = AppState::in_memory();
        let game = state
            .create_game(NewGame {
                name: Some("Quiet".to_string()),
                genre: Some("Puzzle".to_string()),
                members: vec![],
                edition: Some("2024".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(state.total_score(&game.id).await.unwrap(), 0);
        let average = state.average_score(&game.id).await.unwrap();
        assert_eq!(average.game, game);
        assert_eq!(average.average_scores, AverageScores::default());
    }
}
