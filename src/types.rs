use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type GameId = String;
pub type JudgeId = String;
pub type VoteId = String;

/// Inclusive bounds for every criterion score
pub const MIN_CRITERION: u8 = 1;
pub const MAX_CRITERION: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub genre: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub edition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Judge {
    pub id: JudgeId,
    pub name: String,
}

/// The four evaluation axes of a vote, each in 1..=10
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Criteria {
    pub gameplay: u8,
    pub art: u8,
    pub sound: u8,
    pub thematic_fit: u8,
}

impl Criteria {
    /// Sum of all four criteria
    pub fn total(&self) -> u32 {
        u32::from(self.gameplay)
            + u32::from(self.art)
            + u32::from(self.sound)
            + u32::from(self.thematic_fit)
    }

    /// Whether every criterion lies in the allowed range
    pub fn in_range(&self) -> bool {
        [self.gameplay, self.art, self.sound, self.thematic_fit]
            .iter()
            .all(|v| (MIN_CRITERION..=MAX_CRITERION).contains(v))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    pub id: VoteId,
    pub judge_id: JudgeId,
    pub game_id: GameId,
    #[serde(flatten)]
    pub criteria: Criteria,
}

// ========== Inputs ==========

/// Body of a game registration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGame {
    pub name: Option<String>,
    pub genre: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    pub edition: Option<String>,
}

/// Partial game update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameUpdate {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub members: Option<Vec<String>>,
    pub edition: Option<String>,
}

impl GameUpdate {
    /// Apply the provided fields onto an existing game
    pub fn apply(self, game: &mut Game) {
        if let Some(name) = self.name {
            game.name = name;
        }
        if let Some(genre) = self.genre {
            game.genre = genre;
        }
        if let Some(members) = self.members {
            game.members = members;
        }
        if let Some(edition) = self.edition {
            game.edition = edition;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewJudge {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JudgeUpdate {
    pub name: Option<String>,
}

/// Raw vote submission as received over HTTP.
///
/// Every field is optional so that missing values surface as validation
/// errors instead of deserialization failures. Criteria are taken as `i64`
/// so out-of-range numbers (0, 11, negatives) reach the range check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteSubmission {
    pub judge_id: Option<String>,
    pub game_id: Option<String>,
    pub gameplay: Option<i64>,
    pub art: Option<i64>,
    pub sound: Option<i64>,
    pub thematic_fit: Option<i64>,
}

/// A vote that passed field validation and awaits reference checks
#[derive(Debug, Clone, PartialEq)]
pub struct NewVote {
    pub judge_id: JudgeId,
    pub game_id: GameId,
    pub criteria: Criteria,
}

// ========== Projections ==========

/// Per-criterion arithmetic mean across a game's votes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AverageScores {
    pub gameplay: f64,
    pub art: f64,
    pub sound: f64,
    pub thematic_fit: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameAverage {
    pub game: Game,
    pub average_scores: AverageScores,
}

/// A game together with its summed score, as listed in a ranking
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedGame {
    #[serde(flatten)]
    pub game: Game,
    pub score: u32,
}

/// One judge's vote as seen from the game's side
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JudgeVoteView {
    /// None when the judge has been deleted since voting
    pub judge_name: Option<String>,
    #[serde(flatten)]
    pub criteria: Criteria,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameVotes {
    pub game_name: String,
    pub votes: Vec<JudgeVoteView>,
}

/// One vote as seen from the judge's side
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameVoteView {
    pub id: VoteId,
    pub game_id: GameId,
    /// None when the game has been deleted since voting
    pub game_name: Option<String>,
    #[serde(flatten)]
    pub criteria: Criteria,
}

/// Id and display name of a referenced entity
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

/// A vote with both references resolved
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VoteDetail {
    pub id: VoteId,
    pub judge_id: JudgeId,
    pub game_id: GameId,
    pub judge: Option<EntityRef>,
    pub game: Option<EntityRef>,
    #[serde(flatten)]
    pub criteria: Criteria,
}
