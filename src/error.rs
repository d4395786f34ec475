use thiserror::Error;

use crate::match_state::Category;

/// Rejected match or tournament setup. Nothing is simulated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("missing player for {0}")]
    MissingPlayer(&'static str),

    #[error("missing referee")]
    MissingReferee,

    #[error("missing match category")]
    MissingCategory,

    #[error("{name} cannot play against themselves")]
    SamePlayer { name: String },

    #[error("{name} (player #{id}) is entered more than once")]
    DuplicateEntrant { name: String, id: u32 },

    #[error("first server (player #{id}) is not one of the two match participants")]
    ServerNotInMatch { id: u32 },

    #[error("{category} requires {expected} players, but {name} is not")]
    CategoryMismatch {
        category: Category,
        expected: &'static str,
        name: String,
    },

    #[error("ranking of {name} must be at least 1, got {ranking}")]
    InvalidRanking { name: String, ranking: u32 },

    #[error("ranking points cannot be negative, got {0}")]
    NegativeRankingPoints(i64),

    #[error("round level cannot be empty")]
    EmptyLevel,

    #[error("a deciding-set tiebreak cannot start before 6-6, got {0}-{0}")]
    InvalidTiebreakThreshold(u32),

    #[error("a knockout draw needs a power of two and at least 2 players, got {0}")]
    InvalidDrawSize(usize),
}

/// A scoring invariant was broken. These indicate a defect in the caller, not a runtime
/// condition to recover from.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringError {
    #[error("cannot record a point: the game is already complete")]
    GameComplete,

    #[error("cannot play a game: the set is already complete")]
    SetComplete,

    #[error("cannot play a set: the match is already complete")]
    MatchComplete,

    #[error("{0} reported completion without a winner")]
    MissingWinner(&'static str),
}
