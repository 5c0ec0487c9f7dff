//! Core domain types used throughout RankDB

use serde::{Deserialize, Serialize};

/// Unique identifier of a user. Never negative; zero is a valid id.
pub type UserId = u64;

/// A user's cumulative point total. Never negative; addition is checked,
/// not wrapping (see [`crate::Error::ScoreOverflow`]).
pub type Score = u64;

/// A 1-based rank, where 1 is the highest score. Wide enough to hold any
/// population this engine could plausibly hold in memory.
pub type Position = u32;

/// A single row of a ranking query: who, their score, and their rank.
///
/// Returned by both `RankingState::find_user` and `RankingState::top_n`
/// in the `rankdb-ranking` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub user_id: UserId,
    pub score: Score,
    pub position: Position,
}
