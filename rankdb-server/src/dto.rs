//! Wire types for the HTTP surface.
//!
//! Strictness (reject unknown fields, missing fields, null-for-primitive,
//! duplicate keys, and out-of-range/negative numbers) is structural: every
//! request type derives `Deserialize` with `#[serde(deny_unknown_fields)]`
//! over unsigned integer wire types, so the generated visitor already
//! refuses everything the boundary needs to refuse without any hand-rolled
//! parsing.

use rankdb_core::{Position, Score, UserEntry, UserId};
use serde::{Deserialize, Serialize};

/// Body of `POST /score`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub points: Score,
}

/// Body of a successful `GET /score/{userId}/position`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub user_id: UserId,
    pub points: Score,
    pub position: Position,
}

impl From<UserEntry> for PositionResponse {
    fn from(entry: UserEntry) -> Self {
        Self { user_id: entry.user_id, points: entry.score, position: entry.position }
    }
}

/// One row of `GET /highscorelist`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub user_id: UserId,
    pub points: Score,
    pub position: Position,
}

impl From<UserEntry> for HighScoreEntry {
    fn from(entry: UserEntry) -> Self {
        Self { user_id: entry.user_id, points: entry.score, position: entry.position }
    }
}

/// Body of `GET /highscorelist`.
#[derive(Debug, Serialize)]
pub struct HighScoreListResponse {
    pub highscores: Vec<HighScoreEntry>,
}
