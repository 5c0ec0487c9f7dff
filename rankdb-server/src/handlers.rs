//! Request handlers for the three logical operations the ranking engine
//! exposes. Each handler calls exactly one [`rankdb_ranking::RankingCell`]
//! method and never touches POM/RankingState internals directly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::app::AppState;
use crate::dto::{HighScoreEntry, HighScoreListResponse, PositionResponse, ScoreRequest};
use crate::extract::StrictJson;

/// `GET /highscorelist` is capped at this many entries, per the HTTP
/// surface contract.
const HIGHSCORE_LIST_CAP: i64 = 20_000;

pub async fn submit_score(
    State(state): State<AppState>,
    StrictJson(body): StrictJson<ScoreRequest>,
) -> Response {
    match state.cell.add(body.user_id, body.points) {
        Ok(()) => {
            log::info!("POST /score userId={} points={} -> 200", body.user_id, body.points);
            StatusCode::OK.into_response()
        }
        Err(err) => {
            log::warn!("POST /score userId={} points={} -> 500: {err}", body.user_id, body.points);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

pub async fn get_position(State(state): State<AppState>, Path(raw_user_id): Path<String>) -> Response {
    let Ok(user_id) = raw_user_id.parse::<u64>() else {
        log::warn!("GET /score/{raw_user_id}/position -> 404: userId is not a parseable integer");
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.cell.find(user_id) {
        Some(entry) => {
            log::info!("GET /score/{user_id}/position -> 200 points={} position={}", entry.score, entry.position);
            Json(PositionResponse::from(entry)).into_response()
        }
        None => {
            log::info!("GET /score/{user_id}/position -> 200 (absent)");
            StatusCode::OK.into_response()
        }
    }
}

pub async fn get_highscorelist(State(state): State<AppState>) -> Response {
    let highscores: Vec<HighScoreEntry> =
        state.cell.top(HIGHSCORE_LIST_CAP).into_iter().map(HighScoreEntry::from).collect();
    log::info!("GET /highscorelist -> 200 entries={}", highscores.len());
    Json(HighScoreListResponse { highscores }).into_response()
}
