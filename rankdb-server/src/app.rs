//! Wires the handlers together into an `axum::Router`, independent of how
//! (or whether) the process actually binds a socket. Kept separate from
//! `main` so integration tests can drive the router in-process.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use rankdb_ranking::RankingCell;

use crate::handlers::{get_highscorelist, get_position, submit_score};

/// Shared, cheaply-cloneable application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub cell: Arc<RankingCell>,
}

impl AppState {
    pub fn new() -> Self {
        Self { cell: Arc::new(RankingCell::new()) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the router for a given [`AppState`]. A fresh `AppState::new()`
/// gives every caller (the real binary, or a test) an independent,
/// isolated ranking engine.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/score", post(submit_score))
        .route("/score/:user_id/position", get(get_position))
        .route("/highscorelist", get(get_highscorelist))
        .with_state(state)
}
