//! Error types for RankDB
//!
//! This module defines the error types used throughout the ranking engine.
//! Validation failures (malformed requests, unparsable path parameters) are
//! the transport crate's concern and never reach these types; by the time a
//! `UserId`/`Score` value exists, the wire-level checks have already run.

use thiserror::Error;

use crate::types::{Score, UserId};

/// The main error type for ranking engine operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Adding `earned` points to `user_id` would overflow the `Score` domain
    #[error("adding {earned} points to user {user_id} would overflow its score")]
    ScoreOverflow { user_id: UserId, earned: Score },
}

/// A specialized Result type for ranking engine operations
pub type Result<T> = std::result::Result<T, Error>;
