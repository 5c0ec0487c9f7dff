//! Core types and error handling for RankDB
//!
//! This crate contains the fundamental types shared by the ranking engine
//! and its transport layer. It provides:
//!
//! - Common error types with [`Error`] and [`Result`]
//! - The domain's scalar types: [`UserId`], [`Score`], [`Position`]
//! - [`UserEntry`], the shape returned by every ranking query
//!
//! # Example
//!
//! ```
//! use rankdb_core::{UserId, Score, UserEntry};
//!
//! let user_id: UserId = 555;
//! let score: Score = 160;
//! let entry = UserEntry { user_id, score, position: 1 };
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
