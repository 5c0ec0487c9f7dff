//! HTTP/JSON front-end for the RankDB ranking engine.
//!
//! This crate is deliberately thin: it only ever calls
//! [`rankdb_ranking::RankingCell::add`], `::find`, and `::top`. All of the
//! interesting behavior (the persistent ordered map, the ranking domain,
//! the concurrency discipline) lives in `rankdb-ranking`. What's here is
//! strict JSON (de)serialization, routing, configuration, and logging.

pub mod app;
pub mod config;
pub mod dto;
pub mod extract;
pub mod handlers;

pub use app::{build_router, AppState};
pub use config::ServerConfig;
