//! The concurrent ranked-score engine.
//!
//! Three layers, leaves first:
//!
//! - [`pom`]: the Persistent Weighted Ordered Map, an immutable,
//!   self-balancing ordered map with cached subtree weights.
//! - [`ranking_state`]: [`RankingState`], the pair of POMs (`score→users`,
//!   `user→score`) that implement the ranking domain (`add_score`,
//!   `find_user`, `top_n`).
//! - [`cell`]: [`RankingCell`], the process-wide, thread-safe holder of
//!   the current `RankingState`.
//!
//! Everything above the POM is a pure value; the only mutable, shared state
//! in the whole crate is the single reference inside [`RankingCell`].

pub mod cell;
pub mod pom;
pub mod ranking_state;

pub use cell::RankingCell;
pub use pom::Pom;
pub use ranking_state::RankingState;
