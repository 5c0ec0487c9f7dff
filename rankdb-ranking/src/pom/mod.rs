//! Persistent Weighted Ordered Map (POM)
//!
//! An immutable, self-balancing (AVL) ordered map that supports:
//!
//! - point query, insert/replace, and delete, each O(log N) and each
//!   returning a new map that shares every untouched subtree with the old
//!   one (structural sharing via `Arc`);
//! - O(1) total weight and O(log N) rank-style `left_weight`/`right_weight`
//!   queries, backed by a node weight cached per-subtree;
//! - O(N) in-order/reverse-in-order traversal with whole-tree cumulative
//!   weight accounting, stoppable early by the visitor.
//!
//! This is the data structure [`crate::ranking_state::RankingState`] is
//! built from; nothing in this module knows about users, scores, or
//! rankings.

mod node;
mod tree;

pub use tree::Pom;
