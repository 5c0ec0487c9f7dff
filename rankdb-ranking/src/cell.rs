//! The Concurrent Ranking Cell: a single shared [`RankingState`] reference,
//! mutated by read-modify-write under a mutex and read without blocking
//! other readers.

use std::sync::Arc;

use parking_lot::Mutex;
use rankdb_core::{Result, Score, UserEntry, UserId};

use crate::ranking_state::RankingState;

/// Process-wide holder of the current ranking snapshot.
///
/// A reader locks the mutex only long enough to clone the `Arc<RankingState>`
/// (an O(1) refcount bump), then releases it before touching the snapshot,
/// so readers never block behind tree traversal, only behind the brief
/// pointer copy of another reader or writer. A writer locks, computes the
/// new state from the old one (which may itself take O(log N) work), stores
/// the new `Arc`, and unlocks. The mutex is exactly the "exclusive section"
/// that publishes the new node graph with the fences a reader needs to see
/// it fully constructed.
pub struct RankingCell {
    state: Mutex<Arc<RankingState>>,
}

impl Default for RankingCell {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingCell {
    /// A cell holding the empty ranking.
    pub fn new() -> Self {
        Self { state: Mutex::new(Arc::new(RankingState::new())) }
    }

    /// Adds `earned` points to `user_id`. Linearizes against every other
    /// `add` on this cell in lock-acquisition order.
    pub fn add(&self, user_id: UserId, earned: Score) -> Result<()> {
        let mut guard = self.state.lock();
        let current = guard.clone();
        let updated = current.add_score(user_id, earned)?;
        *guard = Arc::new(updated);
        Ok(())
    }

    /// Looks up a user against the current snapshot.
    pub fn find(&self, user_id: UserId) -> Option<UserEntry> {
        self.snapshot().find_user(user_id)
    }

    /// The top `max_users` against the current snapshot.
    pub fn top(&self, max_users: i64) -> Vec<UserEntry> {
        self.snapshot().top_n(max_users)
    }

    /// Takes a point-in-time snapshot reference without blocking any other
    /// reader. Held only long enough to bump the `Arc`'s refcount.
    fn snapshot(&self) -> Arc<RankingState> {
        self.state.lock().clone()
    }
}
