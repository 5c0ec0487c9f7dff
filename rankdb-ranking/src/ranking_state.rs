//! The ranking domain built on top of two [`Pom`] instances.

use std::ops::ControlFlow;

use rankdb_core::{Error, Position, Result, Score, UserEntry, UserId};

use crate::pom::Pom;

/// An inner POM is an ordered *set* of user-ids tied at one score: every
/// entry carries node weight 1 and the sentinel value `()`, so its
/// `total_weight()` is exactly its cardinality.
type UserSet = Pom<UserId, ()>;

/// An immutable snapshot of the whole ranking.
///
/// `score_to_users` is keyed by score ascending; each value is the set of
/// users tied at that score, and the *outer* node weight at that key is
/// kept equal to that set's cardinality, which is what lets
/// `score_to_users.right_weight(score)` answer "how many users rank above
/// this score" in O(log N) without descending into any inner set.
///
/// `user_to_score` is the reverse index used to look up a user's current
/// score before recomputing a position.
#[derive(Clone, Debug, Default)]
pub struct RankingState {
    score_to_users: Pom<Score, UserSet>,
    user_to_score: Pom<UserId, Score>,
}

impl RankingState {
    /// The empty ranking: no users have ever scored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `earned` points to `user_id`'s cumulative score, registering
    /// the user if this is their first contact (even with `earned == 0`).
    ///
    /// Returns a new state; `self` is left untouched. A redundant
    /// `add_score(u, 0)` on an already-registered user is a no-op that
    /// returns a state equal to `self` (checked by the caller via
    /// `PartialEq` on [`UserEntry`] observables, not `Arc` pointer
    /// identity; see the module's tests).
    pub fn add_score(&self, user_id: UserId, earned: Score) -> Result<Self> {
        let prev = self.user_to_score.get(&user_id);

        if prev.is_some() && earned == 0 {
            return Ok(self.clone());
        }

        let new_score = match prev {
            Some(p) => p.checked_add(earned).ok_or(Error::ScoreOverflow { user_id, earned })?,
            None => earned,
        };

        let mut outer = self.score_to_users.clone();

        if let Some(old_score) = prev {
            if let Some(old_set) = outer.get(&old_score) {
                let trimmed = old_set.remove(&user_id);
                outer = if trimmed.is_empty() {
                    outer.remove(&old_score)
                } else {
                    outer.put(old_score, trimmed.total_weight(), trimmed)
                };
            }
        }

        let new_set = outer.get(&new_score).unwrap_or_default().put(user_id, 1, ());
        outer = outer.put(new_score, new_set.total_weight(), new_set);

        // Node weight 0: the inner set's cardinality is already carried by
        // the outer POM's node weight at `new_score`, so this index's own
        // weight contributes nothing to rank accounting.
        let users = self.user_to_score.put(user_id, 0, new_score);

        Ok(Self { score_to_users: outer, user_to_score: users })
    }

    /// Looks up a user's current score and competition rank.
    pub fn find_user(&self, user_id: UserId) -> Option<UserEntry> {
        let score = self.user_to_score.get(&user_id)?;
        let higher = self.score_to_users.right_weight(&score).unwrap_or(0);
        Some(UserEntry { user_id, score, position: position_from_rank(higher) })
    }

    /// The top `max_users` users by score, ties broken by ascending
    /// user-id, with competition-style ranking (a tie of k users all share
    /// one position; the next distinct score resumes at `position + k`).
    ///
    /// `max_users <= 0` returns an empty list. `max_users` larger than the
    /// population returns the whole population, no padding.
    pub fn top_n(&self, max_users: i64) -> Vec<UserEntry> {
        let mut out = Vec::new();
        if max_users <= 0 {
            return out;
        }
        let limit = max_users as usize;

        self.score_to_users.for_each_reverse(|score, users, _outer_left, _outer_weight, outer_right| {
            let position = position_from_rank(outer_right);
            let mut stop = false;
            users.for_each(|user_id, _unit, _inner_left, _inner_weight, _inner_right| {
                out.push(UserEntry { user_id: *user_id, score: *score, position });
                if out.len() >= limit {
                    stop = true;
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            if stop {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        out
    }
}

fn position_from_rank(strictly_higher: u64) -> Position {
    (strictly_higher + 1) as Position
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(v: &[(UserId, Score, Position)]) -> Vec<UserEntry> {
        v.iter().map(|&(user_id, score, position)| UserEntry { user_id, score, position }).collect()
    }

    #[test]
    fn empty_state_has_no_users() {
        let rs = RankingState::new();
        assert_eq!(rs.find_user(1), None);
        assert_eq!(rs.top_n(10), Vec::new());
        assert_eq!(rs.top_n(0), Vec::new());
        assert_eq!(rs.top_n(-5), Vec::new());
    }

    #[test]
    fn scenario_basic_scoreboard() {
        let rs = RankingState::new()
            .add_score(555, 70).unwrap()
            .add_score(777, 80).unwrap()
            .add_score(555, 90).unwrap()
            .add_score(888, 80).unwrap()
            .add_score(333, 20).unwrap();

        assert_eq!(rs.top_n(1000), entries(&[(555, 160, 1), (777, 80, 2), (888, 80, 2), (333, 20, 4)]));
        assert_eq!(rs.find_user(777), Some(UserEntry { user_id: 777, score: 80, position: 2 }));
        assert_eq!(rs.find_user(9999), None);
    }

    #[test]
    fn scenario_three_way_tie() {
        let rs = RankingState::new().add_score(1, 50).unwrap().add_score(2, 50).unwrap().add_score(3, 50).unwrap();
        assert_eq!(rs.top_n(10), entries(&[(1, 50, 1), (2, 50, 1), (3, 50, 1)]));
    }

    #[test]
    fn scenario_zero_score_first_contact_is_registered() {
        let rs = RankingState::new().add_score(10, 0).unwrap();
        assert_eq!(rs.top_n(10), entries(&[(10, 0, 1)]));
        assert_eq!(rs.find_user(10), Some(UserEntry { user_id: 10, score: 0, position: 1 }));
    }

    #[test]
    fn scenario_zero_add_is_idempotent() {
        let a = RankingState::new().add_score(1, 100).unwrap();
        let b = a.add_score(1, 0).unwrap();
        assert_eq!(a.top_n(10), b.top_n(10));
        assert_eq!(a.find_user(1), b.find_user(1));
    }

    #[test]
    fn scenario_descending_ids_and_scores() {
        let mut rs = RankingState::new();
        for user_id in 1..=20u64 {
            rs = rs.add_score(user_id, user_id).unwrap();
        }
        assert_eq!(rs.top_n(5), entries(&[(20, 20, 1), (19, 19, 2), (18, 18, 3), (17, 17, 4), (16, 16, 5)]));
        assert_eq!(rs.find_user(10), Some(UserEntry { user_id: 10, score: 10, position: 11 }));
    }

    #[test]
    fn additivity_law() {
        let direct = RankingState::new().add_score(9, 7).unwrap().add_score(9, 13).unwrap();
        let combined = RankingState::new().add_score(9, 20).unwrap();
        assert_eq!(direct.top_n(10), combined.top_n(10));
        assert_eq!(direct.find_user(9), combined.find_user(9));
    }

    #[test]
    fn repeated_zero_adds_never_inflate_position() {
        let mut rs = RankingState::new().add_score(1, 10).unwrap().add_score(2, 20).unwrap();
        for _ in 0..50 {
            rs = rs.add_score(1, 0).unwrap();
        }
        assert_eq!(rs.find_user(1), Some(UserEntry { user_id: 1, score: 10, position: 2 }));
    }

    #[test]
    fn top_n_exceeding_population_returns_everyone_once() {
        let rs = RankingState::new().add_score(1, 1).unwrap().add_score(2, 2).unwrap();
        assert_eq!(rs.top_n(1_000_000).len(), 2);
    }

    #[test]
    fn score_overflow_is_rejected_and_state_is_untouched() {
        let rs = RankingState::new().add_score(1, u64::MAX).unwrap();
        let err = rs.add_score(1, 1).unwrap_err();
        assert_eq!(err, Error::ScoreOverflow { user_id: 1, earned: 1 });
        // State is untouched: the user's score is still u64::MAX.
        assert_eq!(rs.find_user(1).unwrap().score, u64::MAX);
    }

    #[test]
    fn top_n_truncates_at_the_highscorelist_cap() {
        // Stands in for driving 20,001 real HTTP requests: the server's
        // `/highscorelist` cap is just `top_n(20_000)`, so this exercises
        // the same truncation at the level that actually performs it.
        const CAP: i64 = 20_000;
        let mut rs = RankingState::new();
        for user_id in 0..(CAP as u64 + 1) {
            rs = rs.add_score(user_id, user_id).unwrap();
        }
        let top = rs.top_n(CAP);
        assert_eq!(top.len(), CAP as usize);
        // Highest-scoring user (id == CAP, score == CAP) leads; the
        // lowest-scoring user (id 0) is the one truncation drops.
        assert_eq!(top.first().unwrap().user_id, CAP as u64);
        assert!(top.iter().all(|e| e.user_id != 0));
    }

    #[test]
    fn round_trip_position_matches_strict_higher_count() {
        let mut rs = RankingState::new();
        for (user_id, score) in [(1, 30), (2, 90), (3, 10), (4, 90), (5, 50)] {
            rs = rs.add_score(user_id, score).unwrap();
        }
        let all = rs.top_n(100);
        for entry in &all {
            let higher = all.iter().filter(|e| e.score > entry.score).count() as u64;
            assert_eq!(entry.position, (higher + 1) as Position);
        }
    }
}
