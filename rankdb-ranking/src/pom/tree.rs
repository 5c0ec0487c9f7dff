use std::fmt;
use std::ops::ControlFlow;

use super::node::{self, Link};

/// A persistent, weight-annotated ordered map from `K` to `V`.
///
/// Every mutating method (`put`, `remove`) returns a brand new `Pom` and
/// leaves `self` untouched; unchanged subtrees are shared with the original
/// via reference counting, so a `put`/`remove` costs O(log N) allocations
/// regardless of how large the tree already is.
///
/// Besides the key and value, every entry carries a caller-chosen **node
/// weight** (a non-negative integer independent of key order). The tree
/// caches, at every node, the sum of weights over its whole subtree, which
/// is what makes [`Pom::left_weight`]/[`Pom::right_weight`]/[`Pom::total_weight`]
/// O(log N)/O(1) instead of O(N).
pub struct Pom<K, V> {
    root: Link<K, V>,
}

impl<K, V> Clone for Pom<K, V> {
    fn clone(&self) -> Self {
        Self { root: self.root.clone() }
    }
}

impl<K, V> Default for Pom<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Pom<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pom").field("total_weight", &self.total_weight()).finish()
    }
}

impl<K: Ord + Clone, V: Clone> Pom<K, V> {
    /// An empty map.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Looks up the value bound to `key`. O(log N).
    pub fn get(&self, key: &K) -> Option<V> {
        node::get(&self.root, key)
    }

    /// Binds `key` to `value` with node weight `weight`, replacing any prior
    /// binding (and its weight) for `key`. Returns a new map; `self` is
    /// unmodified. O(log N) new nodes, the rest shared with `self`.
    pub fn put(&self, key: K, weight: u64, value: V) -> Self {
        let root = node::put(&self.root, key, weight, value);
        #[cfg(debug_assertions)]
        node::assert_invariants(&root);
        Self { root }
    }

    /// Removes `key` if present. Returns a new map; `self` is unmodified.
    /// A no-op (returning an equivalent map) if `key` is absent. O(log N).
    pub fn remove(&self, key: &K) -> Self {
        let root = node::remove(&self.root, key);
        #[cfg(debug_assertions)]
        node::assert_invariants(&root);
        Self { root }
    }

    /// The sum of every node weight in the map, or 0 if empty. O(1).
    pub fn total_weight(&self) -> u64 {
        node::subtree_weight(&self.root)
    }

    /// The node weight stored at `key`, or `None` if absent. O(log N).
    pub fn node_weight(&self, key: &K) -> Option<u64> {
        node::node_weight(&self.root, key)
    }

    /// The sum of node weights over every key strictly less than `key`, or
    /// `None` if `key` is absent. O(log N).
    pub fn left_weight(&self, key: &K) -> Option<u64> {
        node::left_weight(&self.root, key)
    }

    /// The sum of node weights over every key strictly greater than `key`,
    /// or `None` if `key` is absent. O(log N).
    pub fn right_weight(&self, key: &K) -> Option<u64> {
        node::right_weight(&self.root, key)
    }

    /// Visits every entry in ascending key order.
    ///
    /// `visit` receives `(key, value, accumulated_left_weight, node_weight,
    /// accumulated_right_weight)`, where the two accumulators are totals
    /// over the *whole tree*, not the subtree being visited. Returning
    /// [`ControlFlow::Break`] stops the traversal immediately.
    pub fn for_each(&self, mut visit: impl FnMut(&K, &V, u64, u64, u64) -> ControlFlow<()>) {
        let _ = node::for_each(&self.root, 0, 0, &mut visit);
    }

    /// Like [`Pom::for_each`], but visits entries in descending key order.
    pub fn for_each_reverse(&self, mut visit: impl FnMut(&K, &V, u64, u64, u64) -> ControlFlow<()>) {
        let _ = node::for_each_reverse(&self.root, 0, 0, &mut visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn weights_sum<V>(
        entries: impl IntoIterator<Item = (i32, V)>,
    ) -> BTreeMap<i32, V> {
        entries.into_iter().collect()
    }

    #[test]
    fn empty_tree_edge_cases() {
        let pom: Pom<i32, &str> = Pom::new();
        assert!(pom.is_empty());
        assert_eq!(pom.get(&1), None);
        assert_eq!(pom.total_weight(), 0);
        assert_eq!(pom.node_weight(&1), None);
        assert_eq!(pom.left_weight(&1), None);
        assert_eq!(pom.right_weight(&1), None);
        let mut visited = 0;
        pom.for_each(|_, _, _, _, _| {
            visited += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(visited, 0);
    }

    #[test]
    fn single_node_tree() {
        let pom = Pom::new().put(5, 3, "five");
        assert_eq!(pom.get(&5), Some("five"));
        assert_eq!(pom.total_weight(), 3);
        assert_eq!(pom.node_weight(&5), Some(3));
        assert_eq!(pom.left_weight(&5), Some(0));
        assert_eq!(pom.right_weight(&5), Some(0));
    }

    #[test]
    fn put_replaces_prior_binding() {
        let pom = Pom::new().put(1, 10, "a").put(1, 20, "b");
        assert_eq!(pom.get(&1), Some("b"));
        assert_eq!(pom.node_weight(&1), Some(20));
        assert_eq!(pom.total_weight(), 20);
    }

    #[test]
    fn remove_absent_key_is_noop() {
        let pom = Pom::new().put(1, 1, "a");
        let same = pom.remove(&2);
        assert_eq!(same.get(&1), Some("a"));
        assert_eq!(same.total_weight(), 1);
    }

    #[test]
    fn structural_sharing_leaves_original_untouched() {
        let v1 = Pom::new().put(1, 1, "a").put(2, 1, "b");
        let v2 = v1.put(3, 1, "c");
        assert_eq!(v1.get(&3), None);
        assert_eq!(v2.get(&3), Some("c"));
        assert_eq!(v1.total_weight(), 2);
        assert_eq!(v2.total_weight(), 3);
    }

    #[test]
    fn ordered_traversal_matches_btreemap() {
        let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6, 0, -1, -5];
        let mut pom = Pom::new();
        let mut expected = weights_sum(std::iter::empty());
        for (i, k) in keys.iter().enumerate() {
            pom = pom.put(*k, (i + 1) as u64, *k * 10);
            expected.insert(*k, *k * 10);
        }
        let mut seen = Vec::new();
        pom.for_each(|k, v, _, _, _| {
            seen.push((*k, *v));
            ControlFlow::Continue(())
        });
        let expected_sorted: Vec<_> = expected.into_iter().collect();
        assert_eq!(seen, expected_sorted);
    }

    #[test]
    fn reverse_traversal_is_descending() {
        let mut pom = Pom::new();
        for k in 0..10 {
            pom = pom.put(k, 1, k);
        }
        let mut seen = Vec::new();
        pom.for_each_reverse(|k, _, _, _, _| {
            seen.push(*k);
            ControlFlow::Continue(())
        });
        assert_eq!(seen, (0..10).rev().collect::<Vec<_>>());
    }

    #[test]
    fn early_termination_stops_traversal() {
        let mut pom = Pom::new();
        for k in 0..100 {
            pom = pom.put(k, 1, k);
        }
        let mut seen = Vec::new();
        pom.for_each(|k, _, _, _, _| {
            seen.push(*k);
            if seen.len() == 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn weight_accumulators_sum_to_total() {
        let mut pom = Pom::new();
        for (i, k) in [5, 3, 8, 1, 9, 2, 7].into_iter().enumerate() {
            pom = pom.put(k, (i + 1) as u64, ());
        }
        let total = pom.total_weight();
        pom.for_each(|k, _, left, w, right| {
            assert_eq!(left + w + right, total);
            assert_eq!(pom.left_weight(k), Some(left));
            assert_eq!(pom.right_weight(k), Some(right));
            assert_eq!(pom.node_weight(k), Some(w));
            ControlFlow::Continue(())
        });
    }

    #[test]
    fn rank_weights_after_deletions() {
        let mut pom = Pom::new();
        for k in 0..20 {
            pom = pom.put(k, 1, k);
        }
        pom = pom.remove(&5).remove(&10).remove(&15);
        assert_eq!(pom.total_weight(), 17);
        // Keys 0..5 lie strictly left of 6.
        assert_eq!(pom.left_weight(&6), Some(6));
        assert_eq!(pom.get(&5), None);
    }

    #[test]
    fn many_random_insertions_stay_balanced_and_ordered() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        let mut pom = Pom::new();
        let mut model = BTreeMap::new();
        for _ in 0..2000 {
            let k: i32 = rng.gen_range(-500..500);
            let w: u64 = rng.gen_range(1..100);
            if rng.gen_bool(0.2) {
                pom = pom.remove(&k);
                model.remove(&k);
            } else {
                pom = pom.put(k, w, k);
                model.insert(k, w);
            }
        }
        let expected_total: u64 = model.values().sum();
        assert_eq!(pom.total_weight(), expected_total);

        let mut seen_keys = Vec::new();
        pom.for_each(|k, _, _, w, _| {
            seen_keys.push(*k);
            assert_eq!(model.get(k), Some(w).as_ref());
            ControlFlow::Continue(())
        });
        let expected_keys: Vec<_> = model.keys().copied().collect();
        assert_eq!(seen_keys, expected_keys);
    }
}
