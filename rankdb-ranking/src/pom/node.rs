//! Immutable AVL nodes and the free functions that operate on them.
//!
//! Everything here is expressed in terms of `Link<K, V>`, a possibly-absent
//! `Arc<Node<K, V>>`. Every function takes its tree by shared reference and
//! returns a brand new `Link`; unchanged subtrees are shared with the
//! caller's tree via `Arc::clone`, never deep-copied.

use std::cmp::Ordering;
use std::ops::ControlFlow;
use std::sync::Arc;

/// One immutable node in a persistent AVL tree.
///
/// `weight` is the caller-supplied node weight (independent of key order);
/// `subtree_weight` is the cached sum of `weight` over this node and both
/// children, recomputed whenever a node is rebuilt.
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) weight: u64,
    pub(super) height: u8,
    pub(super) subtree_weight: u64,
    pub(super) left: Link<K, V>,
    pub(super) right: Link<K, V>,
}

/// A link to a subtree: either empty, or a shared, immutable node.
pub(super) type Link<K, V> = Option<Arc<Node<K, V>>>;

pub(super) fn height<K, V>(link: &Link<K, V>) -> u8 {
    link.as_ref().map_or(0, |n| n.height)
}

pub(super) fn subtree_weight<K, V>(link: &Link<K, V>) -> u64 {
    link.as_ref().map_or(0, |n| n.subtree_weight)
}

fn balance_factor<K, V>(left: &Link<K, V>, right: &Link<K, V>) -> i16 {
    height(left) as i16 - height(right) as i16
}

/// Builds a fresh node from a key/value/weight and two (possibly shared)
/// children, recomputing height and subtree weight. Does not rebalance.
fn make_node<K, V>(key: K, value: V, weight: u64, left: Link<K, V>, right: Link<K, V>) -> Arc<Node<K, V>> {
    let height = 1 + height(&left).max(height(&right));
    let subtree_weight = weight + subtree_weight(&left) + subtree_weight(&right);
    Arc::new(Node {
        key,
        value,
        weight,
        height,
        subtree_weight,
        left,
        right,
    })
}

/// Rotates a right-heavy node left: the right child becomes the new root.
fn rotate_left<K: Clone, V: Clone>(node: Arc<Node<K, V>>) -> Arc<Node<K, V>> {
    let r = node.right.clone().expect("rotate_left requires a right child");
    let new_left = make_node(
        node.key.clone(),
        node.value.clone(),
        node.weight,
        node.left.clone(),
        r.left.clone(),
    );
    make_node(r.key.clone(), r.value.clone(), r.weight, Some(new_left), r.right.clone())
}

/// Rotates a left-heavy node right: the left child becomes the new root.
fn rotate_right<K: Clone, V: Clone>(node: Arc<Node<K, V>>) -> Arc<Node<K, V>> {
    let l = node.left.clone().expect("rotate_right requires a left child");
    let new_right = make_node(
        node.key.clone(),
        node.value.clone(),
        node.weight,
        l.right.clone(),
        node.right.clone(),
    );
    make_node(l.key.clone(), l.value.clone(), l.weight, l.left.clone(), Some(new_right))
}

/// Builds a node from its parts and restores the AVL invariant at this
/// level with at most one (possibly double) rotation, per the standard
/// LL/RR/LR/RL cases.
fn balance<K: Clone, V: Clone>(key: K, value: V, weight: u64, left: Link<K, V>, right: Link<K, V>) -> Link<K, V> {
    let bf = balance_factor(&left, &right);
    if bf > 1 {
        let left_node = left.clone().expect("positive balance factor implies a left child");
        let rebuilt = if balance_factor(&left_node.left, &left_node.right) < 0 {
            let rotated_left = rotate_left(left_node);
            make_node(key, value, weight, Some(rotated_left), right)
        } else {
            make_node(key, value, weight, left, right)
        };
        Some(rotate_right(rebuilt))
    } else if bf < -1 {
        let right_node = right.clone().expect("negative balance factor implies a right child");
        let rebuilt = if balance_factor(&right_node.left, &right_node.right) > 0 {
            let rotated_right = rotate_right(right_node);
            make_node(key, value, weight, left, Some(rotated_right))
        } else {
            make_node(key, value, weight, left, right)
        };
        Some(rotate_left(rebuilt))
    } else {
        Some(make_node(key, value, weight, left, right))
    }
}

pub(super) fn get<K: Ord, V: Clone>(link: &Link<K, V>, key: &K) -> Option<V> {
    let node = link.as_ref()?;
    match key.cmp(&node.key) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(node.value.clone()),
    }
}

pub(super) fn put<K: Ord + Clone, V: Clone>(link: &Link<K, V>, key: K, weight: u64, value: V) -> Link<K, V> {
    match link {
        None => Some(make_node(key, value, weight, None, None)),
        Some(node) => match key.cmp(&node.key) {
            Ordering::Less => {
                let new_left = put(&node.left, key, weight, value);
                balance(node.key.clone(), node.value.clone(), node.weight, new_left, node.right.clone())
            }
            Ordering::Greater => {
                let new_right = put(&node.right, key, weight, value);
                balance(node.key.clone(), node.value.clone(), node.weight, node.left.clone(), new_right)
            }
            Ordering::Equal => {
                // Same key: overwriting this node's payload in place yields the
                // identical tree shape that a textbook remove-then-insert would,
                // since the key (and therefore its position) is unchanged.
                Some(make_node(key, value, weight, node.left.clone(), node.right.clone()))
            }
        },
    }
}

pub(super) fn remove<K: Ord + Clone, V: Clone>(link: &Link<K, V>, key: &K) -> Link<K, V> {
    let node = match link {
        None => return None,
        Some(node) => node,
    };
    match key.cmp(&node.key) {
        Ordering::Less => {
            let new_left = remove(&node.left, key);
            balance(node.key.clone(), node.value.clone(), node.weight, new_left, node.right.clone())
        }
        Ordering::Greater => {
            let new_right = remove(&node.right, key);
            balance(node.key.clone(), node.value.clone(), node.weight, node.left.clone(), new_right)
        }
        Ordering::Equal => match (&node.left, &node.right) {
            (None, None) => None,
            (Some(l), None) => Some(l.clone()),
            (None, Some(r)) => Some(r.clone()),
            (Some(_), Some(_)) => {
                if height(&node.right) >= height(&node.left) {
                    let (k, v, w, new_right) = extract_min(&node.right);
                    balance(k, v, w, node.left.clone(), new_right)
                } else {
                    let (k, v, w, new_left) = extract_max(&node.left);
                    balance(k, v, w, new_left, node.right.clone())
                }
            }
        },
    }
}

/// Extracts the minimum-keyed node from a non-empty subtree, returning its
/// key/value/weight together with the rebalanced remainder.
fn extract_min<K: Clone, V: Clone>(link: &Link<K, V>) -> (K, V, u64, Link<K, V>) {
    let node = link.as_ref().expect("extract_min called on an empty subtree");
    match &node.left {
        None => (node.key.clone(), node.value.clone(), node.weight, node.right.clone()),
        Some(_) => {
            let (k, v, w, new_left) = extract_min(&node.left);
            let remainder = balance(node.key.clone(), node.value.clone(), node.weight, new_left, node.right.clone());
            (k, v, w, remainder)
        }
    }
}

/// Extracts the maximum-keyed node from a non-empty subtree, returning its
/// key/value/weight together with the rebalanced remainder.
fn extract_max<K: Clone, V: Clone>(link: &Link<K, V>) -> (K, V, u64, Link<K, V>) {
    let node = link.as_ref().expect("extract_max called on an empty subtree");
    match &node.right {
        None => (node.key.clone(), node.value.clone(), node.weight, node.left.clone()),
        Some(_) => {
            let (k, v, w, new_right) = extract_max(&node.right);
            let remainder = balance(node.key.clone(), node.value.clone(), node.weight, node.left.clone(), new_right);
            (k, v, w, remainder)
        }
    }
}

// `left_weight` and `right_weight` share one descent; `want_left` picks
// which branch is "towards the accumulator" for that query.
pub(super) fn left_weight<K: Ord, V>(link: &Link<K, V>, key: &K) -> Option<u64> {
    rank_weight(link, key, 0, true)
}

pub(super) fn right_weight<K: Ord, V>(link: &Link<K, V>, key: &K) -> Option<u64> {
    rank_weight(link, key, 0, false)
}

fn rank_weight<K: Ord, V>(link: &Link<K, V>, key: &K, acc: u64, want_left: bool) -> Option<u64> {
    let node = link.as_ref()?;
    match key.cmp(&node.key) {
        Ordering::Less => {
            if want_left {
                rank_weight(&node.left, key, acc, want_left)
            } else {
                let next_acc = acc + node.weight + subtree_weight(&node.right);
                rank_weight(&node.left, key, next_acc, want_left)
            }
        }
        Ordering::Greater => {
            if want_left {
                let next_acc = acc + subtree_weight(&node.left) + node.weight;
                rank_weight(&node.right, key, next_acc, want_left)
            } else {
                rank_weight(&node.right, key, acc, want_left)
            }
        }
        Ordering::Equal => {
            if want_left {
                Some(acc + subtree_weight(&node.left))
            } else {
                Some(acc + subtree_weight(&node.right))
            }
        }
    }
}

pub(super) fn node_weight<K: Ord, V>(link: &Link<K, V>, key: &K) -> Option<u64> {
    let node = link.as_ref()?;
    match key.cmp(&node.key) {
        Ordering::Less => node_weight(&node.left, key),
        Ordering::Greater => node_weight(&node.right, key),
        Ordering::Equal => Some(node.weight),
    }
}

/// In-order traversal carrying the totals that lie outside the subtree
/// currently being visited (`parent_left`, `parent_right`), so each visit
/// can emit whole-tree cumulative weights.
pub(super) fn for_each<K, V>(
    link: &Link<K, V>,
    parent_left: u64,
    parent_right: u64,
    visit: &mut dyn FnMut(&K, &V, u64, u64, u64) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let node = match link {
        None => return ControlFlow::Continue(()),
        Some(node) => node,
    };
    let right_of_left = parent_right + node.weight + subtree_weight(&node.right);
    for_each(&node.left, parent_left, right_of_left, visit)?;

    let left_acc = parent_left + subtree_weight(&node.left);
    let right_acc = parent_right + subtree_weight(&node.right);
    visit(&node.key, &node.value, left_acc, node.weight, right_acc)?;

    let left_of_right = parent_left + node.weight + subtree_weight(&node.left);
    for_each(&node.right, left_of_right, parent_right, visit)
}

/// Reverse (descending-key) in-order traversal; same accumulator meaning as
/// [`for_each`], just visiting the right subtree before the left.
pub(super) fn for_each_reverse<K, V>(
    link: &Link<K, V>,
    parent_left: u64,
    parent_right: u64,
    visit: &mut dyn FnMut(&K, &V, u64, u64, u64) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let node = match link {
        None => return ControlFlow::Continue(()),
        Some(node) => node,
    };
    let left_of_right = parent_left + node.weight + subtree_weight(&node.left);
    for_each_reverse(&node.right, left_of_right, parent_right, visit)?;

    let left_acc = parent_left + subtree_weight(&node.left);
    let right_acc = parent_right + subtree_weight(&node.right);
    visit(&node.key, &node.value, left_acc, node.weight, right_acc)?;

    let right_of_left = parent_right + node.weight + subtree_weight(&node.right);
    for_each_reverse(&node.left, parent_left, right_of_left, visit)
}

#[cfg(debug_assertions)]
pub(super) fn assert_invariants<K: Ord + std::fmt::Debug, V>(link: &Link<K, V>) {
    fn check<K: Ord + std::fmt::Debug, V>(link: &Link<K, V>) -> (u8, u64) {
        let node = match link {
            None => return (0, 0),
            Some(node) => node,
        };
        if let Some(l) = &node.left {
            assert!(l.key < node.key, "left child key must be strictly less than parent");
        }
        if let Some(r) = &node.right {
            assert!(r.key > node.key, "right child key must be strictly greater than parent");
        }
        let (lh, lw) = check(&node.left);
        let (rh, rw) = check(&node.right);
        let bf = lh as i16 - rh as i16;
        assert!(bf.abs() <= 1, "AVL balance invariant violated: balance factor {bf}");
        let expected_height = 1 + lh.max(rh);
        assert_eq!(node.height, expected_height, "cached height out of sync with children");
        let expected_weight = node.weight + lw + rw;
        assert_eq!(node.subtree_weight, expected_weight, "cached subtree weight out of sync with children");
        (node.height, node.subtree_weight)
    }
    check(link);
}
