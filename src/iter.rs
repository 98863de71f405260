//! Forward-only, in-order iteration over one fixed version.
//!
//! The iterator holds an explicit stack of pending ancestors: constructing
//! it pushes the left spine from the resolved root down to the leftmost
//! node, and each [`Iter::next`] pops one node, then pushes the left spine
//! of that node's right child — every child resolved at the iterator's
//! fixed version. No part of the tree is materialized.

use smallvec::SmallVec;

use crate::arena::{NodeArena, NodeId};
use crate::tree::Version;

/// The pending-ancestor stack; stack depth is bounded by tree depth.
pub(crate) type Spine = SmallVec<[NodeId; 16]>;

/// In-order iterator over a single version of a
/// [`PersistentTree`](crate::PersistentTree).
///
/// The version is fixed at construction and the iterator walks sealed,
/// immutable history only, so mutating the tree afterwards has no effect on
/// an existing iterator. There is no rewinding: restart by asking the tree
/// for a fresh iterator.
///
/// # Equality
///
/// Iterator equality is deliberately shallow, matching the engine's
/// long-standing contract: two iterators are equal when **both are
/// exhausted**, or when both are live and the *values they would yield
/// next* are equal. Position is not compared — two iterators over different
/// trees (or different versions) positioned on equal values compare equal.
/// Rely on equality only for "both exhausted" (the
/// [`end()`](crate::PersistentTree::end) check) or "same next value".
///
/// # Examples
///
/// ```rust
/// use verstree::PersistentTree;
///
/// let tree = PersistentTree::from_values([2, 1, 3]);
/// let values: Vec<i32> = tree.iter().copied().collect();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct Iter<'a, T> {
    arena: &'a NodeArena<T>,
    version: Version,
    spine: Spine,
}

impl<'a, T> Iter<'a, T> {
    /// Iterator over the subtree under `root`, starting at its leftmost
    /// node.
    pub(crate) fn new(arena: &'a NodeArena<T>, version: Version, root: Option<NodeId>) -> Self {
        let mut iter = Self::exhausted(arena, version);
        if let Some(root) = root {
            iter.push_left_spine(root);
        }
        iter
    }

    /// The terminal iterator.
    pub(crate) fn exhausted(arena: &'a NodeArena<T>, version: Version) -> Self {
        Self {
            arena,
            version,
            spine: Spine::new(),
        }
    }

    /// Iterator resuming from a pre-built ancestor stack (`find` builds
    /// one during its descent).
    pub(crate) fn from_spine(arena: &'a NodeArena<T>, version: Version, spine: Spine) -> Self {
        Self {
            arena,
            version,
            spine,
        }
    }

    /// The version this iterator walks.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// The value the next call to [`Iterator::next`] would yield, without
    /// advancing.
    #[inline]
    pub fn peek(&self) -> Option<&'a T> {
        self.spine
            .last()
            .map(|&node| self.arena.node(node).value_at(self.version))
    }

    fn push_left_spine(&mut self, from: NodeId) {
        let mut current = Some(from);
        while let Some(node) = current {
            self.spine.push(node);
            current = self.arena.node(node).left_at(self.version);
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let visited = self.spine.pop()?;
        let node = self.arena.node(visited);
        if let Some(right) = node.right_at(self.version) {
            self.push_left_spine(right);
        }
        Some(node.value_at(self.version))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every stacked ancestor is yielded eventually; right subtrees are
        // not counted, so only a lower bound is known.
        (self.spine.len(), None)
    }
}

impl<T> std::iter::FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            version: self.version,
            spine: self.spine.clone(),
        }
    }
}

/// Shallow, value-based equality; see the type-level documentation for the
/// exact (and deliberately preserved) contract.
impl<T: PartialEq> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.peek(), other.peek()) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Iter<'_, T> {}
