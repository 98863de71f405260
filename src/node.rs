//! The fat node: a BST node plus one optional change record.
//!
//! A node's base `value`/`left`/`right` fields describe its state as of the
//! version in which it was allocated and are never mutated afterwards (bulk
//! construction, which predates all history, writes base fields directly).
//! Anything that happens to the node later is recorded in its single
//! [`Change`] slot; once that slot is occupied the node is *copied* instead
//! of being touched again. This "at most one change per node" bound is what
//! keeps the extra memory per mutation O(1) outside of cascading copies.

use crate::arena::NodeId;
use crate::tree::Version;

/// Which child pointer of a node a descent step or change refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// The single recorded modification of a node, tagged with the version at
/// which it became effective.
#[derive(Clone, Debug)]
pub(crate) enum Change<T> {
    /// The left child pointer was replaced from `since` on.
    Left {
        child: Option<NodeId>,
        since: Version,
    },
    /// The right child pointer was replaced from `since` on.
    Right {
        child: Option<NodeId>,
        since: Version,
    },
    /// The stored value was replaced from `since` on (two-child removal
    /// promotes the in-order predecessor's value in place).
    Value { value: T, since: Version },
}

impl<T> Change<T> {
    /// Builds a child-pointer change for the given side.
    pub(crate) fn child(side: Side, child: Option<NodeId>, since: Version) -> Self {
        match side {
            Side::Left => Self::Left { child, since },
            Side::Right => Self::Right { child, since },
        }
    }
}

/// A single node in the tree's history.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    value: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    change: Option<Change<T>>,
}

impl<T> Node<T> {
    /// Creates a childless node, the shape every `insert` allocates.
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            change: None,
        }
    }

    /// Creates a node with explicit base children; used by path copies,
    /// bulk construction, and snapshot extraction.
    pub(crate) fn with_children(value: T, left: Option<NodeId>, right: Option<NodeId>) -> Self {
        Self {
            value,
            left,
            right,
            change: None,
        }
    }

    /// The stored value as of `version`.
    pub(crate) fn value_at(&self, version: Version) -> &T {
        match &self.change {
            Some(Change::Value { value, since }) if version >= *since => value,
            _ => &self.value,
        }
    }

    /// The left child as of `version`.
    pub(crate) fn left_at(&self, version: Version) -> Option<NodeId> {
        match &self.change {
            Some(Change::Left { child, since }) if version >= *since => *child,
            _ => self.left,
        }
    }

    /// The right child as of `version`.
    pub(crate) fn right_at(&self, version: Version) -> Option<NodeId> {
        match &self.change {
            Some(Change::Right { child, since }) if version >= *since => *child,
            _ => self.right,
        }
    }

    /// The child on `side` as of `version`.
    pub(crate) fn child_at(&self, side: Side, version: Version) -> Option<NodeId> {
        match side {
            Side::Left => self.left_at(version),
            Side::Right => self.right_at(version),
        }
    }

    /// Whether the change slot is occupied.
    pub(crate) fn has_change(&self) -> bool {
        self.change.is_some()
    }

    /// The change record, if any; the reachability sweep follows its payload.
    pub(crate) fn change(&self) -> Option<&Change<T>> {
        self.change.as_ref()
    }

    /// Records the node's single change.
    ///
    /// # Panics
    ///
    /// Panics if a change is already present. Callers must check
    /// [`Node::has_change`] and copy the node instead; reaching this panic
    /// means the engine itself violated the fat-node bound.
    pub(crate) fn attach_change(&mut self, change: Change<T>) {
        assert!(
            self.change.is_none(),
            "fat-node bound violated: node already carries a change"
        );
        self.change = Some(change);
    }

    /// Both base child pointers, ignoring the change record; the
    /// reachability sweep visits these and the change payload separately.
    pub(crate) fn base_children(&self) -> (Option<NodeId>, Option<NodeId>) {
        (self.left, self.right)
    }

    /// Rewrites a base child pointer. Only legal while the node is not yet
    /// part of any sealed version (bulk construction).
    pub(crate) fn set_base_child(&mut self, side: Side, child: Option<NodeId>) {
        debug_assert!(self.change.is_none());
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
