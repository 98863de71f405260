//! Node allocator and lifecycle tracking.
//!
//! All nodes of a tree — every version of it — live in one growable arena
//! owned by that tree, and refer to each other by [`NodeId`] index. Sharing
//! a node across versions is sharing an index, so dropping or purging the
//! arena frees the entire history exactly once; there is no per-root
//! freeing and therefore no double-free hazard for shared subtrees.
//!
//! The arena also answers "how many nodes are reachable from these roots"
//! via a mark-and-collect sweep that follows base child pointers *and*
//! change-record payloads. [`PersistentTree::purge`](crate::PersistentTree::purge)
//! audits the live set with it before bulk deallocation, and tests use it to
//! prove that no allocation ever becomes unreachable garbage.

use crate::node::{Change, Node};

/// Index of a node inside its owning arena.
///
/// Plain data: ids are only meaningful together with the arena that issued
/// them, and the engine never lets them cross trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(u32::try_from(index).is_ok(), "node arena capacity exceeded");
        Self(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owner of every node allocation a tree makes.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeArena<T> {
    nodes: Vec<Node<T>>,
}

impl<T> NodeArena<T> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Stores a node and returns its id.
    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }

    /// Number of live node allocations across all versions.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bytes held by node storage (the original allocator tracked this too).
    pub(crate) fn allocated_bytes(&self) -> usize {
        self.nodes.capacity() * size_of::<Node<T>>()
    }

    /// Mark-and-collect: counts the nodes reachable from `roots` through
    /// base children and change payloads, visiting each node once.
    pub(crate) fn reachable_count(&self, roots: impl IntoIterator<Item = NodeId>) -> usize {
        let mut marked = vec![false; self.nodes.len()];
        let mut pending: Vec<NodeId> = Vec::new();
        for root in roots {
            if !marked[root.index()] {
                marked[root.index()] = true;
                pending.push(root);
            }
        }
        let mut count = 0;
        while let Some(id) = pending.pop() {
            count += 1;
            let node = self.node(id);
            let (left, right) = node.base_children();
            let change_child = match node.change() {
                Some(Change::Left { child, .. } | Change::Right { child, .. }) => *child,
                Some(Change::Value { .. }) | None => None,
            };
            for child in [left, right, change_child].into_iter().flatten() {
                if !marked[child.index()] {
                    marked[child.index()] = true;
                    pending.push(child);
                }
            }
        }
        count
    }

    /// Drops every node at once.
    pub(crate) fn purge(&mut self) {
        self.nodes.clear();
        self.nodes.shrink_to_fit();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Side;
    use rstest::rstest;

    #[rstest]
    fn test_alloc_assigns_sequential_ids() {
        let mut arena = NodeArena::new();
        let first = arena.alloc(Node::leaf(1));
        let second = arena.alloc(Node::leaf(2));
        assert_ne!(first, second);
        assert_eq!(*arena.node(first).value_at(0), 1);
        assert_eq!(*arena.node(second).value_at(0), 2);
        assert_eq!(arena.node_count(), 2);
    }

    #[rstest]
    fn test_reachable_count_follows_change_payloads() {
        let mut arena = NodeArena::new();
        let leaf = arena.alloc(Node::leaf(1));
        let root = arena.alloc(Node::leaf(2));
        // The leaf hangs off the root only through the change record.
        arena
            .node_mut(root)
            .attach_change(Change::child(Side::Left, Some(leaf), 2));

        assert_eq!(arena.reachable_count([root]), 2);
        assert_eq!(arena.reachable_count([leaf]), 1);
        assert_eq!(arena.reachable_count([]), 0);
    }

    #[rstest]
    fn test_reachable_count_visits_shared_nodes_once() {
        let mut arena = NodeArena::new();
        let shared = arena.alloc(Node::leaf(1));
        let first_root = arena.alloc(Node::with_children(2, Some(shared), None));
        let second_root = arena.alloc(Node::with_children(3, Some(shared), None));

        assert_eq!(arena.reachable_count([first_root, second_root]), 3);
    }

    #[rstest]
    fn test_purge_empties_the_arena() {
        let mut arena = NodeArena::new();
        arena.alloc(Node::leaf(1));
        arena.alloc(Node::leaf(2));
        arena.purge();
        assert_eq!(arena.node_count(), 0);
    }
}
