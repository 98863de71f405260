//! Indented textual rendering of a version, for visual debugging.
//!
//! The layout is right subtree first, then the node's value, then the left
//! subtree, each level indented by one tab — read it with your head tilted
//! left. The exact format is pinned only by this crate's own golden tests.

use std::fmt::{Display, Write};

use crate::arena::NodeId;
use crate::compare::Comparator;
use crate::tree::{PersistentTree, Version};

impl<T: Display, C: Comparator<T>> PersistentTree<T, C> {
    /// Renders the newest version.
    #[inline]
    pub fn render(&self) -> String {
        self.render_at(self.current_version())
    }

    /// Renders `version` as an indented right-root-left listing, one node
    /// per line. Empty and out-of-range versions render as the empty
    /// string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let tree = PersistentTree::from_values([2, 1, 3]);
    /// assert_eq!(tree.render(), "\t3\n2\n\t1\n");
    /// ```
    pub fn render_at(&self, version: Version) -> String {
        let mut out = String::new();
        if let Ok(Some(root)) = self.root_at(version) {
            self.render_node(&mut out, root, version, 0);
        }
        out
    }

    fn render_node(&self, out: &mut String, node: NodeId, version: Version, depth: usize) {
        let arena = self.arena();
        if let Some(right) = arena.node(node).right_at(version) {
            self.render_node(out, right, version, depth + 1);
        }
        for _ in 0..depth {
            out.push('\t');
        }
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", arena.node(node).value_at(version));
        if let Some(left) = arena.node(node).left_at(version) {
            self.render_node(out, left, version, depth + 1);
        }
    }
}
