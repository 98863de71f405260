//! The tree engine: version bookkeeping and fat-node path copying.
//!
//! [`PersistentTree`] orchestrates everything: it owns the node arena and
//! the root table, resolves versions to roots, and runs the shared
//! attach-or-copy unwind that both `insert` and `remove` use to record a
//! mutation without disturbing sealed history.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::arena::{NodeArena, NodeId};
use crate::compare::{Comparator, NaturalOrder};
use crate::error::VersionError;
use crate::iter::{Iter, Spine};
use crate::node::{Change, Node, Side};

/// Identifier of one immutable snapshot of the tree.
///
/// Version 0 is the tree before its first mutation (always empty); the n-th
/// version-advancing mutation seals version n.
pub type Version = u64;

/// One step of a root-to-node descent: a node and the direction taken out
/// of it. Unwinding replays these in reverse to propagate a pointer swap.
#[derive(Clone, Copy)]
struct Step {
    node: NodeId,
    side: Side,
}

/// Descent paths are depth-bounded; small trees stay off the heap.
type Path = SmallVec<[Step; 16]>;

/// Outcome of the shared unwind routine.
enum Unwound {
    /// A node on the path had a free change slot and absorbed the edit;
    /// every node id on the path — the subtree top included — is unchanged.
    Attached,
    /// Copies cascaded past the top of the path; the payload is the new
    /// subtree top (the new root, when the path started there).
    Copied(Option<NodeId>),
}

// =============================================================================
// PersistentTree Definition
// =============================================================================

/// A persistent (multi-version) ordered binary search tree.
///
/// Every successful mutation seals a new immutable version; all earlier
/// versions remain queryable through the `*_at` methods. The tree is a set
/// per its comparator: inserting a value that is already present (compares
/// [`Ordering::Equal`]) is a no-op that does not advance the version.
///
/// No rebalancing is performed, so complexities below are in terms of the
/// tree depth `d` (worst case O(n), as in any unbalanced BST).
///
/// # Time Complexity
///
/// | Operation         | Complexity                    |
/// |-------------------|-------------------------------|
/// | `insert`          | O(d) amortized O(1) copies    |
/// | `remove`          | O(d)                          |
/// | `get` / `contains`| O(d + log versions)           |
/// | `iter`            | O(1) + O(n) for the full walk |
/// | `len`             | O(n), counted by traversal    |
/// | `snapshot_at`     | O(n)                          |
/// | `clear`           | O(1)                          |
///
/// # Examples
///
/// ```rust
/// use verstree::PersistentTree;
///
/// let mut tree = PersistentTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// assert_eq!(tree.current_version(), 3);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
///
/// // Version 1 predates the second and third insert.
/// assert_eq!(tree.iter_at(1).copied().collect::<Vec<_>>(), vec![2]);
/// ```
#[derive(Clone, Debug)]
pub struct PersistentTree<T, C = NaturalOrder> {
    /// Owner of every node in every version.
    arena: NodeArena<T>,
    /// Sparse root table: `(version, root)` pairs, strictly increasing in
    /// version, one entry per root *change* — mutations that leave the root
    /// pointer intact bump the version without adding an entry.
    roots: Vec<(Version, Option<NodeId>)>,
    version: Version,
    comparator: C,
}

// =============================================================================
// Construction
// =============================================================================

impl<T> PersistentTree<T, NaturalOrder> {
    /// Creates an empty tree ordered by [`Ord`], at version 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let tree: PersistentTree<i32> = PersistentTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.current_version(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Bulk-builds a single-version tree from `values` by plain repeated
    /// insertion, skipping duplicates.
    ///
    /// There is no history to preserve during construction, so base child
    /// pointers are written directly: the result carries no change records
    /// and occupies exactly one version (1, or 0 for empty input).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let tree = PersistentTree::from_values([4, 7, 2, 5, 3, 1]);
    /// assert_eq!(tree.current_version(), 1);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 7]);
    /// ```
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Ord,
    {
        Self::from_values_with(NaturalOrder, values)
    }
}

impl<T, C> PersistentTree<T, C> {
    /// Creates an empty tree with an explicit [`Comparator`].
    ///
    /// The comparator is the tree's only configuration: every descent,
    /// duplicate check, and predecessor search goes through it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::{PersistentTree, ReverseOrder};
    ///
    /// let mut tree = PersistentTree::with_comparator(ReverseOrder);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: NodeArena::new(),
            roots: Vec::new(),
            version: 0,
            comparator,
        }
    }

    /// Bulk construction with an explicit comparator; see
    /// [`PersistentTree::from_values`].
    #[must_use]
    pub fn from_values_with(comparator: C, values: impl IntoIterator<Item = T>) -> Self
    where
        C: Comparator<T>,
    {
        let mut tree = Self::with_comparator(comparator);
        let mut root = None;
        for value in values {
            let Some(mut current) = root else {
                root = Some(tree.arena.alloc(Node::leaf(value)));
                continue;
            };
            loop {
                let node = tree.arena.node(current);
                let side = match tree.comparator.compare(&value, node.value_at(1)) {
                    Ordering::Equal => break,
                    Ordering::Less => Side::Left,
                    Ordering::Greater => Side::Right,
                };
                match node.child_at(side, 1) {
                    Some(child) => current = child,
                    None => {
                        let leaf = tree.arena.alloc(Node::leaf(value));
                        tree.arena.node_mut(current).set_base_child(side, Some(leaf));
                        break;
                    }
                }
            }
        }
        if let Some(root) = root {
            tree.roots.push((1, Some(root)));
            tree.version = 1;
        }
        tree
    }
}

// =============================================================================
// Version Bookkeeping
// =============================================================================

impl<T, C> PersistentTree<T, C> {
    /// The newest sealed version. 0 means no mutation has happened yet.
    #[inline]
    pub fn current_version(&self) -> Version {
        self.version
    }

    /// Number of node allocations across all versions. Structural sharing
    /// keeps this close to "values inserted + copies made", far below
    /// "values × versions".
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    /// Bytes currently held by node storage.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }

    /// The single version-resolution guard: every query funnels through
    /// here. Resolution binary-searches the root table for the greatest
    /// recorded version `<= version`.
    pub(crate) fn root_at(&self, version: Version) -> Result<Option<NodeId>, VersionError> {
        if version > self.version {
            return Err(VersionError::OutOfRange {
                requested: version,
                current: self.version,
            });
        }
        let index = self.roots.partition_point(|(first, _)| *first <= version);
        Ok(if index == 0 {
            None
        } else {
            self.roots[index - 1].1
        })
    }

    /// Root of the newest version. The table's last entry is always the
    /// current root because entries are only pushed when the root changes.
    fn current_root(&self) -> Option<NodeId> {
        self.roots.last().and_then(|(_, root)| *root)
    }

    pub(crate) fn arena(&self) -> &NodeArena<T> {
        &self.arena
    }
}

// =============================================================================
// Queries
// =============================================================================

impl<T, C: Comparator<T>> PersistentTree<T, C> {
    /// Looks up `value` in the newest version.
    ///
    /// Returns the stored value, which is distinguishable from the probe
    /// when the comparator only inspects part of it.
    #[inline]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.get_at(value, self.version)
    }

    /// Looks up `value` as of `version`. Out-of-range versions yield
    /// `None`, never a panic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let mut tree = PersistentTree::new();
    /// tree.insert(4);
    /// tree.insert(7);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.get_at(&2, 3), Some(&2));
    /// assert_eq!(tree.get_at(&2, 1), None); // not inserted yet
    /// assert_eq!(tree.get_at(&2, 99), None); // version out of range
    /// ```
    pub fn get_at(&self, value: &T, version: Version) -> Option<&T> {
        let root = self.root_at(version).ok()??;
        let node = self.descend(root, value, version)?;
        Some(self.arena.node(node).value_at(version))
    }

    /// Whether `value` is present in the newest version.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Whether `value` is present as of `version`.
    #[inline]
    pub fn contains_at(&self, value: &T, version: Version) -> bool {
        self.get_at(value, version).is_some()
    }

    /// Standard BST descent at a fixed version; returns the matching node.
    fn descend(&self, root: NodeId, value: &T, version: Version) -> Option<NodeId> {
        let mut current = root;
        loop {
            let node = self.arena.node(current);
            let side = match self.comparator.compare(value, node.value_at(version)) {
                Ordering::Equal => return Some(current),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            current = node.child_at(side, version)?;
        }
    }

    /// Locates `value` at `version` starting from `root`, recording the
    /// descent path. Returns the path (ending at the parent of the last
    /// node reached) and the matching node, if any; a `None` match leaves
    /// the path ending at the would-be parent of `value`.
    fn locate(&self, root: NodeId, value: &T, version: Version) -> (Path, Option<NodeId>) {
        let mut path = Path::new();
        let mut current = root;
        loop {
            let node = self.arena.node(current);
            let side = match self.comparator.compare(value, node.value_at(version)) {
                Ordering::Equal => return (path, Some(current)),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            let child = node.child_at(side, version);
            path.push(Step {
                node: current,
                side,
            });
            match child {
                Some(child) => current = child,
                None => return (path, None),
            }
        }
    }
}

// =============================================================================
// Mutations
// =============================================================================

impl<T: Clone, C: Comparator<T>> PersistentTree<T, C> {
    /// Inserts `value`, sealing a new version.
    ///
    /// Returns `false` without advancing the version when an equal value is
    /// already present (set semantics).
    ///
    /// The new leaf is hooked in by the attach-or-copy unwind: the deepest
    /// ancestor with a free change slot absorbs the edit; ancestors below a
    /// full slot are copied, and if copies cascade past the root the new
    /// version gets a new root table entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let mut tree = PersistentTree::new();
    /// assert!(tree.insert(5));
    /// assert!(!tree.insert(5)); // duplicate: no new version
    /// assert_eq!(tree.current_version(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let current = self.version;
        let next = current + 1;
        let Some(root) = self.current_root() else {
            let leaf = self.arena.alloc(Node::leaf(value));
            self.roots.push((next, Some(leaf)));
            self.version = next;
            return true;
        };
        let (path, found) = self.locate(root, &value, current);
        if found.is_some() {
            return false;
        }
        let leaf = self.arena.alloc(Node::leaf(value));
        if let Unwound::Copied(new_root) = self.unwind(&path, Some(leaf), next) {
            self.roots.push((next, new_root));
        }
        self.version = next;
        true
    }

    /// Removes `value`, sealing a new version. Returns `false` without
    /// advancing the version when no equal value is present.
    ///
    /// A node with at most one child is spliced out by pointing its parent
    /// at the surviving child (or nothing). A node with two children keeps
    /// its children: the in-order predecessor — the rightmost node of the
    /// left subtree — is spliced out of its own position, and its value
    /// overwrites the target's through a value change (or a copy of the
    /// target, when one change slot cannot hold the required edits).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let mut tree = PersistentTree::from_values([4, 7, 2, 5, 3, 1]);
    /// assert!(tree.remove(&4)); // root, two children
    /// assert!(!tree.remove(&4));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5, 7]);
    ///
    /// // The version before the removal still holds 4.
    /// assert_eq!(tree.iter_at(1).copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 7]);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let current = self.version;
        let Some(root) = self.current_root() else {
            return false;
        };
        let (path, found) = self.locate(root, value, current);
        let Some(target) = found else {
            return false;
        };
        let next = current + 1;
        let left = self.arena.node(target).left_at(current);
        let right = self.arena.node(target).right_at(current);

        let outcome = match (left, right) {
            (Some(left_child), Some(_)) => {
                self.promote_predecessor(&path, target, left_child, next)
            }
            (survivor, None) | (None, survivor) => self.unwind(&path, survivor, next),
        };
        if let Unwound::Copied(new_root) = outcome {
            self.roots.push((next, new_root));
        }
        self.version = next;
        true
    }

    /// Seals a new version with a null root. No-op (no version change) when
    /// the current version is already empty. History stays queryable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let mut tree = PersistentTree::from_values([1, 2, 3]);
    /// tree.clear();
    /// assert_eq!(tree.current_version(), 2);
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.len_at(1), 3);
    ///
    /// tree.clear(); // already empty: no new version
    /// assert_eq!(tree.current_version(), 2);
    /// ```
    pub fn clear(&mut self) {
        if self.current_root().is_none() {
            return;
        }
        let next = self.version + 1;
        self.roots.push((next, None));
        self.version = next;
    }

    /// The shared attach-or-copy unwind used by `insert`, `remove`'s
    /// relink, and `remove`'s value overwrite.
    ///
    /// Walks `path` from its deepest step upward, carrying `child` as the
    /// replacement for the step's child pointer. A node with a free change
    /// slot absorbs the edit and stops the walk; a node whose slot is
    /// occupied is path-copied (its old change folded into the copy's base
    /// fields) and the walk continues with the copy as the replacement.
    fn unwind(&mut self, path: &[Step], mut child: Option<NodeId>, version: Version) -> Unwound {
        for step in path.iter().rev() {
            if !self.arena.node(step.node).has_change() {
                self.arena
                    .node_mut(step.node)
                    .attach_change(Change::child(step.side, child, version));
                return Unwound::Attached;
            }
            let copy = self.copy_for_child_swap(step.node, step.side, child);
            child = Some(copy);
        }
        Unwound::Copied(child)
    }

    /// Path copy: clones `node` with its base fields resolved at the
    /// current version (folding in its recorded change), then points `side`
    /// at `child`. The copy carries no change record.
    fn copy_for_child_swap(&mut self, node: NodeId, side: Side, child: Option<NodeId>) -> NodeId {
        let version = self.version;
        let source = self.arena.node(node);
        let value = source.value_at(version).clone();
        let left = match side {
            Side::Left => child,
            Side::Right => source.left_at(version),
        };
        let right = match side {
            Side::Right => child,
            Side::Left => source.right_at(version),
        };
        self.arena.alloc(Node::with_children(value, left, right))
    }

    /// Two-child removal: splices the in-order predecessor out of the left
    /// subtree, then overwrites the target's value with the predecessor's.
    /// `path` ends at the target's parent; `next` is the version being
    /// sealed.
    fn promote_predecessor(
        &mut self,
        path: &[Step],
        target: NodeId,
        left_child: NodeId,
        next: Version,
    ) -> Unwound {
        let current = self.version;

        // Rightmost node of the left subtree, with the sub-path from the
        // left child down to the predecessor's parent.
        let mut sub_path = Path::new();
        let mut predecessor = left_child;
        while let Some(right) = self.arena.node(predecessor).right_at(current) {
            sub_path.push(Step {
                node: predecessor,
                side: Side::Right,
            });
            predecessor = right;
        }
        let promoted = self.arena.node(predecessor).value_at(current).clone();
        let orphan = self.arena.node(predecessor).left_at(current);

        // Splice the predecessor out of its own position. When it is the
        // left child itself, the target's left pointer must move to the
        // predecessor's left subtree, which is exactly a cascaded copy
        // outcome with `orphan` as the new subtree top.
        let splice = if sub_path.is_empty() {
            Unwound::Copied(orphan)
        } else {
            self.unwind(&sub_path, orphan, next)
        };

        match splice {
            // Left subtree intact under its old id: only the value changes.
            Unwound::Attached if !self.arena.node(target).has_change() => {
                self.arena.node_mut(target).attach_change(Change::Value {
                    value: promoted,
                    since: next,
                });
                Unwound::Attached
            }
            Unwound::Attached => {
                let left = self.arena.node(target).left_at(current);
                let right = self.arena.node(target).right_at(current);
                let copy = self.arena.alloc(Node::with_children(promoted, left, right));
                self.unwind(path, Some(copy), next)
            }
            // Both the value and the left pointer change; one change slot
            // cannot hold two edits, so the target is always copied.
            Unwound::Copied(new_left) => {
                let right = self.arena.node(target).right_at(current);
                let copy = self
                    .arena
                    .alloc(Node::with_children(promoted, new_left, right));
                self.unwind(path, Some(copy), next)
            }
        }
    }
}

// =============================================================================
// Iteration, Counting, Snapshots
// =============================================================================

impl<T, C: Comparator<T>> PersistentTree<T, C> {
    /// In-order iterator over the newest version.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.iter_at(self.version)
    }

    /// In-order iterator over `version`; out-of-range versions yield an
    /// exhausted iterator.
    ///
    /// The version is fixed at construction: the iterator walks sealed,
    /// immutable history, so later mutations of the tree never affect it.
    #[inline]
    pub fn iter_at(&self, version: Version) -> Iter<'_, T> {
        self.try_iter_at(version)
            .unwrap_or_else(|_| Iter::exhausted(&self.arena, version))
    }

    /// In-order iterator over `version`, surfacing the out-of-range error.
    pub fn try_iter_at(&self, version: Version) -> Result<Iter<'_, T>, VersionError> {
        let root = self.root_at(version)?;
        Ok(Iter::new(&self.arena, version, root))
    }

    /// The exhausted iterator; the terminal everything compares against.
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let tree = PersistentTree::from_values([1, 2, 3]);
    /// assert!(tree.find(&2) != tree.end());
    /// assert!(tree.find(&9) == tree.end());
    /// ```
    #[inline]
    pub fn end(&self) -> Iter<'_, T> {
        Iter::exhausted(&self.arena, self.version)
    }

    /// Finds `value` in the newest version, as a positioned iterator.
    #[inline]
    pub fn find(&self, value: &T) -> Iter<'_, T> {
        self.find_at(value, self.version)
    }

    /// Finds `value` as of `version`, returning an iterator positioned on
    /// it; iteration continues in order from there. Not-found and
    /// out-of-range both yield [`PersistentTree::end`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let tree = PersistentTree::from_values([4, 7, 2, 5, 3, 1]);
    /// let rest: Vec<i32> = tree.find_at(&3, 1).copied().collect();
    /// assert_eq!(rest, vec![3, 4, 5, 7]);
    /// ```
    pub fn find_at(&self, value: &T, version: Version) -> Iter<'_, T> {
        let Ok(Some(root)) = self.root_at(version) else {
            return self.end();
        };
        // In-order continuation: ancestors left behind by a left turn are
        // pending, ancestors passed by a right turn are already done.
        let mut spine = Spine::new();
        let mut current = root;
        loop {
            let node = self.arena.node(current);
            match self.comparator.compare(value, node.value_at(version)) {
                Ordering::Equal => {
                    spine.push(current);
                    return Iter::from_spine(&self.arena, version, spine);
                }
                Ordering::Less => {
                    spine.push(current);
                    match node.left_at(version) {
                        Some(child) => current = child,
                        None => return self.end(),
                    }
                }
                Ordering::Greater => match node.right_at(version) {
                    Some(child) => current = child,
                    None => return self.end(),
                },
            }
        }
    }

    /// Number of values in the newest version. O(n): counted by a full
    /// in-order traversal, no cached size is maintained.
    #[inline]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Number of values as of `version`; out-of-range versions count 0.
    #[inline]
    pub fn len_at(&self, version: Version) -> usize {
        self.iter_at(version).count()
    }

    /// Number of values as of `version`, surfacing the out-of-range error.
    pub fn try_len_at(&self, version: Version) -> Result<usize, VersionError> {
        Ok(self.try_iter_at(version)?.count())
    }

    /// Whether the newest version is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current_root().is_none()
    }

    /// Deep-extracts `version` into a brand-new single-version tree with
    /// its own storage: no nodes, history, or future mutations are shared
    /// with `self` in either direction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verstree::PersistentTree;
    ///
    /// let mut tree = PersistentTree::from_values([2, 1, 3]);
    /// let snapshot = tree.snapshot_at(1);
    /// tree.remove(&2);
    /// assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(snapshot.current_version(), 1);
    /// ```
    #[inline]
    pub fn snapshot_at(&self, version: Version) -> Self
    where
        T: Clone,
        C: Clone,
    {
        self.try_snapshot_at(version)
            .unwrap_or_else(|_| Self::with_comparator(self.comparator.clone()))
    }

    /// Deep extraction, surfacing the out-of-range error.
    pub fn try_snapshot_at(&self, version: Version) -> Result<Self, VersionError>
    where
        T: Clone,
        C: Clone,
    {
        let root = self.root_at(version)?;
        let mut snapshot = Self::with_comparator(self.comparator.clone());
        if let Some(root) = root {
            let new_root = self.extract_subtree(root, version, &mut snapshot.arena);
            snapshot.roots.push((1, Some(new_root)));
            snapshot.version = 1;
        }
        Ok(snapshot)
    }

    /// Copies the subtree under `node`, resolved at `version`, into
    /// `arena`, visiting each node once. The copies have no change records.
    fn extract_subtree(&self, node: NodeId, version: Version, arena: &mut NodeArena<T>) -> NodeId
    where
        T: Clone,
    {
        let source = self.arena.node(node);
        let left = source
            .left_at(version)
            .map(|child| self.extract_subtree(child, version, arena));
        let right = source
            .right_at(version)
            .map(|child| self.extract_subtree(child, version, arena));
        arena.alloc(Node::with_children(
            source.value_at(version).clone(),
            left,
            right,
        ))
    }
}

// =============================================================================
// Teardown
// =============================================================================

impl<T, C> PersistentTree<T, C> {
    /// Destroys the contents *and* the entire history, returning the tree
    /// to version 0.
    ///
    /// The arena owns every node exactly once regardless of how many
    /// versions share it, so teardown is a single bulk deallocation; in
    /// debug builds the reachability sweep first audits that every
    /// allocation is still reachable from some recorded root.
    pub fn purge(&mut self) {
        debug_assert_eq!(
            self.arena
                .reachable_count(self.roots.iter().filter_map(|(_, root)| *root)),
            self.arena.node_count(),
            "node allocations must all be reachable from recorded roots"
        );
        self.arena.purge();
        self.roots.clear();
        self.version = 0;
    }

    /// Nodes reachable from every recorded root, following change
    /// payloads; exposed for leak audits in tests and diagnostics.
    pub fn reachable_node_count(&self) -> usize {
        self.arena
            .reachable_count(self.roots.iter().filter_map(|(_, root)| *root))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentTree<T, NaturalOrder> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for PersistentTree<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a PersistentTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
