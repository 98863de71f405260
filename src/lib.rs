//! Persistent (multi-version) ordered binary search tree.
//!
//! This crate provides [`PersistentTree`], an ordered set in which every
//! mutation seals a new immutable version while all earlier versions remain
//! fully queryable. The implementation uses the Sleator–Tarjan *fat node*
//! technique: each node carries at most one pending change record (a child
//! pointer or value override tagged with the version it became effective),
//! and when a second change would be required the node is copied and the
//! pointer swap propagates toward the root (*path copying*).
//!
//! "Persistent" here means *multi-version*, not disk-durable: the whole
//! structure lives in memory, and nothing is ever rebalanced — worst-case
//! depth is linear, exactly as in a plain unbalanced BST.
//!
//! # Overview
//!
//! - Mutations ([`PersistentTree::insert`], [`PersistentTree::remove`],
//!   [`PersistentTree::clear`]) advance the current version by one when they
//!   change anything, and are silent no-ops otherwise.
//! - Every query takes an optional version: [`PersistentTree::get_at`],
//!   [`PersistentTree::iter_at`], [`PersistentTree::len_at`],
//!   [`PersistentTree::render_at`], [`PersistentTree::snapshot_at`].
//! - Versions are `u64`, starting at 0 ("tree not yet created"); the n-th
//!   version-advancing mutation seals version n.
//! - Ordering is pluggable through the [`Comparator`] trait; the default
//!   [`NaturalOrder`] is ascending `Ord`.
//!
//! # Examples
//!
//! ```rust
//! use verstree::PersistentTree;
//!
//! let mut tree = PersistentTree::new();
//! for value in [4, 7, 2, 5, 3, 1] {
//!     assert!(tree.insert(value));
//! }
//! assert_eq!(tree.current_version(), 6);
//!
//! // The latest version iterates in ascending order.
//! let latest: Vec<i32> = tree.iter().copied().collect();
//! assert_eq!(latest, vec![1, 2, 3, 4, 5, 7]);
//!
//! // History stays queryable: 2 was inserted at version 3.
//! assert!(tree.contains_at(&2, 3));
//! assert!(!tree.contains_at(&2, 1));
//!
//! // Removals seal new versions too; old versions are untouched.
//! assert!(tree.remove(&2));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7]);
//! assert_eq!(tree.iter_at(6).copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 7]);
//! ```
//!
//! # Structural sharing
//!
//! Nodes live in an arena owned by the tree and are referenced by index, so
//! a node created in version V is shared by every later version until
//! something at or below it changes. A version, once sealed, is immutable:
//! iterators constructed over it are never affected by later mutations.
//!
//! ```rust
//! use verstree::PersistentTree;
//!
//! let mut tree = PersistentTree::from_values([4, 7, 2, 5, 3, 1]);
//! let before = tree.current_version();
//!
//! let snapshot = tree.snapshot_at(before);
//! tree.insert(100);
//! tree.remove(&4);
//!
//! // The snapshot is a brand-new single-version tree; nothing leaks in.
//! assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 7]);
//! ```

mod arena;
mod compare;
mod error;
mod iter;
mod node;
mod render;
mod tree;

#[cfg(feature = "serde")]
mod serde_support;

pub use compare::{Comparator, NaturalOrder, OrderBy, ReverseOrder};
pub use error::VersionError;
pub use iter::Iter;
pub use tree::{PersistentTree, Version};
