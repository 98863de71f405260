//! Error types for version resolution.

use crate::tree::Version;
use thiserror::Error;

/// Error produced when a query names a version the tree has not reached.
///
/// All version resolution funnels through one guard inside the tree, so
/// this is the only recoverable error the crate surfaces. Soft query APIs
/// (`get_at`, `iter_at`, `len_at`, ...) map it to an empty result instead;
/// the `try_*` variants return it.
///
/// # Examples
///
/// ```rust
/// use verstree::{PersistentTree, VersionError};
///
/// let tree = PersistentTree::from_values([1, 2, 3]);
/// let error = tree.try_iter_at(99).unwrap_err();
/// assert_eq!(
///     error,
///     VersionError::OutOfRange { requested: 99, current: 1 }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The requested version exceeds the tree's current version.
    #[error("version {requested} is out of range (current version is {current})")]
    OutOfRange {
        /// The version the caller asked for.
        requested: Version,
        /// The newest version the tree has sealed.
        current: Version,
    },
}
