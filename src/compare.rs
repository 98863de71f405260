//! Pluggable ordering for tree positioning.
//!
//! Every comparison the tree performs — descent, duplicate detection,
//! predecessor search — goes through a single [`Comparator`]. Equality is
//! never tested with `==`; two values are equal exactly when the comparator
//! returns [`Ordering::Equal`].

use std::cmp::Ordering;

/// A total ordering over `T` used to position values in the tree.
///
/// This is the crate's only configuration surface. Implementations must be
/// consistent (a strict weak ordering expressed as a three-way compare):
/// the tree stores at most one value from each equivalence class.
pub trait Comparator<T> {
    /// Three-way comparison between two values.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// The default comparator: ascending order via [`Ord`].
///
/// # Examples
///
/// ```rust
/// use verstree::PersistentTree;
///
/// let tree = PersistentTree::from_values([3, 1, 2]);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Descending order via [`Ord`].
///
/// # Examples
///
/// ```rust
/// use verstree::{PersistentTree, ReverseOrder};
///
/// let mut tree = PersistentTree::with_comparator(ReverseOrder);
/// for value in [3, 1, 2] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<T: Ord> Comparator<T> for ReverseOrder {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        rhs.cmp(lhs)
    }
}

/// Adapter turning a closure into a [`Comparator`].
///
/// # Examples
///
/// ```rust
/// use verstree::{OrderBy, PersistentTree};
///
/// // Order strings by length, ties by content.
/// let by_length = OrderBy(|lhs: &&str, rhs: &&str| {
///     lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
/// });
/// let mut tree = PersistentTree::with_comparator(by_length);
/// for word in ["pear", "fig", "banana"] {
///     tree.insert(word);
/// }
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec!["fig", "pear", "banana"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OrderBy<F>(pub F);

impl<T, F> Comparator<T> for OrderBy<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        (self.0)(lhs, rhs)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_natural_order_matches_ord() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&2, &2), Ordering::Equal);
        assert_eq!(NaturalOrder.compare(&3, &2), Ordering::Greater);
    }

    #[rstest]
    fn test_reverse_order_flips_ord() {
        assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
        assert_eq!(ReverseOrder.compare(&2, &2), Ordering::Equal);
        assert_eq!(ReverseOrder.compare(&3, &2), Ordering::Less);
    }

    #[rstest]
    fn test_order_by_uses_closure() {
        let by_absolute = OrderBy(|lhs: &i32, rhs: &i32| lhs.abs().cmp(&rhs.abs()));
        assert_eq!(by_absolute.compare(&-5, &3), Ordering::Greater);
        assert_eq!(by_absolute.compare(&-3, &3), Ordering::Equal);
    }
}
