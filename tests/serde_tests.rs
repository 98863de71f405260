#![cfg(feature = "serde")]
//! Serde integration tests: a tree serializes as its newest version's
//! in-order value sequence, and deserializes into a single-version tree.

use rstest::rstest;
use verstree::PersistentTree;

#[rstest]
fn test_serializes_latest_version_in_order() {
    let mut tree = PersistentTree::from_values([4, 7, 2, 5, 3, 1]);
    tree.remove(&7);
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, "[1,2,3,4,5]");
}

#[rstest]
fn test_serializes_empty_tree_as_empty_sequence() {
    let tree: PersistentTree<i32> = PersistentTree::new();
    assert_eq!(serde_json::to_string(&tree).unwrap(), "[]");
}

#[rstest]
fn test_deserializes_into_a_single_version_tree() {
    let tree: PersistentTree<i32> = serde_json::from_str("[4,7,2,5,3,1]").unwrap();
    assert_eq!(tree.current_version(), 1);
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5, 7]
    );
}

#[rstest]
fn test_round_trip_preserves_values_but_not_history() {
    let mut tree = PersistentTree::from_values([2, 1, 3]);
    tree.insert(4);
    tree.remove(&1);

    let json = serde_json::to_string(&tree).unwrap();
    let restored: PersistentTree<i32> = serde_json::from_str(&json).unwrap();

    assert_eq!(
        restored.iter().copied().collect::<Vec<_>>(),
        tree.iter().copied().collect::<Vec<_>>()
    );
    // History is not part of the format.
    assert_eq!(restored.current_version(), 1);
}
