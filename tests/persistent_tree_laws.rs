//! Property-based tests for PersistentTree.
//!
//! These laws check the tree against a `BTreeSet` model across random
//! operation sequences, and verify the versioning guarantees: every sealed
//! version stays exactly the state it was sealed with.

use proptest::prelude::*;
use std::collections::BTreeSet;
use verstree::PersistentTree;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Clone, Debug)]
enum Operation {
    Insert(i32),
    Remove(i32),
    Clear,
}

/// Mutations over a small value domain so that removals hit and duplicate
/// inserts happen often.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        5 => (0..48i32).prop_map(Operation::Insert),
        3 => (0..48i32).prop_map(Operation::Remove),
        1 => Just(Operation::Clear),
    ]
}

fn operations_strategy() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), 0..80)
}

fn sorted(model: &BTreeSet<i32>) -> Vec<i32> {
    model.iter().copied().collect()
}

fn values_at(tree: &PersistentTree<i32>, version: u64) -> Vec<i32> {
    tree.iter_at(version).copied().collect()
}

// =============================================================================
// Model Equivalence Laws
// =============================================================================

proptest! {
    /// Law: the latest version always agrees with a BTreeSet fed the same
    /// operations, including the boolean outcome of every mutation.
    #[test]
    fn prop_latest_version_matches_btreeset_model(operations in operations_strategy()) {
        let mut tree = PersistentTree::new();
        let mut model = BTreeSet::new();
        for operation in operations {
            match operation {
                Operation::Insert(value) => {
                    prop_assert_eq!(tree.insert(value), model.insert(value));
                }
                Operation::Remove(value) => {
                    prop_assert_eq!(tree.remove(&value), model.remove(&value));
                }
                Operation::Clear => {
                    tree.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), sorted(&model));
            prop_assert_eq!(tree.len(), model.len());
        }
    }

    /// Law: membership agrees with the model for every probed value.
    #[test]
    fn prop_membership_matches_model(
        values in prop::collection::vec(0..48i32, 0..40),
        probes in prop::collection::vec(0..64i32, 0..20)
    ) {
        let tree = PersistentTree::from_values(values.clone());
        let model: BTreeSet<i32> = values.into_iter().collect();
        for probe in probes {
            prop_assert_eq!(tree.contains(&probe), model.contains(&probe));
            prop_assert_eq!(tree.find(&probe) != tree.end(), model.contains(&probe));
        }
    }
}

// =============================================================================
// Versioning Laws
// =============================================================================

proptest! {
    /// Law: the n-th version-advancing mutation seals version n, and every
    /// sealed version replays to exactly the state it was sealed with —
    /// later mutations never leak backwards.
    #[test]
    fn prop_every_version_replays_its_exact_state(operations in operations_strategy()) {
        let mut tree = PersistentTree::new();
        let mut model = BTreeSet::new();
        // history[v] is the expected content of version v.
        let mut history = vec![Vec::<i32>::new()];
        for operation in operations {
            let advanced = match operation {
                Operation::Insert(value) => {
                    let advanced = tree.insert(value);
                    prop_assert_eq!(advanced, model.insert(value));
                    advanced
                }
                Operation::Remove(value) => {
                    let advanced = tree.remove(&value);
                    prop_assert_eq!(advanced, model.remove(&value));
                    advanced
                }
                Operation::Clear => {
                    let advanced = !model.is_empty();
                    tree.clear();
                    model.clear();
                    advanced
                }
            };
            if advanced {
                history.push(sorted(&model));
            }
            prop_assert_eq!(tree.current_version(), history.len() as u64 - 1);
        }
        for (version, expected) in history.iter().enumerate() {
            prop_assert_eq!(&values_at(&tree, version as u64), expected);
        }
    }

    /// Law: in-order iteration is strictly ascending at every version.
    #[test]
    fn prop_iteration_is_strictly_sorted_at_every_version(operations in operations_strategy()) {
        let mut tree = PersistentTree::new();
        for operation in operations {
            match operation {
                Operation::Insert(value) => {
                    tree.insert(value);
                }
                Operation::Remove(value) => {
                    tree.remove(&value);
                }
                Operation::Clear => tree.clear(),
            }
        }
        for version in 0..=tree.current_version() {
            let values = values_at(&tree, version);
            prop_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    /// Law: inserting an absent value and removing it again restores the
    /// value sequence of the latest version.
    #[test]
    fn prop_insert_then_remove_is_an_inverse_on_values(
        values in prop::collection::vec(0..48i32, 0..40),
        probe in 0..48i32
    ) {
        let mut tree = PersistentTree::from_values(values);
        let inserted = tree.insert(probe);
        let before: Vec<i32> = if inserted {
            values_at(&tree, tree.current_version() - 1)
        } else {
            tree.iter().copied().collect()
        };
        prop_assert!(tree.remove(&probe));
        if inserted {
            prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
        }
    }
}

// =============================================================================
// Snapshot Isolation Laws
// =============================================================================

proptest! {
    /// Law: a snapshot observes nothing that happens to the source after
    /// it was taken, and vice versa.
    #[test]
    fn prop_snapshot_isolation(
        values in prop::collection::vec(0..48i32, 0..40),
        operations in operations_strategy()
    ) {
        let mut tree = PersistentTree::from_values(values);
        let frozen: Vec<i32> = tree.iter().copied().collect();
        let mut snapshot = tree.snapshot_at(tree.current_version());
        for operation in operations {
            match operation {
                Operation::Insert(value) => {
                    tree.insert(value);
                    snapshot.insert(value.wrapping_add(1));
                }
                Operation::Remove(value) => {
                    tree.remove(&value);
                }
                Operation::Clear => tree.clear(),
            }
        }
        // The source's frozen version still replays; the snapshot's own
        // version 1 (its bulk-built state) is likewise untouched.
        let expected_snapshot_base = if frozen.is_empty() { 0 } else { 1 };
        prop_assert_eq!(
            snapshot.iter_at(expected_snapshot_base).copied().collect::<Vec<_>>(),
            frozen
        );
    }
}

// =============================================================================
// Allocator Laws
// =============================================================================

proptest! {
    /// Law: every node the engine ever allocates stays reachable from some
    /// recorded root (through base children or change payloads) — nothing
    /// leaks, and the teardown sweep accounts for the whole arena.
    #[test]
    fn prop_all_allocations_reachable_from_recorded_roots(operations in operations_strategy()) {
        let mut tree = PersistentTree::new();
        for operation in operations {
            match operation {
                Operation::Insert(value) => {
                    tree.insert(value);
                }
                Operation::Remove(value) => {
                    tree.remove(&value);
                }
                Operation::Clear => tree.clear(),
            }
            prop_assert_eq!(tree.reachable_node_count(), tree.node_count());
        }
    }

    /// Law: fat nodes keep allocation linear-ish in the number of
    /// mutations: never more than one leaf plus one copied path per
    /// mutation (a generous bound; typical is far lower).
    #[test]
    fn prop_allocation_is_bounded_by_mutations_times_depth(
        values in prop::collection::vec(0..64i32, 1..40)
    ) {
        let mut tree = PersistentTree::new();
        let mut mutations = 0u64;
        for value in values {
            if tree.insert(value) {
                mutations += 1;
            }
        }
        let depth_bound = mutations as usize;
        prop_assert!(tree.node_count() <= mutations as usize * (1 + depth_bound));
    }
}
