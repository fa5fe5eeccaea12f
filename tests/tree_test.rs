//! Tests for the BST engine: insert, BFS search, removal and traversals

use std::collections::HashMap;

use rstest::{fixture, rstest};

use pokedex::domain::tree::{insert_node, remove_node, search_bfs};
use pokedex::domain::{
    destroy_subtree, InsertOutcome, Pokedex, PokemonType, Record, RecordId, Traversal, TreeNode,
};
use pokedex::util::testing::{self, record};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const SCENARIO: [RecordId; 7] = [50, 30, 70, 20, 40, 60, 80];

#[fixture]
fn records() -> Vec<Record> {
    (1..=200).map(record).collect()
}

fn build<'c>(records: &'c [Record], ids: &[RecordId]) -> Pokedex<'c> {
    let mut pokedex = Pokedex::new();
    for id in ids {
        let outcome = pokedex.insert_record(&records[(*id - 1) as usize]);
        assert!(outcome.is_inserted(), "id {} should be new", id);
    }
    pokedex
}

fn is_strictly_ascending(ids: &[RecordId]) -> bool {
    ids.windows(2).all(|pair| pair[0] < pair[1])
}

/// Deterministic permutation of 1..=n (LCG shuffle).
fn shuffled(n: RecordId, seed: u64) -> Vec<RecordId> {
    let mut ids: Vec<RecordId> = (1..=n).collect();
    let mut state = seed;
    for i in (1..ids.len()).rev() {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        ids.swap(i, j);
    }
    ids
}

// ============================================================
// Traversal order
// ============================================================

#[rstest]
#[case(Traversal::Bfs, vec![50, 30, 70, 20, 40, 60, 80])]
#[case(Traversal::PreOrder, vec![50, 30, 20, 40, 70, 60, 80])]
#[case(Traversal::InOrder, vec![20, 30, 40, 50, 60, 70, 80])]
#[case(Traversal::PostOrder, vec![20, 40, 30, 60, 80, 70, 50])]
fn given_balanced_tree_when_traversing_then_visits_in_defined_order(
    records: Vec<Record>,
    #[case] order: Traversal,
    #[case] expected: Vec<RecordId>,
) {
    let pokedex = build(&records, &SCENARIO);
    assert_eq!(pokedex.ids(order), expected);
}

#[rstest]
fn given_tree_when_traversing_then_each_node_visited_exactly_once(records: Vec<Record>) {
    let pokedex = build(&records, &SCENARIO);
    for order in Traversal::ALL {
        let mut visits: HashMap<RecordId, usize> = HashMap::new();
        pokedex.traverse(order, |node| *visits.entry(node.id()).or_default() += 1);
        assert_eq!(visits.len(), SCENARIO.len(), "{}", order);
        assert!(visits.values().all(|count| *count == 1), "{}", order);
    }
}

#[rstest]
fn given_empty_tree_when_traversing_then_visitor_never_called() {
    let pokedex = Pokedex::new();
    for order in Traversal::ALL {
        let mut called = false;
        pokedex.traverse(order, |_| called = true);
        assert!(!called);
    }
    assert!(pokedex.ids(Traversal::InOrder).is_empty());
}

// ============================================================
// Insert
// ============================================================

#[rstest]
fn given_existing_id_when_inserting_then_duplicate_returned_and_tree_unchanged(records: Vec<Record>) {
    let mut pokedex = build(&records, &SCENARIO);
    let before = pokedex.ids(Traversal::InOrder);

    let outcome = pokedex.insert(TreeNode::new(&records[39]));

    match outcome {
        InsertOutcome::Duplicate(node) => assert_eq!(node.id(), 40),
        InsertOutcome::Inserted => panic!("duplicate id must be rejected"),
    }
    assert_eq!(pokedex.len(), 7);
    assert_eq!(pokedex.ids(Traversal::InOrder), before);
}

#[rstest]
fn given_duplicate_when_inserting_then_existing_record_kept(records: Vec<Record>) {
    let other = Record::new(50, "impostor", PokemonType::Fire, 1, 1, false);
    let mut pokedex = build(&records, &SCENARIO);

    assert!(!pokedex.insert_record(&other).is_inserted());

    let root = pokedex.root().unwrap();
    assert_eq!(root.record().name, "r50");
}

#[rstest]
fn given_subtree_root_when_inserting_via_free_function_then_root_is_returned(records: Vec<Record>) {
    let (root, outcome) = insert_node(None, TreeNode::new(&records[9]));
    assert!(outcome.is_inserted());
    let (root, outcome) = insert_node(root, TreeNode::new(&records[4]));
    assert!(outcome.is_inserted());
    let (root, outcome) = insert_node(root, TreeNode::new(&records[9]));
    assert!(!outcome.is_inserted());

    let root = root.unwrap();
    assert_eq!(root.id(), 10);
    assert_eq!(root.left().map(|n| n.id()), Some(5));
    assert!(root.right().is_none());
}

#[rstest]
#[case(7)]
#[case(42)]
#[case(1234)]
fn given_any_distinct_insertion_order_when_collected_in_order_then_strictly_ascending(
    records: Vec<Record>,
    #[case] seed: u64,
) {
    let ids = shuffled(120, seed);
    let pokedex = build(&records, &ids);

    let in_order = pokedex.ids(Traversal::InOrder);
    assert_eq!(in_order.len(), 120);
    assert!(is_strictly_ascending(&in_order));
}

#[rstest]
fn given_ascending_insertions_when_tree_degenerates_then_operations_still_work(records: Vec<Record>) {
    let ids: Vec<RecordId> = (1..=60).collect();
    let mut pokedex = build(&records, &ids);

    assert_eq!(pokedex.ids(Traversal::Bfs), ids);
    assert!(pokedex.search(60).is_some());
    assert!(pokedex.remove(30));
    assert!(is_strictly_ascending(&pokedex.ids(Traversal::InOrder)));
    assert_eq!(pokedex.len(), 59);
}

// ============================================================
// Search
// ============================================================

#[rstest]
fn given_present_id_when_searching_then_node_found(records: Vec<Record>) {
    let pokedex = build(&records, &SCENARIO);
    let node = search_bfs(pokedex.root(), 60).expect("60 is present");
    assert_eq!(node.record().name, "r60");
    assert!(node.left().is_none());
}

#[rstest]
fn given_absent_id_when_searching_then_none(records: Vec<Record>) {
    let pokedex = build(&records, &SCENARIO);
    assert!(pokedex.search(55).is_none());
    assert!(search_bfs(None, 50).is_none());
}

// ============================================================
// Remove
// ============================================================

#[rstest]
fn given_root_with_two_children_when_removed_then_successor_takes_its_place(records: Vec<Record>) {
    let mut pokedex = build(&records, &SCENARIO);

    assert!(pokedex.remove(50));

    assert_eq!(pokedex.root().map(|n| n.id()), Some(60));
    assert_eq!(pokedex.ids(Traversal::InOrder), vec![20, 30, 40, 60, 70, 80]);
    assert_eq!(pokedex.ids(Traversal::Bfs), vec![60, 30, 70, 20, 40, 80]);
}

#[rstest]
fn given_present_ids_when_removed_twice_then_second_removal_is_noop(records: Vec<Record>) {
    for id in SCENARIO {
        let mut pokedex = build(&records, &SCENARIO);
        assert!(pokedex.search(id).is_some());

        assert!(pokedex.remove(id));
        assert_eq!(pokedex.len(), 6, "removing {}", id);
        assert!(is_strictly_ascending(&pokedex.ids(Traversal::InOrder)));

        assert!(!pokedex.remove(id));
        assert_eq!(pokedex.len(), 6);
    }
}

#[rstest]
fn given_leaf_then_single_child_node_when_removed_then_child_is_spliced_up(records: Vec<Record>) {
    let mut pokedex = build(&records, &SCENARIO);

    assert!(pokedex.remove(20));
    assert!(pokedex.remove(30));

    let root = pokedex.root().unwrap();
    assert_eq!(root.left().map(|n| n.id()), Some(40));
    assert_eq!(pokedex.ids(Traversal::InOrder), vec![40, 50, 60, 70, 80]);
}

#[rstest]
fn given_absent_id_when_removed_then_tree_unchanged(records: Vec<Record>) {
    let mut pokedex = build(&records, &SCENARIO);
    assert!(!pokedex.remove(99));
    assert_eq!(pokedex.ids(Traversal::Bfs), SCENARIO.to_vec());

    let mut empty = Pokedex::new();
    assert!(!empty.remove(1));
}

#[rstest]
fn given_shuffled_tree_when_removing_half_then_order_invariant_holds(records: Vec<Record>) {
    let ids = shuffled(100, 99);
    let mut pokedex = build(&records, &ids);

    for id in ids.iter().step_by(2) {
        assert!(pokedex.remove(*id));
    }

    let remaining = pokedex.ids(Traversal::InOrder);
    assert_eq!(remaining.len(), 50);
    assert!(is_strictly_ascending(&remaining));
    for id in ids.iter().step_by(2) {
        assert!(pokedex.search(*id).is_none());
    }
}

#[rstest]
fn given_subtree_when_removing_via_free_function_then_new_root_returned(records: Vec<Record>) {
    let (root, _) = insert_node(None, TreeNode::new(&records[0]));
    let root = remove_node(root, 1);
    assert!(root.is_none());
}

// ============================================================
// Teardown
// ============================================================

#[rstest]
fn given_tree_when_cleared_then_empty(records: Vec<Record>) {
    let mut pokedex = build(&records, &SCENARIO);
    pokedex.clear();
    assert!(pokedex.is_empty());
    assert_eq!(pokedex.len(), 0);

    // clearing an empty tree is fine
    pokedex.clear();
    destroy_subtree(None);
}
