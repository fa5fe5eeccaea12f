//! Tests for name ordering of a tree's records.

use std::cmp::Ordering;

use rstest::rstest;

use pokedex::domain::collect::visit_alphabetical;
use pokedex::domain::{alphabetical, collect_all, compare_by_name, NodeBuffer, Pokedex, Record, Traversal};
use pokedex::util::testing::{self, named_records};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn build(records: &[Record]) -> Pokedex<'_> {
    let mut pokedex = Pokedex::new();
    for record in records {
        pokedex.insert_record(record);
    }
    pokedex
}

fn names(buffer: &NodeBuffer<'_, '_>) -> Vec<String> {
    buffer.iter().map(|node| node.record().name.clone()).collect()
}

#[rstest]
fn given_tree_when_collected_then_buffer_is_in_id_order() {
    let records = named_records(&[(5, "e"), (2, "b"), (9, "i"), (1, "a")]);
    let pokedex = build(&records);

    let mut buffer = NodeBuffer::new();
    collect_all(pokedex.root(), &mut buffer);

    let ids: Vec<_> = buffer.iter().map(|node| node.id()).collect();
    assert_eq!(ids, vec![1, 2, 5, 9]);
}

#[rstest]
fn given_mixed_names_when_sorted_alphabetically_then_byte_order_applies() {
    // Arrange
    let records = named_records(&[
        (4, "Charmander"),
        (1, "Bulbasaur"),
        (7, "Squirtle"),
        (63, "abra"),
        (41, "Zubat"),
    ]);
    let pokedex = build(&records);

    // Act
    let buffer = alphabetical(pokedex.root());

    // Assert: uppercase sorts before lowercase
    assert_eq!(
        names(&buffer),
        vec!["Bulbasaur", "Charmander", "Squirtle", "Zubat", "abra"]
    );
}

#[rstest]
fn given_equal_names_when_sorted_then_id_order_is_kept() {
    let records = named_records(&[(30, "Same"), (10, "Same"), (20, "Alpha"), (40, "Same")]);
    let pokedex = build(&records);

    let buffer = alphabetical(pokedex.root());

    let ids: Vec<_> = buffer.iter().map(|node| node.id()).collect();
    assert_eq!(ids, vec![20, 10, 30, 40]);
}

#[rstest]
#[case("Abra", "Kadabra", Ordering::Less)]
#[case("Mew", "Mew", Ordering::Equal)]
#[case("Mewtwo", "Mew", Ordering::Greater)]
#[case("Zubat", "abra", Ordering::Less)]
fn given_two_nodes_when_compared_by_name_then_three_way_result(
    #[case] left: &str,
    #[case] right: &str,
    #[case] expected: Ordering,
) {
    let records = named_records(&[(1, left), (2, right)]);
    let pokedex = build(&records);
    let first = pokedex.search(1).unwrap();
    let second = pokedex.search(2).unwrap();

    assert_eq!(compare_by_name(first, second), expected);
}

#[rstest]
fn given_tree_when_sorted_alphabetically_then_tree_is_untouched() {
    let records = named_records(&[(2, "Zed"), (1, "Yan"), (3, "Xia")]);
    let pokedex = build(&records);
    let before = pokedex.ids(Traversal::Bfs);

    let mut visited = Vec::new();
    visit_alphabetical(pokedex.root(), |node| visited.push(node.id()));

    assert_eq!(visited, vec![3, 1, 2]);
    assert_eq!(pokedex.ids(Traversal::Bfs), before);
}

#[rstest]
fn given_empty_tree_when_sorted_alphabetically_then_buffer_empty() {
    let pokedex = Pokedex::new();
    assert!(alphabetical(pokedex.root()).is_empty());
}
