//! Binary search tree of catalog records keyed by [`RecordId`].
//!
//! Nodes own their children through `Option<Box<_>>` slots; every mutating
//! operation takes a subtree by value and hands the (possibly new) subtree
//! root back to its caller, which stores it in the parent's slot.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::record::{Record, RecordId};

/// Owned child slot: absent or an exclusively owned subtree.
pub type Link<'c> = Option<Box<TreeNode<'c>>>;

/// Tree node referencing one catalog record.
#[derive(Debug)]
pub struct TreeNode<'c> {
    record: &'c Record,
    left: Link<'c>,
    right: Link<'c>,
}

impl<'c> TreeNode<'c> {
    /// Allocate a childless node for `record`.
    pub fn new(record: &'c Record) -> Box<Self> {
        Box::new(Self {
            record,
            left: None,
            right: None,
        })
    }

    pub fn id(&self) -> RecordId {
        self.record.id
    }

    pub fn record(&self) -> &'c Record {
        self.record
    }

    pub fn left(&self) -> Option<&TreeNode<'c>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode<'c>> {
        self.right.as_deref()
    }
}

/// Result of inserting a node.
///
/// A rejected duplicate is handed back so the caller decides what to do with it.
#[derive(Debug)]
pub enum InsertOutcome<'c> {
    Inserted,
    Duplicate(Box<TreeNode<'c>>),
}

impl InsertOutcome<'_> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Visiting order for [`traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Level order
    Bfs,
    /// Node, left, right
    PreOrder,
    /// Left, node, right
    InOrder,
    /// Left, right, node
    PostOrder,
}

impl Traversal {
    pub const ALL: [Traversal; 4] = [
        Traversal::Bfs,
        Traversal::PreOrder,
        Traversal::InOrder,
        Traversal::PostOrder,
    ];
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Traversal::Bfs => "BFS (Level-Order)",
            Traversal::PreOrder => "Pre-Order",
            Traversal::InOrder => "In-Order",
            Traversal::PostOrder => "Post-Order",
        };
        f.write_str(label)
    }
}

/// Insert `node` into the subtree at `root`, returning the new subtree root.
///
/// An equal id leaves the subtree untouched and returns the node as
/// [`InsertOutcome::Duplicate`].
pub fn insert_node<'c>(root: Link<'c>, node: Box<TreeNode<'c>>) -> (Link<'c>, InsertOutcome<'c>) {
    let Some(mut current) = root else {
        return (Some(node), InsertOutcome::Inserted);
    };
    match node.id().cmp(&current.id()) {
        Ordering::Equal => {
            debug!("Record with id {} already exists, duplicate rejected", node.id());
            (Some(current), InsertOutcome::Duplicate(node))
        }
        Ordering::Less => {
            let (left, outcome) = insert_node(current.left.take(), node);
            current.left = left;
            (Some(current), outcome)
        }
        Ordering::Greater => {
            let (right, outcome) = insert_node(current.right.take(), node);
            current.right = right;
            (Some(current), outcome)
        }
    }
}

/// Level-order search with an explicit FIFO queue.
pub fn search_bfs<'a, 'c>(root: Option<&'a TreeNode<'c>>, id: RecordId) -> Option<&'a TreeNode<'c>> {
    let mut queue = VecDeque::new();
    queue.extend(root);

    while let Some(current) = queue.pop_front() {
        if current.id() == id {
            return Some(current);
        }
        queue.extend(current.left());
        queue.extend(current.right());
    }
    None
}

fn min_record<'c>(node: &TreeNode<'c>) -> &'c Record {
    let mut current = node;
    while let Some(left) = current.left() {
        current = left;
    }
    current.record
}

/// Classic recursive BST deletion.
///
/// A node with two children keeps its position and takes over the record of
/// its in-order successor; the successor's original node is the one dropped.
pub fn remove_node(root: Link<'_>, id: RecordId) -> Link<'_> {
    let mut node = root?;
    match id.cmp(&node.id()) {
        Ordering::Less => {
            node.left = remove_node(node.left.take(), id);
            Some(node)
        }
        Ordering::Greater => {
            node.right = remove_node(node.right.take(), id);
            Some(node)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => {
                trace!("Splicing out node {}", id);
                right
            }
            (left, None) => {
                trace!("Splicing out node {}", id);
                left
            }
            (left, Some(right)) => {
                let successor = min_record(&right);
                debug!("Node {} takes over successor record {}", id, successor.id);
                node.record = successor;
                node.left = left;
                node.right = remove_node(Some(right), successor.id);
                Some(node)
            }
        },
    }
}

/// Remove `id` after confirming it exists; the flag reports whether anything changed.
pub fn remove_by_id(root: Link<'_>, id: RecordId) -> (Link<'_>, bool) {
    if search_bfs(root.as_deref(), id).is_none() {
        return (root, false);
    }
    (remove_node(root, id), true)
}

pub fn bfs_generic<'c, F>(root: Option<&TreeNode<'c>>, visit: &mut F)
where
    F: FnMut(&TreeNode<'c>),
{
    let mut queue = VecDeque::new();
    queue.extend(root);

    while let Some(current) = queue.pop_front() {
        visit(current);
        queue.extend(current.left());
        queue.extend(current.right());
    }
}

pub fn pre_order_generic<'c, F>(root: Option<&TreeNode<'c>>, visit: &mut F)
where
    F: FnMut(&TreeNode<'c>),
{
    if let Some(node) = root {
        visit(node);
        pre_order_generic(node.left(), visit);
        pre_order_generic(node.right(), visit);
    }
}

pub fn in_order_generic<'c, F>(root: Option<&TreeNode<'c>>, visit: &mut F)
where
    F: FnMut(&TreeNode<'c>),
{
    if let Some(node) = root {
        in_order_generic(node.left(), visit);
        visit(node);
        in_order_generic(node.right(), visit);
    }
}

pub fn post_order_generic<'c, F>(root: Option<&TreeNode<'c>>, visit: &mut F)
where
    F: FnMut(&TreeNode<'c>),
{
    if let Some(node) = root {
        post_order_generic(node.left(), visit);
        post_order_generic(node.right(), visit);
        visit(node);
    }
}

/// Call `visit` once per node in the given order.
pub fn traverse<'c, F>(root: Option<&TreeNode<'c>>, order: Traversal, mut visit: F)
where
    F: FnMut(&TreeNode<'c>),
{
    match order {
        Traversal::Bfs => bfs_generic(root, &mut visit),
        Traversal::PreOrder => pre_order_generic(root, &mut visit),
        Traversal::InOrder => in_order_generic(root, &mut visit),
        Traversal::PostOrder => post_order_generic(root, &mut visit),
    }
}

/// Tear down a subtree: left, then right, then the node itself.
pub fn destroy_subtree(node: Link<'_>) {
    if let Some(mut node) = node {
        destroy_subtree(node.left.take());
        destroy_subtree(node.right.take());
        trace!("Destroying node {}", node.id());
    }
}

/// One owner's collection: a BST root plus convenience wrappers.
#[derive(Debug, Default)]
pub struct Pokedex<'c> {
    root: Link<'c>,
}

impl<'c> Pokedex<'c> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_record(record: &'c Record) -> Self {
        Self {
            root: Some(TreeNode::new(record)),
        }
    }

    pub fn root(&self) -> Option<&TreeNode<'c>> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        let mut count = 0;
        self.traverse(Traversal::PreOrder, |_| count += 1);
        count
    }

    #[instrument(level = "trace", skip(self, node), fields(id = node.id()))]
    pub fn insert(&mut self, node: Box<TreeNode<'c>>) -> InsertOutcome<'c> {
        let (root, outcome) = insert_node(self.root.take(), node);
        self.root = root;
        outcome
    }

    pub fn insert_record(&mut self, record: &'c Record) -> InsertOutcome<'c> {
        self.insert(TreeNode::new(record))
    }

    pub fn search(&self, id: RecordId) -> Option<&TreeNode<'c>> {
        search_bfs(self.root(), id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.search(id).is_some()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: RecordId) -> bool {
        let (root, removed) = remove_by_id(self.root.take(), id);
        self.root = root;
        removed
    }

    pub fn traverse<F>(&self, order: Traversal, visit: F)
    where
        F: FnMut(&TreeNode<'c>),
    {
        traverse(self.root(), order, visit)
    }

    /// Ids in the given visiting order.
    pub fn ids(&self, order: Traversal) -> Vec<RecordId> {
        let mut ids = Vec::new();
        self.traverse(order, |node| ids.push(node.id()));
        ids
    }

    /// Destroy every node, leaving an empty tree.
    pub fn clear(&mut self) {
        destroy_subtree(self.root.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::PokemonType;

    #[test]
    fn min_record_follows_left_spine() {
        let records: Vec<Record> = [5, 3, 1]
            .iter()
            .map(|id| Record::new(*id, format!("r{id}"), PokemonType::Normal, 1, 1, false))
            .collect();
        let mut pokedex = Pokedex::new();
        for record in &records {
            pokedex.insert_record(record);
        }
        let root = pokedex.root().unwrap();
        assert_eq!(min_record(root).id, 1);
    }
}
