//! Materialize a tree into a borrowed buffer for name ordering.

use std::cmp::Ordering;

use tracing::instrument;

use crate::domain::tree::TreeNode;

/// Borrowed node references, in ascending id order when filled by [`collect_all`].
pub type NodeBuffer<'a, 'c> = Vec<&'a TreeNode<'c>>;

/// Append every node of the subtree in in-order sequence.
pub fn collect_all<'a, 'c>(root: Option<&'a TreeNode<'c>>, buffer: &mut NodeBuffer<'a, 'c>) {
    if let Some(node) = root {
        collect_all(node.left(), buffer);
        buffer.push(node);
        collect_all(node.right(), buffer);
    }
}

/// Three-way comparison on record names (byte order, case sensitive).
///
/// Distinct records with equal names compare `Equal`.
pub fn compare_by_name(a: &TreeNode<'_>, b: &TreeNode<'_>) -> Ordering {
    a.record().name.as_bytes().cmp(b.record().name.as_bytes())
}

/// Stable sort by name; equal names keep their collected (id) order.
pub fn sort_by_name(buffer: &mut NodeBuffer<'_, '_>) {
    buffer.sort_by(|a, b| compare_by_name(a, b));
}

/// Nodes of the subtree ordered alphabetically; the tree itself is untouched.
#[instrument(level = "debug", skip(root))]
pub fn alphabetical<'a, 'c>(root: Option<&'a TreeNode<'c>>) -> NodeBuffer<'a, 'c> {
    let mut buffer = NodeBuffer::new();
    collect_all(root, &mut buffer);
    sort_by_name(&mut buffer);
    buffer
}

/// Visit nodes alphabetically.
pub fn visit_alphabetical<'c, F>(root: Option<&TreeNode<'c>>, mut visit: F)
where
    F: FnMut(&TreeNode<'c>),
{
    for node in alphabetical(root) {
        visit(node);
    }
}
