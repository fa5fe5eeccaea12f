/*
Renders a pokedex tree for the terminal with termtree.

Left child is pushed before right child, so the printed branches read top to
bottom in ascending id order below each node.
 */
use termtree::Tree;

use crate::domain::tree::{Pokedex, TreeNode};

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

fn label(node: &TreeNode<'_>) -> String {
    format!("{} ({})", node.record().name, node.id())
}

fn build_tree(node: &TreeNode<'_>) -> Tree<String> {
    let leaves: Vec<_> = node.left().into_iter().chain(node.right()).map(build_tree).collect();
    Tree::new(label(node)).with_leaves(leaves)
}

impl TreeRender for TreeNode<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        build_tree(self)
    }
}

impl TreeRender for Pokedex<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => build_tree(root),
            None => Tree::new("Empty pokedex".to_string()),
        }
    }
}
