use std::fmt;

use termtree::Tree;

use crate::domain::node::BinaryTree;

/// Conversion into a printable `termtree` structure.
pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: fmt::Display> TreeRender for BinaryTree<T> {
    fn to_tree_string(&self) -> Tree<String> {
        render_node(self, None)
    }
}

// Children carry an `L:`/`R:` tag, otherwise a lone child would not show
// which side it hangs on.
fn render_node<T: fmt::Display>(node: &BinaryTree<T>, side: Option<&str>) -> Tree<String> {
    let label = match side {
        Some(side) => format!("{side}: {}", node.value()),
        None => node.value().to_string(),
    };

    let leaves: Vec<_> = [("L", node.left.as_deref()), ("R", node.right.as_deref())]
        .into_iter()
        .filter_map(|(side, child)| child.map(|c| render_node(c, Some(side))))
        .collect();

    Tree::new(label).with_leaves(leaves)
}

impl<T: fmt::Display> fmt::Display for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
