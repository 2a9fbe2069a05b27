//! Generic binary tree with lazy traversals.
//!
//! A [`BinaryTree`] node owns an immutable value and two optional subtrees
//! that the caller links freely. Four traversal orders are available as
//! restartable iterators (in-order is the default), and the derived
//! operations (map, filter, find, for_each, flat, get_path_of_node,
//! reduce/fold) are built on top of them.
//!
//! ```
//! use bintree::BinaryTree;
//!
//! let mut root = BinaryTree::new(1);
//! root.left = Some(Box::new(BinaryTree::new(2)));
//! root.right = Some(Box::new(BinaryTree::new(3)));
//!
//! let values: Vec<i32> = root.iter().map(|node| *node.value()).collect();
//! assert_eq!(values, vec![2, 1, 3]);
//! assert_eq!(root.fold(0, |acc, node| acc + node.value()), 6);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    BinaryTree, BreadthFirstIter, InOrderIter, PostOrderIter, PreOrderIter, Traversal,
    TraversalOrder, TreeBuilder, TreeError, TreeRender, TreeResult,
};
