//! Lazy traversal iterators.
//!
//! Every iterator borrows the tree and keeps its own explicit stack or queue,
//! so nothing is computed before the element is pulled and dropping the
//! iterator ends the walk. Each call on the tree starts a fresh iterator.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::error::TreeError;
use crate::domain::node::BinaryTree;

/// Visitation order of a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree. The default order.
    #[default]
    #[serde(alias = "depth-first")]
    #[value(aliases = ["inorder", "depth-first", "df"])]
    InOrder,
    /// Node, left subtree, right subtree.
    #[value(aliases = ["preorder", "pre"])]
    PreOrder,
    /// Left subtree, right subtree, node.
    #[value(aliases = ["postorder", "post"])]
    PostOrder,
    /// Level by level, left to right.
    #[value(aliases = ["level-order", "bf"])]
    BreadthFirst,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::InOrder,
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::BreadthFirst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::PostOrder => "post-order",
            TraversalOrder::BreadthFirst => "breadth-first",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalOrder {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "in-order" | "inorder" | "depth-first" | "df" => Ok(TraversalOrder::InOrder),
            "pre-order" | "preorder" | "pre" => Ok(TraversalOrder::PreOrder),
            "post-order" | "postorder" | "post" => Ok(TraversalOrder::PostOrder),
            "breadth-first" | "level-order" | "bf" => Ok(TraversalOrder::BreadthFirst),
            _ => Err(TreeError::UnknownOrder(s.to_string())),
        }
    }
}

/// In-order iterator: keeps the pending left spine on a stack.
#[derive(Debug)]
pub struct InOrderIter<'a, T> {
    stack: Vec<&'a BinaryTree<T>>,
}

impl<'a, T> InOrderIter<'a, T> {
    pub(crate) fn new(root: &'a BinaryTree<T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(Some(root));
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a BinaryTree<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for InOrderIter<'a, T> {
    type Item = &'a BinaryTree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node)
    }
}

impl<T> FusedIterator for InOrderIter<'_, T> {}

/// Pre-order iterator.
#[derive(Debug)]
pub struct PreOrderIter<'a, T> {
    stack: Vec<&'a BinaryTree<T>>,
}

impl<'a, T> PreOrderIter<'a, T> {
    pub(crate) fn new(root: &'a BinaryTree<T>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = &'a BinaryTree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // right first so that left is popped first
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(node)
    }
}

impl<T> FusedIterator for PreOrderIter<'_, T> {}

/// Post-order iterator.
///
/// A node is pushed once unexpanded; when popped the first time it goes back
/// on the stack marked as expanded, followed by its children. It is yielded
/// only on the second pop, after both subtrees are done.
#[derive(Debug)]
pub struct PostOrderIter<'a, T> {
    stack: Vec<(&'a BinaryTree<T>, bool)>,
}

impl<'a, T> PostOrderIter<'a, T> {
    pub(crate) fn new(root: &'a BinaryTree<T>) -> Self {
        Self {
            stack: vec![(root, false)],
        }
    }
}

impl<'a, T> Iterator for PostOrderIter<'a, T> {
    type Item = &'a BinaryTree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            if let Some(right) = node.right.as_deref() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left.as_deref() {
                self.stack.push((left, false));
            }
        }
        None
    }
}

impl<T> FusedIterator for PostOrderIter<'_, T> {}

/// Breadth-first iterator backed by a FIFO queue.
#[derive(Debug)]
pub struct BreadthFirstIter<'a, T> {
    queue: VecDeque<&'a BinaryTree<T>>,
}

impl<'a, T> BreadthFirstIter<'a, T> {
    pub(crate) fn new(root: &'a BinaryTree<T>) -> Self {
        Self {
            queue: VecDeque::from([root]),
        }
    }
}

impl<'a, T> Iterator for BreadthFirstIter<'a, T> {
    type Item = &'a BinaryTree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some(left) = node.left.as_deref() {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right.as_deref() {
            self.queue.push_back(right);
        }
        Some(node)
    }
}

impl<T> FusedIterator for BreadthFirstIter<'_, T> {}

/// Traversal chosen at runtime from a [`TraversalOrder`].
#[derive(Debug)]
pub enum Traversal<'a, T> {
    InOrder(InOrderIter<'a, T>),
    PreOrder(PreOrderIter<'a, T>),
    PostOrder(PostOrderIter<'a, T>),
    BreadthFirst(BreadthFirstIter<'a, T>),
}

impl<'a, T> Traversal<'a, T> {
    pub(crate) fn new(root: &'a BinaryTree<T>, order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::InOrder => Traversal::InOrder(InOrderIter::new(root)),
            TraversalOrder::PreOrder => Traversal::PreOrder(PreOrderIter::new(root)),
            TraversalOrder::PostOrder => Traversal::PostOrder(PostOrderIter::new(root)),
            TraversalOrder::BreadthFirst => Traversal::BreadthFirst(BreadthFirstIter::new(root)),
        }
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a BinaryTree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::InOrder(iter) => iter.next(),
            Traversal::PreOrder(iter) => iter.next(),
            Traversal::PostOrder(iter) => iter.next(),
            Traversal::BreadthFirst(iter) => iter.next(),
        }
    }
}

impl<T> FusedIterator for Traversal<'_, T> {}
