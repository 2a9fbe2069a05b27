//! The tree node and its derived operations.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::mem::ManuallyDrop;
use std::ptr;

use tracing::{instrument, trace};

use crate::domain::traversal::{
    BreadthFirstIter, InOrderIter, PostOrderIter, PreOrderIter, Traversal, TraversalOrder,
};

/// A binary tree node owning its two optional subtrees.
///
/// The shape is whatever the caller links together through `left` and
/// `right`; nothing is balanced or reordered. The value is fixed at
/// construction.
///
/// Every node is also the root of the tree below it, so all operations work
/// on any subtree as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryTree<T> {
    value: T,
    pub left: Option<Box<BinaryTree<T>>>,
    pub right: Option<Box<BinaryTree<T>>>,
}

impl<T> From<T> for BinaryTree<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> BinaryTree<T> {
    /// Creates a leaf node.
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.into_parts().0
    }

    /// Splits the node into its value and both subtrees.
    fn into_parts(self) -> (T, Option<Box<Self>>, Option<Box<Self>>) {
        let mut node = ManuallyDrop::new(self);
        let left = node.left.take();
        let right = node.right.take();
        // SAFETY: `node` is never dropped or touched again, so the value is
        // moved out exactly once.
        let value = unsafe { ptr::read(&node.value) };
        (value, left, right)
    }

    /// Attaches `node` as left child, builder style.
    pub fn with_left(mut self, node: BinaryTree<T>) -> Self {
        self.left = Some(Box::new(node));
        self
    }

    /// Attaches `node` as right child, builder style.
    pub fn with_right(mut self, node: BinaryTree<T>) -> Self {
        self.right = Some(Box::new(node));
        self
    }

    /// Replaces the left subtree, returning the previous one.
    pub fn set_left(&mut self, node: BinaryTree<T>) -> Option<Box<BinaryTree<T>>> {
        self.left.replace(Box::new(node))
    }

    /// Replaces the right subtree, returning the previous one.
    pub fn set_right(&mut self, node: BinaryTree<T>) -> Option<Box<BinaryTree<T>>> {
        self.right.replace(Box::new(node))
    }

    pub fn take_left(&mut self) -> Option<Box<BinaryTree<T>>> {
        self.left.take()
    }

    pub fn take_right(&mut self) -> Option<Box<BinaryTree<T>>> {
        self.right.take()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this tree, never zero.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels; a single node has depth 1.
    ///
    /// Walks level by level with `(node, depth)` pairs on a queue so deep
    /// degenerate trees do not recurse.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::from([(self, 1)]);

        while let Some((node, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()]
                .into_iter()
                .flatten()
            {
                queue.push_back((child, depth + 1));
            }
        }

        max_depth
    }

    /// Leaf nodes from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &BinaryTree<T>> {
        self.iter().filter(|node| node.is_leaf())
    }

    /// Default traversal: in-order (left, node, right).
    pub fn iter(&self) -> InOrderIter<'_, T> {
        InOrderIter::new(self)
    }

    pub fn pre_order_iter(&self) -> PreOrderIter<'_, T> {
        PreOrderIter::new(self)
    }

    pub fn post_order_iter(&self) -> PostOrderIter<'_, T> {
        PostOrderIter::new(self)
    }

    /// Level-order traversal starting at this node.
    pub fn bf_iter(&self) -> BreadthFirstIter<'_, T> {
        BreadthFirstIter::new(self)
    }

    /// Traversal in an order picked at runtime.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, T> {
        Traversal::new(self, order)
    }

    /// Builds a tree of the same shape with every value transformed by `f`.
    ///
    /// The source tree is left untouched and no node is shared with the
    /// result.
    #[instrument(level = "trace", skip_all)]
    pub fn map<U, F>(&self, mut f: F) -> BinaryTree<U>
    where
        F: FnMut(&T) -> U,
    {
        self.map_node(&mut f)
    }

    fn map_node<U, F>(&self, f: &mut F) -> BinaryTree<U>
    where
        F: FnMut(&T) -> U,
    {
        BinaryTree {
            value: f(&self.value),
            left: self.left.as_ref().map(|left| Box::new(left.map_node(f))),
            right: self.right.as_ref().map(|right| Box::new(right.map_node(f))),
        }
    }

    /// Consuming variant of [`map`](Self::map): values are moved into `f`.
    #[instrument(level = "trace", skip_all)]
    pub fn into_map<U, F>(self, mut f: F) -> BinaryTree<U>
    where
        F: FnMut(T) -> U,
    {
        self.into_map_node(&mut f)
    }

    fn into_map_node<U, F>(self, f: &mut F) -> BinaryTree<U>
    where
        F: FnMut(T) -> U,
    {
        let (value, left, right) = self.into_parts();
        BinaryTree {
            value: f(value),
            left: left.map(|left| Box::new((*left).into_map_node(f))),
            right: right.map(|right| Box::new((*right).into_map_node(f))),
        }
    }

    /// First node in in-order for which `predicate` holds.
    pub fn find<P>(&self, predicate: P) -> Option<&BinaryTree<T>>
    where
        P: FnMut(&BinaryTree<T>) -> bool,
    {
        self.find_in(self.iter(), predicate)
    }

    /// First node of `nodes` for which `predicate` holds.
    ///
    /// `nodes` is usually one of this tree's traversals, e.g.
    /// `tree.find_in(tree.bf_iter(), |n| ...)`. Stops pulling at the first
    /// match.
    pub fn find_in<'a, I, P>(&'a self, nodes: I, mut predicate: P) -> Option<&'a BinaryTree<T>>
    where
        I: IntoIterator<Item = &'a BinaryTree<T>>,
        P: FnMut(&BinaryTree<T>) -> bool,
    {
        nodes.into_iter().find(|node| predicate(node))
    }

    /// Calls `f` once per node, in-order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&BinaryTree<T>),
    {
        self.for_each_in(self.iter(), f)
    }

    pub fn for_each_in<'a, I, F>(&'a self, nodes: I, mut f: F)
    where
        I: IntoIterator<Item = &'a BinaryTree<T>>,
        F: FnMut(&BinaryTree<T>),
    {
        for node in nodes {
            f(node);
        }
    }

    /// Collects the nodes in-order.
    pub fn flat(&self) -> Vec<&BinaryTree<T>> {
        self.flat_in(self.iter())
    }

    pub fn flat_in<'a, I>(&'a self, nodes: I) -> Vec<&'a BinaryTree<T>>
    where
        I: IntoIterator<Item = &'a BinaryTree<T>>,
    {
        nodes.into_iter().collect()
    }

    /// Folds the in-order sequence starting from `init`.
    ///
    /// This is `reduce` with an initial value: the accumulator type `R` is
    /// free and folding starts at the first node.
    #[instrument(level = "trace", skip_all)]
    pub fn fold<R, F>(&self, init: R, f: F) -> R
    where
        F: FnMut(R, &BinaryTree<T>) -> R,
    {
        self.iter().fold(init, f)
    }
}

impl<T: Clone> BinaryTree<T> {
    /// Structural filter.
    ///
    /// Returns `None` when this node fails `predicate`. Otherwise a new node
    /// with a copy of the value, whose children are the filtered source
    /// children. A failing node drops its whole subtree, matching
    /// descendants included; nothing is re-linked upwards.
    #[instrument(level = "trace", skip_all)]
    pub fn filter<P>(&self, mut predicate: P) -> Option<BinaryTree<T>>
    where
        P: FnMut(&BinaryTree<T>) -> bool,
    {
        self.filter_node(&mut predicate)
    }

    fn filter_node<P>(&self, predicate: &mut P) -> Option<BinaryTree<T>>
    where
        P: FnMut(&BinaryTree<T>) -> bool,
    {
        if !predicate(self) {
            return None;
        }
        let mut node = BinaryTree::new(self.value.clone());
        node.left = self
            .left
            .as_ref()
            .and_then(|left| left.filter_node(predicate))
            .map(Box::new);
        node.right = self
            .right
            .as_ref()
            .and_then(|right| right.filter_node(predicate))
            .map(Box::new);
        Some(node)
    }

    /// Path from this node down to the first node matching `predicate`.
    ///
    /// The result is a chain: every node has at most one child, on the side
    /// leading to the target. The current node is checked first, then the
    /// left subtree, then the right one.
    #[instrument(level = "trace", skip_all)]
    pub fn get_path_of_node<P>(&self, mut predicate: P) -> Option<BinaryTree<T>>
    where
        P: FnMut(&BinaryTree<T>) -> bool,
    {
        self.path_to(&mut predicate)
    }

    fn path_to<P>(&self, predicate: &mut P) -> Option<BinaryTree<T>>
    where
        P: FnMut(&BinaryTree<T>) -> bool,
    {
        if predicate(self) {
            return Some(BinaryTree::new(self.value.clone()));
        }
        if let Some(found) = self.left.as_ref().and_then(|left| left.path_to(predicate)) {
            trace!("path continues left");
            return Some(BinaryTree::new(self.value.clone()).with_left(found));
        }
        if let Some(found) = self.right.as_ref().and_then(|right| right.path_to(predicate)) {
            trace!("path continues right");
            return Some(BinaryTree::new(self.value.clone()).with_right(found));
        }
        None
    }

    /// Reduces the in-order sequence without an initial value.
    ///
    /// The first node seeds the accumulator, folding starts at the second
    /// node. With a single node nothing is folded and that very node comes
    /// back borrowed; otherwise the result is the last node built by `f`.
    #[instrument(level = "trace", skip_all)]
    pub fn reduce<F>(&self, mut f: F) -> Cow<'_, BinaryTree<T>>
    where
        F: FnMut(&BinaryTree<T>, &BinaryTree<T>) -> BinaryTree<T>,
    {
        let mut nodes = self.iter();
        let Some(first) = nodes.next() else {
            return Cow::Borrowed(self);
        };
        let mut acc = Cow::Borrowed(first);
        for node in nodes {
            acc = Cow::Owned(f(acc.as_ref(), node));
        }
        acc
    }
}

/// Frees the subtrees from an explicit stack, so dropping a deep one-sided
/// tree does not recurse once per level.
impl<T> Drop for BinaryTree<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<BinaryTree<T>>> =
            self.left.take().into_iter().chain(self.right.take()).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<'a, T> IntoIterator for &'a BinaryTree<T> {
    type Item = &'a BinaryTree<T>;
    type IntoIter = InOrderIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    //       1
    //      / \
    //     2   3
    //    / \
    //   4   5
    fn sample() -> BinaryTree<i32> {
        BinaryTree::new(1)
            .with_left(
                BinaryTree::new(2)
                    .with_left(BinaryTree::new(4))
                    .with_right(BinaryTree::new(5)),
            )
            .with_right(BinaryTree::new(3))
    }

    fn values<'a>(iter: impl IntoIterator<Item = &'a BinaryTree<i32>>) -> Vec<i32> {
        iter.into_iter().map(|node| *node.value()).collect()
    }

    #[test]
    fn test_new_has_no_children() {
        let node = BinaryTree::new(1);
        assert_eq!(*node.value(), 1);
        assert!(node.left.is_none());
        assert!(node.right.is_none());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_set_left_returns_displaced_subtree() {
        let mut node = BinaryTree::new(1);
        assert!(node.set_left(BinaryTree::new(2)).is_none());
        let old = node.set_left(BinaryTree::new(3)).unwrap();
        assert_eq!(*old.value(), 2);
        assert_eq!(*node.take_left().unwrap().value(), 3);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_size_depth_leaves() {
        let tree = sample();
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(values(tree.leaves()), vec![4, 5, 3]);
        assert_eq!(BinaryTree::new(0).depth(), 1);
    }

    #[test]
    fn test_for_loop_uses_in_order() {
        let tree = sample();
        let mut seen = Vec::new();
        for node in &tree {
            seen.push(*node.value());
        }
        assert_eq!(seen, vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn test_find_short_circuits() {
        let tree = sample();
        let mut calls = 0;
        let found = tree.find(|node| {
            calls += 1;
            *node.value() == 2
        });
        assert_eq!(found.map(|n| *n.value()), Some(2));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_find_returns_subtree_reference() {
        let tree = sample();
        let found = tree.find(|node| *node.value() == 2).unwrap();
        assert!(std::ptr::eq(found, tree.left.as_deref().unwrap()));
    }

    #[test]
    fn test_filter_prunes_below_failing_node() {
        // 2 fails, so 4 is dropped even though it passes
        let tree = sample();
        let filtered = tree.filter(|node| *node.value() != 2).unwrap();
        assert_eq!(values(&filtered), vec![1, 3]);
        assert!(filtered.left.is_none());
    }

    #[test]
    fn test_into_map_moves_values() {
        let tree = BinaryTree::new(String::from("a")).with_right(BinaryTree::new(String::from("b")));
        let lengths = tree.into_map(|s| s.len());
        assert_eq!(lengths, BinaryTree::new(1).with_right(BinaryTree::new(1)));
    }

    #[test]
    fn test_reduce_single_node_is_borrowed() {
        let tree = BinaryTree::new(9);
        let reduced = tree.reduce(|_, _| unreachable!("nothing to fold"));
        assert!(matches!(reduced, Cow::Borrowed(node) if std::ptr::eq(node, &tree)));
    }

    #[test]
    fn test_into_value_releases_subtrees_once() {
        let marker = Rc::new(());
        let tree = BinaryTree::new(Rc::clone(&marker))
            .with_left(BinaryTree::new(Rc::clone(&marker)))
            .with_right(BinaryTree::new(Rc::clone(&marker)));
        assert_eq!(Rc::strong_count(&marker), 4);

        let value = tree.into_value();
        assert_eq!(Rc::strong_count(&marker), 2);
        drop(value);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_drop_releases_every_value() {
        let marker = Rc::new(());
        let mut tree = BinaryTree::new(Rc::clone(&marker));
        for _ in 0..10 {
            tree = BinaryTree::new(Rc::clone(&marker))
                .with_left(tree)
                .with_right(BinaryTree::new(Rc::clone(&marker)));
        }
        assert_eq!(Rc::strong_count(&marker), 22);
        drop(tree);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_into_map_moves_every_value_out() {
        let marker = Rc::new(());
        let tree = BinaryTree::new(Rc::clone(&marker)).with_left(BinaryTree::new(Rc::clone(&marker)));
        let counts = tree.into_map(|rc| Rc::strong_count(&rc));
        assert_eq!(Rc::strong_count(&marker), 1);
        assert_eq!(counts.size(), 2);
    }
}
