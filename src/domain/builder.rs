//! Tree builder for level-order tree descriptions.
//!
//! A level-order description lists the slots of the tree breadth first, the
//! way `[1, 2, 3, null, 5]` is commonly written: every present node claims
//! the next two slots as its left and right child, absent slots claim
//! nothing.

use std::collections::VecDeque;
use std::fmt::Display;
use std::iter;
use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::BinaryTree;

pub const DEFAULT_SEPARATOR: &str = ",";
pub const DEFAULT_NULL_TOKEN: &str = "null";

/// Child slot indices of one level-order slot.
#[derive(Debug, Clone, Copy, Default)]
struct Links {
    left: Option<usize>,
    right: Option<usize>,
}

impl<T> BinaryTree<T> {
    /// Builds a tree from level-order slots.
    ///
    /// The first slot is the root and must be present. Trailing absent slots
    /// are ignored; a present slot that comes after every possible parent
    /// has been served is rejected.
    #[instrument(level = "debug", skip_all)]
    pub fn from_level_order<I>(slots: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let slots: Vec<Option<T>> = slots.into_iter().collect();
        match slots.first() {
            None => return Err(TreeError::EmptyInput),
            Some(None) => return Err(TreeError::MissingRoot),
            Some(Some(_)) => {}
        }

        let mut links = vec![Links::default(); slots.len()];
        let mut parents = VecDeque::from([0]);
        let mut cursor = 1;

        while let Some(parent) = parents.pop_front() {
            for is_left in [true, false] {
                if cursor >= slots.len() {
                    break;
                }
                if slots[cursor].is_some() {
                    let link = &mut links[parent];
                    if is_left {
                        link.left = Some(cursor);
                    } else {
                        link.right = Some(cursor);
                    }
                    parents.push_back(cursor);
                }
                cursor += 1;
            }
        }

        if let Some(position) = (cursor..slots.len()).find(|&i| slots[i].is_some()) {
            return Err(TreeError::OrphanValue { position });
        }
        debug!(slots = slots.len(), consumed = cursor, "level order linked");

        assemble(slots, &links).ok_or(TreeError::MissingRoot)
    }

    /// Level-order slots of this tree, trailing absent slots trimmed.
    ///
    /// Inverse of [`from_level_order`](Self::from_level_order).
    pub fn to_level_order(&self) -> Vec<Option<&T>> {
        let mut slots = Vec::new();
        let mut queue = VecDeque::from([Some(self)]);

        while let Some(slot) = queue.pop_front() {
            match slot {
                Some(node) => {
                    slots.push(Some(node.value()));
                    queue.push_back(node.left.as_deref());
                    queue.push_back(node.right.as_deref());
                }
                None => slots.push(None),
            }
        }

        while matches!(slots.last(), Some(None)) {
            slots.pop();
        }
        slots
    }
}

/// Builds nodes bottom-up in reverse slot order. A child always sits after
/// its parent, so both children are finished when the parent is reached.
fn assemble<T>(slots: Vec<Option<T>>, links: &[Links]) -> Option<BinaryTree<T>> {
    let mut nodes: Vec<Option<BinaryTree<T>>> = iter::repeat_with(|| None).take(slots.len()).collect();

    for (index, slot) in slots.into_iter().enumerate().rev() {
        let Some(value) = slot else { continue };
        let Links { left, right } = links[index];
        let mut node = BinaryTree::new(value);
        node.left = left.and_then(|child| nodes[child].take()).map(Box::new);
        node.right = right.and_then(|child| nodes[child].take()).map(Box::new);
        nodes[index] = Some(node);
    }
    nodes.into_iter().next().flatten()
}

/// Parses and formats delimited level-order descriptions.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    separator: String,
    null_token: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            null_token: DEFAULT_NULL_TOKEN.to_string(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_null_token(mut self, null_token: impl Into<String>) -> Self {
        self.null_token = null_token.into();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn null_token(&self) -> &str {
        &self.null_token
    }

    /// Parse a description such as `"1,2,3,null,5"`.
    ///
    /// Tokens are trimmed. The null token and empty tokens are absent slots;
    /// enclosing brackets are accepted and ignored. A whitespace separator
    /// matches any run of whitespace, so `"1  2"` is the same as `"1 2"`.
    #[instrument(level = "debug", skip(self))]
    pub fn parse<T>(&self, input: &str) -> TreeResult<BinaryTree<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let body = input
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();
        if body.is_empty() {
            return Err(TreeError::EmptyInput);
        }

        let tokens: Vec<&str> = if self.separator.trim().is_empty() {
            body.split_whitespace().collect()
        } else {
            body.split(self.separator.as_str()).map(str::trim).collect()
        };
        let slots = tokens
            .into_iter()
            .enumerate()
            .map(|(position, token)| self.parse_slot(position, token))
            .collect::<TreeResult<Vec<Option<T>>>>()?;
        trace!(slots = slots.len(), "tokens parsed");

        BinaryTree::from_level_order(slots)
    }

    fn parse_slot<T>(&self, position: usize, token: &str) -> TreeResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        if token.is_empty() || token.eq_ignore_ascii_case(&self.null_token) {
            return Ok(None);
        }
        token
            .parse()
            .map(Some)
            .map_err(|e: T::Err| TreeError::InvalidValue {
                token: token.to_string(),
                position,
                reason: e.to_string(),
            })
    }

    /// Format a tree back into a description this builder can parse.
    pub fn format<T: Display>(&self, tree: &BinaryTree<T>) -> String {
        tree.to_level_order()
            .into_iter()
            .map(|slot| match slot {
                Some(value) => value.to_string(),
                None => self.null_token.clone(),
            })
            .join(&self.separator)
    }
}
