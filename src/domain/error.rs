//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while building a tree from a level-order description.
///
/// The tree operations themselves are total; only construction from
/// untrusted input can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("empty tree description")]
    EmptyInput,

    #[error("level order must start with a root value")]
    MissingRoot,

    #[error("value at position {position} has no parent slot to attach to")]
    OrphanValue { position: usize },

    #[error("unknown traversal order: {0}")]
    UnknownOrder(String),

    #[error("invalid value '{token}' at position {position}: {reason}")]
    InvalidValue {
        token: String,
        position: usize,
        reason: String,
    },
}

pub type TreeResult<T> = Result<T, TreeError>;
