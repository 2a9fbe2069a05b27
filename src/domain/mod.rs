//! Domain layer: the tree, its traversals and its derived operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;
pub mod render;
pub mod traversal;

pub use builder::TreeBuilder;
pub use error::{TreeError, TreeResult};
pub use node::BinaryTree;
pub use render::TreeRender;
pub use traversal::{
    BreadthFirstIter, InOrderIter, PostOrderIter, PreOrderIter, Traversal, TraversalOrder,
};
