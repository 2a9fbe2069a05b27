//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::TraversalOrder;

/// Inspect binary trees: traversals, search, paths, map/filter/reduce
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, env = "BINTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// A tree given in level order, e.g. `1,2,3,null,5`.
#[derive(Args, Debug, Clone)]
pub struct TreeArg {
    /// Level-order description; absent slots use the null token (use `--` before a leading '-')
    pub tree: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the tree
    Show {
        #[command(flatten)]
        tree: TreeArg,
    },

    /// List values in traversal order
    Traverse {
        #[command(flatten)]
        tree: TreeArg,
        /// Traversal order (default from settings)
        #[arg(short, long, ignore_case = true)]
        order: Option<TraversalOrder>,
    },

    /// Find the first node holding a value
    Find {
        #[command(flatten)]
        tree: TreeArg,
        /// Value to look for
        #[arg(allow_negative_numbers = true)]
        value: i64,
        /// Traversal order (default from settings)
        #[arg(short, long, ignore_case = true)]
        order: Option<TraversalOrder>,
    },

    /// Show the path from the root to a value
    Path {
        #[command(flatten)]
        tree: TreeArg,
        /// Value to look for
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Transform every value: v * scale + offset
    Map {
        #[command(flatten)]
        tree: TreeArg,
        /// Factor applied to every value
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        scale: i64,
        /// Added after scaling
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },

    /// Keep nodes inside [min, max]; a failing node drops its subtree
    Filter {
        #[command(flatten)]
        tree: TreeArg,
        /// Lower bound, inclusive
        #[arg(long, allow_negative_numbers = true)]
        min: Option<i64>,
        /// Upper bound, inclusive
        #[arg(long, allow_negative_numbers = true)]
        max: Option<i64>,
    },

    /// Sum of all values
    Sum {
        #[command(flatten)]
        tree: TreeArg,
    },

    /// Node count, depth, leaves, sum, min and max
    Stats {
        #[command(flatten)]
        tree: TreeArg,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show the global config file location
    Path,
}
