//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, TreeArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{BinaryTree, TraversalOrder, TreeBuilder, TreeRender};

pub const EMPTY_FILTER_WARNING: &str = "root filtered out, tree is empty";

/// Summary numbers of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub depth: usize,
    pub leaves: usize,
    pub sum: i128,
    pub min: i64,
    pub max: i64,
}

impl TreeStats {
    /// `(label, value)` pairs in display order.
    pub fn rows(&self) -> [(&'static str, String); 6] {
        [
            ("nodes", self.nodes.to_string()),
            ("depth", self.depth.to_string()),
            ("leaves", self.leaves.to_string()),
            ("sum", self.sum.to_string()),
            ("min", self.min.to_string()),
            ("max", self.max.to_string()),
        ]
    }

    pub fn of(tree: &BinaryTree<i64>) -> Self {
        let first = *tree.value();
        let (min, max) = tree.fold((first, first), |(min, max), node| {
            (min.min(*node.value()), max.max(*node.value()))
        });
        Self {
            nodes: tree.size(),
            depth: tree.depth(),
            leaves: tree.leaves().count(),
            sum: sum(tree),
            min,
            max,
        }
    }
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    let settings = match command {
        Commands::Completion { .. } => Settings::default(),
        _ => Settings::load(cli.config.as_deref())?,
    };
    debug!(?settings, "settings loaded");
    run_command(&settings, command)
}

/// Runs one command against already loaded settings.
pub fn run_command(settings: &Settings, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Show { tree } => _show(settings, tree),
        Commands::Traverse { tree, order } => _traverse(settings, tree, *order),
        Commands::Find { tree, value, order } => _find(settings, tree, *value, *order),
        Commands::Path { tree, value } => _path(settings, tree, *value),
        Commands::Map {
            tree,
            scale,
            offset,
        } => _map(settings, tree, *scale, *offset),
        Commands::Filter { tree, min, max } => _filter(settings, tree, *min, *max),
        Commands::Sum { tree } => _sum(settings, tree),
        Commands::Stats { tree } => _stats(settings, tree),
        Commands::Config { command } => _config(settings, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn parse_tree(settings: &Settings, arg: &TreeArg) -> CliResult<BinaryTree<i64>> {
    Ok(settings.builder().parse(&arg.tree)?)
}

/// Values of `nodes` separated by single spaces.
pub fn values_line<'a>(nodes: impl IntoIterator<Item = &'a BinaryTree<i64>>) -> String {
    nodes.into_iter().map(|node| node.value()).join(" ")
}

/// Pre-order values of a path tree, e.g. `1 -> 2 -> 5`.
pub fn path_line(path: &BinaryTree<i64>) -> String {
    path.pre_order_iter().map(|node| node.value()).join(" -> ")
}

pub fn sum(tree: &BinaryTree<i64>) -> i128 {
    tree.fold(0i128, |acc, node| acc + i128::from(*node.value()))
}

/// Values of `tree` in `order`, e.g. `4 2 5 1 3`.
pub fn traverse_line(tree: &BinaryTree<i64>, order: TraversalOrder) -> String {
    values_line(tree.traverse(order))
}

/// Level order of the tree with every value mapped to `v * scale + offset`,
/// saturating at the `i64` bounds.
pub fn map_line(builder: &TreeBuilder, tree: &BinaryTree<i64>, scale: i64, offset: i64) -> String {
    let mapped = tree.map(|v| v.saturating_mul(scale).saturating_add(offset));
    builder.format(&mapped)
}

/// Level order of the nodes kept by an inclusive range filter; `None` when
/// the root itself falls outside the range.
pub fn filter_line(
    builder: &TreeBuilder,
    tree: &BinaryTree<i64>,
    min: Option<i64>,
    max: Option<i64>,
) -> Option<String> {
    let lo = min.unwrap_or(i64::MIN);
    let hi = max.unwrap_or(i64::MAX);
    tree.filter(|node| (lo..=hi).contains(node.value()))
        .map(|filtered| builder.format(&filtered))
}

#[instrument(level = "debug", skip(settings))]
fn _show(settings: &Settings, arg: &TreeArg) -> CliResult<()> {
    let tree = parse_tree(settings, arg)?;
    print!("{}", tree.to_tree_string());
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _traverse(settings: &Settings, arg: &TreeArg, order: Option<TraversalOrder>) -> CliResult<()> {
    let tree = parse_tree(settings, arg)?;
    output::info(&traverse_line(&tree, order.unwrap_or(settings.order)));
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _find(
    settings: &Settings,
    arg: &TreeArg,
    value: i64,
    order: Option<TraversalOrder>,
) -> CliResult<()> {
    let tree = parse_tree(settings, arg)?;
    let order = order.unwrap_or(settings.order);
    let mut visited = 0usize;
    let found = tree.find_in(tree.traverse(order), |node| {
        visited += 1;
        *node.value() == value
    });
    match found {
        Some(node) => {
            output::found(
                &format!("{value} after {visited} node(s) in {order}"),
                &node.to_tree_string(),
            );
            Ok(())
        }
        None => Err(CliError::NotFound(value.to_string())),
    }
}

#[instrument(level = "debug", skip(settings))]
fn _path(settings: &Settings, arg: &TreeArg, value: i64) -> CliResult<()> {
    let tree = parse_tree(settings, arg)?;
    let path = tree
        .get_path_of_node(|node| *node.value() == value)
        .ok_or_else(|| CliError::NotFound(value.to_string()))?;
    output::info(&path_line(&path));
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _map(settings: &Settings, arg: &TreeArg, scale: i64, offset: i64) -> CliResult<()> {
    let tree = parse_tree(settings, arg)?;
    output::info(&map_line(&settings.builder(), &tree, scale, offset));
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _filter(settings: &Settings, arg: &TreeArg, min: Option<i64>, max: Option<i64>) -> CliResult<()> {
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(CliError::InvalidArgs(format!("--min {lo} is above --max {hi}")));
        }
    }
    let tree = parse_tree(settings, arg)?;
    match filter_line(&settings.builder(), &tree, min, max) {
        Some(line) => output::info(&line),
        None => output::warning(EMPTY_FILTER_WARNING),
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _sum(settings: &Settings, arg: &TreeArg) -> CliResult<()> {
    let tree = parse_tree(settings, arg)?;
    output::info(&sum(&tree));
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _stats(settings: &Settings, arg: &TreeArg) -> CliResult<()> {
    let tree = parse_tree(settings, arg)?;
    let stats = TreeStats::of(&tree);
    output::header("Tree statistics");
    for (label, value) in stats.rows() {
        output::stat(label, &value);
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no home directory, global config disabled"),
        },
    }
    Ok(())
}
