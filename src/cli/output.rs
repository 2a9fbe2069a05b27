//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically. Data goes to
//! stdout uncolored so it can be piped; diagnostics go to stderr.

use std::fmt::Display;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print a search hit: green "found" line on stderr, the subtree on stdout
pub fn found(summary: &(impl Display + ?Sized), subtree: &(impl Display + ?Sized)) {
    eprintln!("{} {}", "found".green().bold(), summary);
    print!("{}", subtree);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print an aligned `label: value` statistic line
pub fn stat(label: &str, value: &(impl Display + ?Sized)) {
    let label = format!("{label}:");
    println!("  {}{}", format!("{label:<8}").green(), value);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
