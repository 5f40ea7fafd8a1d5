//! Command-line argument definitions for the Kindred CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the traversal root,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Kindred family tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the family data file (TOML)
    #[arg(help = "Path to the family data file")]
    pub input: String,

    /// Path to the output layout file (JSON)
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Member id to use as the traversal root (defaults to the first member)
    #[arg(short, long)]
    pub root: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
