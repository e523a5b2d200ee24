//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Time tracking inside markdown notes.
///
/// Reads and writes `timekeep` code blocks, the same format used by the
/// Obsidian timekeep plugin.
#[derive(Debug, Parser)]
#[command(name = "tk", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as if the current time were this (ISO 8601 or e.g. "2 hours ago").
    #[arg(long, global = true)]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// The note and tracker a command operates on.
#[derive(Debug, Args)]
pub struct Target {
    /// Markdown file holding the tracker.
    pub file: PathBuf,

    /// Which `timekeep` block in the file to use (0-based).
    #[arg(short, long, default_value_t = 0)]
    pub block: usize,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append an empty tracker block to a file.
    Init {
        /// Markdown file to append to (created if missing).
        file: PathBuf,
    },

    /// Show the running entry, totals and the entry tree.
    Status {
        #[command(flatten)]
        target: Target,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start a new entry.
    Start {
        #[command(flatten)]
        target: Target,

        /// Name for the new entry (defaults to "Block N" or "Part N").
        #[arg(short, long, default_value = "")]
        name: String,

        /// Start a sub-entry of the entry at this path (e.g. "0" or "1.0").
        #[arg(long)]
        into: Option<String>,
    },

    /// Stop the running entry.
    Stop {
        #[command(flatten)]
        target: Target,
    },

    /// Remove the entry at a path.
    Remove {
        #[command(flatten)]
        target: Target,

        /// Entry path (e.g. "0" or "1.0").
        path: String,
    },

    /// Rename the entry at a path.
    Rename {
        #[command(flatten)]
        target: Target,

        /// Entry path (e.g. "0" or "1.0").
        path: String,

        /// New name.
        name: String,
    },

    /// Show per-day totals for the current week.
    Week {
        #[command(flatten)]
        target: Target,
    },
}
