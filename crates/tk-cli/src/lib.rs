//! Timekeep CLI library.
//!
//! This crate provides the CLI interface for tracking time in markdown notes.

mod cli;
pub mod commands;
mod config;
pub mod format;
mod tracker;

pub use cli::{Cli, Commands, Target};
pub use config::Config;
pub use tracker::TrackerFile;
