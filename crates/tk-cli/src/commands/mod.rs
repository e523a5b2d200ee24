//! CLI subcommand implementations.

pub mod init;
pub mod remove;
pub mod rename;
pub mod start;
pub mod status;
pub mod stop;
pub mod util;
pub mod week;
