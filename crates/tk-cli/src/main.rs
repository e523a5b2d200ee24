use anyhow::{Context, Result};
use chrono::{Local, SubsecRound, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tk_cli::commands::{init, remove, rename, start, status, stop, util, week};
use tk_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    // Clock readings are kept to whole milliseconds.
    let clock = Utc::now().trunc_subsecs(3);
    let now = match &cli.at {
        Some(at) => util::parse_datetime(at, clock)?,
        None => clock,
    };
    let local_now = now.with_timezone(&Local);

    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Init { file } => init::run(&mut stdout, file)?,
        Commands::Status { target, json } => {
            status::run(&mut stdout, target, &config, &local_now, *json)?;
        }
        Commands::Start { target, name, into } => {
            start::run(&mut stdout, target, name, into.as_deref(), now)?;
        }
        Commands::Stop { target } => stop::run(&mut stdout, target, &config, now)?,
        Commands::Remove { target, path } => remove::run(&mut stdout, target, path)?,
        Commands::Rename { target, path, name } => {
            rename::run(&mut stdout, target, path, name)?;
        }
        Commands::Week { target } => week::run(&mut stdout, target, &config, &local_now)?,
    }

    Ok(())
}
