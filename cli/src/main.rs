//! Bannergrab CLI - Grab banners from TCP services
//!
//! A command-line tool that connects to each target, reads whatever the
//! service sends first, and prints it.

mod commands;

use std::path::PathBuf;
use std::time::Duration;

use bannergrab_core::ConfigStore;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser)]
#[command(name = "bannergrab")]
#[command(author, version, about = "Grab banners from TCP services")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Targets to probe (host:port, [v6]:port, or host). Defaults to the configured list
    targets: Vec<String>,

    /// Connect and read timeout in seconds
    #[arg(short, long, value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Port used for targets given without one
    #[arg(short, long)]
    port: Option<u16>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Use a config file other than ~/.bannergrab/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the configured target list
    Targets {
        #[command(subcommand)]
        action: TargetsAction,
    },

    /// Show current configuration
    Config {
        /// Store a new default timeout in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },
}

#[derive(Subcommand)]
enum TargetsAction {
    /// Add a target to the list
    Add { target: String },
    /// Remove a target from the list
    #[command(alias = "rm")]
    Remove { target: String },
    /// List configured targets
    #[command(alias = "ls")]
    List,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", s))?;
    if secs <= 0.0 {
        return Err("timeout must be greater than zero".to_string());
    }
    let timeout = Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("'{}' is not a usable number of seconds", s))?;
    if timeout.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(timeout)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Logs go to stderr; stdout carries only results.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level)),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = match cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };

    match cli.command {
        Some(Commands::Targets { action }) => match action {
            TargetsAction::Add { target } => commands::targets::add(&store, &target).await?,
            TargetsAction::Remove { target } => commands::targets::remove(&store, &target).await?,
            TargetsAction::List => commands::targets::list(&store, cli.json).await?,
        },
        Some(Commands::Config { timeout }) => {
            if let Some(secs) = timeout {
                commands::config::set_timeout(&store, secs).await?;
            }
            commands::config::show(&store, cli.json).await?;
        }
        None => {
            commands::probe::run(&store, &cli.targets, cli.timeout, cli.port, cli.json).await?;
        }
    }

    Ok(())
}
