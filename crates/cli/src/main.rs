//! Slider CLI - slider command

use clap::{Args, Parser, Subcommand};
use anyhow::Result;
use std::path::PathBuf;
use tracing::Level;

mod cmd;

/// Slider - print a control's value once it stops changing
///
/// Each line read from stdin sets the hosted control's value. A value is
/// printed after the control has been quiet for the debounce window.
#[derive(Parser)]
#[command(name = "slider")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// Config file (default: <config dir>/slider/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct RunArgs {
    /// Selector of the control to observe
    #[arg(long)]
    selector: Option<String>,

    /// Quiet period before a value settles, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Initial value of the hosted control
    #[arg(long)]
    initial: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Show the default config file path
    Path,
    /// Print an example config file
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries settled values only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.command {
        None => {
            let options = cmd::run::RunOptions {
                config: cli.config,
                selector: cli.run.selector,
                debounce_ms: cli.run.debounce_ms,
                initial: cli.run.initial,
            };
            cmd::run::run(options).await
        }
        Some(Commands::Config(config_cmd)) => match config_cmd {
            ConfigCommands::Show => cmd::config::run_show(cli.config.as_deref()).await,
            ConfigCommands::Path => cmd::config::run_path().await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
