//! # GPA Bot Main Entry Point
//!
//! File: bot/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `gpabot` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on the verbosity flags (or `RUST_LOG`)
//! - Routing execution to the subcommand handlers
//!
//! ## Examples
//!
//! ```bash
//! # Start the bot and the liveness endpoint
//! TELEGRAM_TOKEN=123:abc gpabot -v run
//!
//! # Try the conversation in the terminal
//! gpabot calc --name Sam
//! ```
//!
use clap::Parser;
use gpabot::commands;
use tracing_subscriber::{fmt, EnvFilter};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "gpabot",
    about = "Telegram GPA calculator bot",
    long_about = "Collects course grades and credit hours over a Telegram conversation\n\
                  and reports a credit-weighted GPA. Also serves a liveness endpoint\n\
                  for uptime monitors.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available subcommands.
#[derive(Parser, Debug)]
enum Commands {
    /// Run the Telegram bot and the liveness server.
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    /// Run the GPA conversation in the terminal.
    #[command(alias = "c")]
    Calc(commands::calc::CalcArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Calc(args) => commands::calc::handle_calc(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
