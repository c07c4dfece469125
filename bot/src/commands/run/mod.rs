//! # Run the Bot
//!
//! File: bot/src/commands/run/mod.rs
//!
//! ## Overview
//!
//! `gpabot run` starts the two long-running parts of the process:
//! - the Telegram update dispatcher (in the current task)
//! - the liveness HTTP server (in a spawned task), unless disabled
//!
//! Both observe one `CancellationToken`. Ctrl+C or SIGTERM cancels it; so
//! does either part finishing on its own, which brings the other one down
//! too. The command returns once both have stopped.
//!
//! ## Startup order
//!
//! 1. Resolve configuration; a missing token ends the command here.
//! 2. Bind the liveness address (fatal on failure).
//! 3. Authenticate with Telegram and register the command list.
//! 4. Start serving and polling.
//!
//! ## Examples
//!
//! ```bash
//! TELEGRAM_TOKEN=123:abc gpabot run
//! gpabot run --port 10000 --config ~/.config/gpabot/prod.toml
//! gpabot run --no-liveness
//! ```
//!
use crate::conversation::ConversationEngine;
use crate::core::config::{self, ConfigOverrides};
use crate::core::error::Result;
use crate::core::shutdown;
use crate::{liveness, telegram};
use anyhow::Context;
use clap::Parser;
use std::fmt;
use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;
use teloxide::Bot;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Arguments for `gpabot run`.
#[derive(Parser)]
pub struct RunArgs {
    /// Telegram bot token.
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Address the liveness server binds to (default 0.0.0.0).
    #[arg(long, env = "GPABOT_HOST")]
    pub host: Option<IpAddr>,

    /// Port the liveness server listens on (default 8080).
    #[arg(long, short, env = "PORT")]
    pub port: Option<u16>,

    /// Do not start the liveness server.
    #[arg(long)]
    pub no_liveness: bool,

    /// Path to a TOML configuration file (`~` is expanded).
    #[arg(long, short)]
    pub config: Option<String>,
}

// Manual impl so the token never reaches the debug log.
impl fmt::Debug for RunArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunArgs")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("no_liveness", &self.no_liveness)
            .field("config", &self.config)
            .finish()
    }
}

impl RunArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            token: self.token.clone(),
            host: self.host,
            port: self.port,
            no_liveness: self.no_liveness,
        }
    }
}

/// Entry point for `gpabot run`.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    let config = config::load_config(&args.overrides())?;
    info!("Effective bot config: {:?}", config);

    let listener = if config.liveness.enabled {
        Some(liveness::bind(&config.liveness).await?)
    } else {
        info!("Liveness server disabled.");
        None
    };

    let bot = Bot::new(config.token.expose());
    telegram::connect(&bot)
        .await
        .context("Failed to connect to the Telegram Bot API")?;

    let shutdown_token = CancellationToken::new();
    let signals = tokio::spawn(shutdown::watch_os_signals(shutdown_token.clone()));

    let engine = Arc::new(ConversationEngine::new());
    let liveness = listener.map(|listener| {
        liveness::serve_on(listener, config.liveness.body.clone(), shutdown_token.clone())
    });
    let dispatcher =
        telegram::run_dispatcher(bot, Arc::clone(&engine), shutdown_token.clone());

    println!("GPA bot is running. Press Ctrl+C to stop.");
    let result = supervise(liveness, dispatcher, shutdown_token).await;
    signals.await.context("Signal watcher task panicked")?;

    info!(
        abandoned_sessions = engine.active_sessions(),
        "Shutdown complete"
    );
    result
}

/// Runs the liveness server (when present) in a spawned task and `dispatcher`
/// in the current one, both watching `shutdown`.
///
/// Whichever finishes first cancels `shutdown`, so the other stops too. Returns
/// once both have ended, with the liveness server's result.
async fn supervise<L, D>(
    liveness: Option<L>,
    dispatcher: D,
    shutdown: CancellationToken,
) -> Result<()>
where
    L: Future<Output = Result<()>> + Send + 'static,
    D: Future<Output = ()>,
{
    let liveness_task = liveness.map(|server| {
        let token = shutdown.clone();
        tokio::spawn(async move {
            let result = server.await;
            if let Err(e) = &result {
                warn!("Liveness server stopped with error: {:#}", e);
            }
            token.cancel();
            result
        })
    });

    dispatcher.await;
    shutdown.cancel();

    match liveness_task {
        Some(handle) => handle.await.context("Liveness task panicked")?,
        None => Ok(()),
    }
}
