//! # Process Shutdown Signal
//!
//! File: bot/src/core/shutdown.rs
//!
//! ## Overview
//!
//! A single `CancellationToken` is the shutdown signal for the whole process.
//! `watch_os_signals` cancels it on Ctrl+C or SIGTERM; every long-running task
//! holds a clone and stops when it fires.
//!
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
pub async fn os_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Cancels `token` on the first OS shutdown signal. Returns early if the token
/// is cancelled by someone else first.
pub async fn watch_os_signals(token: CancellationToken) {
    tokio::select! {
        _ = os_signal() => token.cancel(),
        _ = token.cancelled() => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_watcher_returns_when_token_cancelled() {
        let token = CancellationToken::new();
        let watcher = tokio::spawn(watch_os_signals(token.clone()));
        token.cancel();
        tokio::time::timeout(Duration::from_secs(5), watcher)
            .await
            .expect("watcher did not stop")
            .unwrap();
    }
}
