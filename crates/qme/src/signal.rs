use anyhow::Context;
use tokio::signal::unix::{SignalKind, signal};
use tracing::info;

/// Wait until SIGTERM or SIGINT is delivered.
///
/// A termination signal converges on the same shutdown path as the queue's
/// idle timeout.
pub async fn wait_for_termination() -> anyhow::Result<()> {
    let mut sigterm = signal(SignalKind::terminate()).context("install SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("install SIGINT handler")?;

    tokio::select! {
        _ = sigterm.recv() => info!(signal = "SIGTERM", "termination signal received"),
        _ = sigint.recv() => info!(signal = "SIGINT", "termination signal received"),
    }
    Ok(())
}
