//! Graceful shutdown on SIGINT / SIGTERM

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

/// How long in-flight requests may run once a stop signal arrives.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("could not listen for Ctrl+C: {0}")]
    Interrupt(#[source] io::Error),

    #[error("could not listen for the terminate signal: {0}")]
    Terminate(#[source] io::Error),
}

#[derive(Debug, Clone, Copy)]
enum StopSignal {
    Interrupt,
    Terminate,
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    use tokio::signal::unix::{SignalKind, signal as unix_signal};

    unix_signal(SignalKind::terminate())
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(())
}

#[cfg(windows)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::windows::ctrl_close()
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(())
}

async fn wait_for_stop() -> Result<StopSignal, ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::Interrupt)?;

            Ok(StopSignal::Interrupt)
        }
        result = terminate() => {
            result?;

            Ok(StopSignal::Terminate)
        }
    }
}

/// Waits for a stop signal, then asks the server to drain and exit.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = wait_for_stop().await?;

    info!(signal = ?received, drain_seconds = DRAIN_TIMEOUT.as_secs(), "stopping server");

    handle.stop_graceful(Some(DRAIN_TIMEOUT));

    Ok(())
}
