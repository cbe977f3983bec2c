//! OS signal handling

use tokio::signal;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use pipe_common::{AppError, AppResult};

use crate::ResetTrigger;

/// Turn every `SIGHUP` into a reset request
///
/// A request already waiting absorbs new ones. The task ends once the
/// receiving side is gone.
#[cfg(unix)]
pub fn forward_reset_signals(trigger: ResetTrigger) -> AppResult<JoinHandle<()>> {
    use signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup()).map_err(AppError::internal)?;

    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            info!("Received SIGHUP");

            match trigger.try_send(()) {
                Ok(()) => {}
                Err(TrySendError::Full(())) => debug!("Cache reset already pending"),
                Err(TrySendError::Closed(())) => break,
            }
        }
    }))
}

/// No reset signal exists on this platform; the trigger is dropped
#[cfg(not(unix))]
pub fn forward_reset_signals(trigger: ResetTrigger) -> AppResult<JoinHandle<()>> {
    Ok(tokio::spawn(async move { drop(trigger) }))
}

/// Complete on Ctrl+C or `SIGTERM`
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
