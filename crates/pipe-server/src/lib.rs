//! # pipe-server
//!
//! Process wiring for the cache service.
//!
//! Start-up waits for the backing store, warms every cache once, and then
//! serves full-reset requests until shutdown. A reset request is anything
//! sent on the reset channel; in the binary that is `SIGHUP`.

mod signals;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use pipe_cache::{CacheRegistry, CacheWarmer};
use pipe_common::{AppConfig, AppError, AppResult};
use pipe_db::{connect_with_retry, DatabaseConfig, PgCacheSource};

pub use signals::{forward_reset_signals, shutdown_signal};

/// One pending request is enough; further requests while it waits are redundant
pub const RESET_QUEUE_CAPACITY: usize = 1;

/// Handle used to request a full cache reset
pub type ResetTrigger = mpsc::Sender<()>;

/// Create the reset channel consumed by [`serve`]
pub fn reset_channel() -> (ResetTrigger, mpsc::Receiver<()>) {
    mpsc::channel(RESET_QUEUE_CAPACITY)
}

/// Run the cache service until a shutdown signal arrives
pub async fn run(config: AppConfig) -> AppResult<()> {
    let pool = connect_with_retry(&DatabaseConfig::from(&config.database))
        .await
        .map_err(AppError::database)?;

    let registry = Arc::new(CacheRegistry::new());
    let source = Arc::new(PgCacheSource::new(pool.clone()));
    let warmer = CacheWarmer::new(source, registry, config.cache.fallback_image_path);

    let (trigger, resets) = reset_channel();
    let forwarder = forward_reset_signals(trigger)?;

    let served = serve(&warmer, resets, shutdown_signal()).await;

    forwarder.abort();
    pool.close().await;

    let resets = served?;
    info!(resets, "Cache service stopped");
    Ok(())
}

/// Warm the caches, then serve reset requests until `shutdown` completes
///
/// Returns the number of reset requests served. An aborted warm-up, at
/// start-up or on request, ends serving with `AppError::Cache`: the caches
/// are then half reloaded and must not be read. Queued requests are served
/// before shutdown is observed.
pub async fn serve<F>(
    warmer: &CacheWarmer,
    mut resets: mpsc::Receiver<()>,
    shutdown: F,
) -> AppResult<u64>
where
    F: Future<Output = ()>,
{
    let report = warmer.reset().await.map_err(|e| {
        error!(error = %e, "Initial cache warm-up failed");
        AppError::cache(e)
    })?;

    info!(
        elapsed_ms = report.elapsed.as_millis() as u64,
        failed = ?report.failed(),
        "Caches ready"
    );

    tokio::pin!(shutdown);
    let mut served = 0;
    let mut accepting = true;

    loop {
        tokio::select! {
            biased;

            request = resets.recv(), if accepting => match request {
                Some(()) => {
                    served += 1;
                    handle_reset(warmer).await?;
                }
                None => accepting = false,
            },
            () = &mut shutdown => break,
        }
    }

    Ok(served)
}

async fn handle_reset(warmer: &CacheWarmer) -> AppResult<()> {
    info!("Full cache reset requested");

    let report = warmer.reset().await.map_err(|e| {
        error!(error = %e, "Cache reset aborted");
        AppError::cache(e)
    })?;

    if report.is_complete() {
        info!(
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Cache reset finished"
        );
    } else {
        error!(failed = ?report.failed(), "Cache reset finished with empty containers");
    }

    Ok(())
}
