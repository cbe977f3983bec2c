//! Warm-up orchestration
//!
//! Brings every container from empty to a copy of the backing store. The
//! sequence is fixed:
//!
//! 1. fallback image hash
//! 2. users
//! 3. themes
//! 4. livestream tags (a failure here aborts the warm-up)
//! 5. tags
//! 6. livestream owners
//! 7. reaction counts (reads the owners loaded in step 6)
//!
//! Each step clears its container before loading it. Any other failure is
//! logged, the container stays empty, and the sequence moves on. Readers may
//! see a cleared-but-not-reloaded container while a warm-up is running.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use pipe_core::traits::CacheSource;

use crate::error::{CacheEntity, CacheError, CacheResult};
use crate::fallback::{self, ImageHash};
use crate::loaders::{self, LoadReport};
use crate::registry::CacheRegistry;

/// Result of one load step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Loaded(LoadReport),
    Failed { entity: CacheEntity, error: String },
}

impl StepOutcome {
    pub fn entity(&self) -> CacheEntity {
        match self {
            Self::Loaded(report) => report.entity,
            Self::Failed { entity, .. } => *entity,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Summary of a completed warm-up
#[derive(Debug, Clone)]
pub struct WarmupReport {
    /// Fallback icon hash in effect after the warm-up
    pub fallback_image_hash: Option<ImageHash>,
    /// One entry per container, in load order
    pub steps: Vec<StepOutcome>,
    pub elapsed: Duration,
}

impl WarmupReport {
    /// Containers whose load failed and were left empty
    pub fn failed(&self) -> Vec<CacheEntity> {
        self.steps
            .iter()
            .filter(|step| !step.is_loaded())
            .map(StepOutcome::entity)
            .collect()
    }

    /// Whether every container loaded
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(StepOutcome::is_loaded)
    }

    /// Report of the step for `entity`
    pub fn step(&self, entity: CacheEntity) -> Option<&StepOutcome> {
        self.steps.iter().find(|step| step.entity() == entity)
    }
}

/// Clears and reloads every container of a [`CacheRegistry`]
pub struct CacheWarmer {
    source: Arc<dyn CacheSource>,
    registry: Arc<CacheRegistry>,
    fallback_image_path: PathBuf,
    /// Serializes warm-ups so two resets never interleave their steps
    running: Mutex<()>,
}

impl CacheWarmer {
    /// Create a warmer reading from `source` into `registry`
    pub fn new(
        source: Arc<dyn CacheSource>,
        registry: Arc<CacheRegistry>,
        fallback_image_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            registry,
            fallback_image_path: fallback_image_path.into(),
            running: Mutex::new(()),
        }
    }

    /// Reinitialize all caches
    ///
    /// Invoked once at start-up and again for every external full-reset request.
    pub async fn reset(&self) -> CacheResult<WarmupReport> {
        self.warm_up().await
    }

    /// Run the full clear-then-load sequence
    ///
    /// Returns `CacheError::WarmupAborted` when livestream tags cannot be
    /// loaded; later containers are then left as they were.
    pub async fn warm_up(&self) -> CacheResult<WarmupReport> {
        let _running = self.running.lock().await;
        let started = Instant::now();

        info!("Cache warm-up started");

        let fallback_image_hash = self.refresh_fallback_image_hash().await;
        let mut steps = Vec::with_capacity(CacheEntity::WARMUP_ORDER.len());

        for entity in CacheEntity::WARMUP_ORDER {
            self.registry.clear(entity);

            match self.load(entity).await {
                Ok(report) => {
                    info!(
                        entity = %entity,
                        rows = report.rows,
                        skipped = report.skipped,
                        "Cache loaded"
                    );
                    steps.push(StepOutcome::Loaded(report));
                }
                Err(CacheError::Load { entity, source }) if entity.is_required() => {
                    error!(entity = %entity, error = %source, "Cache warm-up aborted");
                    return Err(CacheError::WarmupAborted { entity, source });
                }
                Err(e) => {
                    error!(entity = %entity, error = %e, "Cache load failed, container left empty");
                    steps.push(StepOutcome::Failed {
                        entity,
                        error: e.to_string(),
                    });
                }
            }
        }

        let report = WarmupReport {
            fallback_image_hash,
            steps,
            elapsed: started.elapsed(),
        };

        info!(
            elapsed_ms = report.elapsed.as_millis() as u64,
            failed = report.failed().len(),
            "Cache warm-up finished"
        );

        Ok(report)
    }

    async fn load(&self, entity: CacheEntity) -> CacheResult<LoadReport> {
        let source = self.source.as_ref();
        let registry = self.registry.as_ref();

        match entity {
            CacheEntity::Users => loaders::load_users(source, registry.users()).await,
            CacheEntity::Themes => loaders::load_themes(source, registry.themes()).await,
            CacheEntity::LivestreamTags => {
                loaders::load_livestream_tags(source, registry.livestream_tag_lists()).await
            }
            CacheEntity::Tags => loaders::load_tags(source, registry.tags()).await,
            CacheEntity::LivestreamOwners => {
                loaders::load_livestream_owners(source, registry.livestream_owners()).await
            }
            CacheEntity::ReactionCounts => {
                loaders::load_reaction_counts(
                    source,
                    registry.livestream_owners(),
                    registry.reaction_counts(),
                )
                .await
            }
        }
    }

    /// Recompute the fallback hash; on failure the previous hash stays in place
    async fn refresh_fallback_image_hash(&self) -> Option<ImageHash> {
        match fallback::hash_file(&self.fallback_image_path).await {
            Ok(hash) => {
                self.registry.set_fallback_image_hash(hash);
                Some(hash)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load fallback image");
                self.registry.fallback_image_hash()
            }
        }
    }
}

impl std::fmt::Debug for CacheWarmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheWarmer")
            .field("source", &"CacheSource")
            .field("registry", &self.registry)
            .field("fallback_image_path", &self.fallback_image_path)
            .finish()
    }
}
