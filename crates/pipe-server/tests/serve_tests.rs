//! Start-up and reset handling of the service loop

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use pipe_cache::{CacheEntity, CacheRegistry, CacheWarmer};
use pipe_common::AppError;
use pipe_core::entities::{LivestreamOwner, LivestreamTag, Reaction, Tag, Theme, User};
use pipe_core::traits::{CacheSource, RepoResult};
use pipe_core::DomainError;
use pipe_server::{reset_channel, serve};

/// Source that changes between warm-ups
///
/// Warm-up `n` (0 is start-up) sees `reaction_batches[n]`, or the last batch
/// once they run out, and fails its livestream tag read when `n` is listed in
/// `broken_warm_ups`. With `themes_down` every theme read fails.
struct ScriptedSource {
    reaction_batches: Vec<Vec<Reaction>>,
    broken_warm_ups: Vec<usize>,
    themes_down: bool,
    tag_reads: AtomicUsize,
    reaction_reads: AtomicUsize,
}

impl ScriptedSource {
    fn new(reaction_batches: Vec<Vec<Reaction>>, broken_warm_ups: Vec<usize>) -> Self {
        Self {
            reaction_batches,
            broken_warm_ups,
            themes_down: false,
            tag_reads: AtomicUsize::new(0),
            reaction_reads: AtomicUsize::new(0),
        }
    }

    fn with_themes_down(mut self) -> Self {
        self.themes_down = true;
        self
    }
}

#[async_trait]
impl CacheSource for ScriptedSource {
    async fn users(&self) -> RepoResult<Vec<User>> {
        Ok(vec![User::new(7, "alice".to_string(), "Alice".to_string())])
    }

    async fn themes(&self) -> RepoResult<Vec<Theme>> {
        if self.themes_down {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        Ok(Vec::new())
    }

    async fn tags(&self) -> RepoResult<Vec<Tag>> {
        Ok(vec![Tag::new(1, "chess")])
    }

    async fn livestream_tags(&self) -> RepoResult<Vec<LivestreamTag>> {
        let warm_up = self.tag_reads.fetch_add(1, Ordering::SeqCst);
        if self.broken_warm_ups.contains(&warm_up) {
            return Err(DomainError::DatabaseError("relation does not exist".to_string()));
        }
        Ok(Vec::new())
    }

    async fn livestream_owners(&self) -> RepoResult<Vec<LivestreamOwner>> {
        Ok(vec![LivestreamOwner::new(100, 7)])
    }

    async fn reactions(&self) -> RepoResult<Vec<Reaction>> {
        let warm_up = self.reaction_reads.fetch_add(1, Ordering::SeqCst);
        let batch = warm_up.min(self.reaction_batches.len().saturating_sub(1));
        Ok(self.reaction_batches.get(batch).cloned().unwrap_or_default())
    }
}

fn reactions(count: i64) -> Vec<Reaction> {
    (1..=count)
        .map(|id| Reaction::new(id, 9, 100, "smile".to_string()))
        .collect()
}

fn setup(source: ScriptedSource) -> (Arc<CacheRegistry>, CacheWarmer) {
    let registry = Arc::new(CacheRegistry::new());
    let warmer = CacheWarmer::new(Arc::new(source), registry.clone(), "/no/such/NoImage.jpg");
    (registry, warmer)
}

/// Queue `count` reset requests and close the channel
async fn queued_resets(count: usize) -> mpsc::Receiver<()> {
    let (trigger, resets) = mpsc::channel(count.max(1));
    for _ in 0..count {
        trigger.send(()).await.unwrap();
    }
    resets
}

#[tokio::test]
async fn test_caches_are_warm_before_serving() {
    let (registry, warmer) = setup(ScriptedSource::new(vec![reactions(1)], vec![]));
    let (_trigger, resets) = reset_channel();

    let served = serve(&warmer, resets, async {}).await.unwrap();

    assert_eq!(served, 0);
    assert_eq!(registry.reaction_count(7), 1);
    assert_eq!(registry.user(7).unwrap().name, "alice");
}

#[tokio::test]
async fn test_reset_request_reloads_from_source() {
    let (registry, warmer) = setup(ScriptedSource::new(
        vec![reactions(1), reactions(3)],
        vec![],
    ));

    let served = serve(&warmer, queued_resets(1).await, async {})
        .await
        .unwrap();

    assert_eq!(served, 1);
    assert_eq!(registry.reaction_count(7), 3);
}

#[tokio::test]
async fn test_failed_start_up_warm_up_is_fatal() {
    let (_registry, warmer) = setup(ScriptedSource::new(vec![reactions(1)], vec![0]));

    let err = serve(&warmer, queued_resets(1).await, async {})
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Cache(_)));
    assert!(err.is_fatal());
    assert_eq!(err.error_code(), "CACHE_ERROR");
}

#[tokio::test]
async fn test_aborted_reset_stops_serving() {
    let (registry, warmer) = setup(ScriptedSource::new(
        vec![reactions(1), reactions(3)],
        vec![1],
    ));

    let err = serve(&warmer, queued_resets(2).await, async {})
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Cache(_)));
    assert!(err.is_fatal());
    // Livestream tags were cleared and later steps never ran
    assert!(!registry.is_loaded(CacheEntity::LivestreamTags));
    assert_eq!(registry.reaction_count(7), 1);
}

#[tokio::test]
async fn test_incomplete_reset_keeps_serving() {
    let source = ScriptedSource::new(vec![reactions(1), reactions(2), reactions(4)], vec![]);
    let (registry, warmer) = setup(source.with_themes_down());

    let served = serve(&warmer, queued_resets(2).await, async {})
        .await
        .unwrap();

    assert_eq!(served, 2);
    assert!(!registry.is_loaded(CacheEntity::Themes));
    assert_eq!(registry.reaction_count(7), 4);
}

#[tokio::test]
async fn test_shutdown_waits_for_queued_resets() {
    let (registry, warmer) = setup(ScriptedSource::new(
        vec![reactions(1), reactions(5)],
        vec![],
    ));
    let (trigger, resets) = reset_channel();
    trigger.send(()).await.unwrap();

    // The trigger stays open, so only the shutdown future ends the loop
    let served = serve(&warmer, resets, async {}).await.unwrap();

    assert_eq!(served, 1);
    assert_eq!(registry.reaction_count(7), 5);
}
