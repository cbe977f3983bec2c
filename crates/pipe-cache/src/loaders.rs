//! Loaders - one bulk read per entity, written into its container
//!
//! A loader either fills its container and marks it loaded, or returns the
//! read error without touching the container. Clearing is the caller's job.

use tracing::{debug, warn};

use pipe_core::entities::{Tag, Theme, User};
use pipe_core::traits::CacheSource;
use pipe_core::DomainError;

use crate::container::{AccumulateMap, AppendMap, OverwriteMap};
use crate::error::{CacheEntity, CacheError, CacheResult};
use crate::registry::OwnerIndex;

/// Reactions always count one each
const REACTION_INCREMENT: i64 = 1;

/// Outcome of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub entity: CacheEntity,
    /// Rows read from the backing store
    pub rows: usize,
    /// Rows read but not cached
    pub skipped: usize,
}

impl LoadReport {
    fn new(entity: CacheEntity, rows: usize) -> Self {
        Self {
            entity,
            rows,
            skipped: 0,
        }
    }
}

fn load_error(entity: CacheEntity) -> impl FnOnce(DomainError) -> CacheError {
    move |source| CacheError::Load { entity, source }
}

/// Users keyed by user ID
pub async fn load_users(
    source: &dyn CacheSource,
    users: &OverwriteMap<User>,
) -> CacheResult<LoadReport> {
    let rows = source.users().await.map_err(load_error(CacheEntity::Users))?;
    let report = LoadReport::new(CacheEntity::Users, rows.len());

    users.extend(rows.into_iter().map(|user| (user.id, user)));
    users.mark_loaded();

    Ok(report)
}

/// Themes keyed by the user they belong to
pub async fn load_themes(
    source: &dyn CacheSource,
    themes: &OverwriteMap<Theme>,
) -> CacheResult<LoadReport> {
    let rows = source.themes().await.map_err(load_error(CacheEntity::Themes))?;
    let report = LoadReport::new(CacheEntity::Themes, rows.len());

    themes.extend(rows.into_iter().map(|theme| (theme.user_id, theme)));
    themes.mark_loaded();

    Ok(report)
}

/// Tag catalog keyed by tag ID
pub async fn load_tags(
    source: &dyn CacheSource,
    tags: &OverwriteMap<Tag>,
) -> CacheResult<LoadReport> {
    let rows = source.tags().await.map_err(load_error(CacheEntity::Tags))?;
    let report = LoadReport::new(CacheEntity::Tags, rows.len());

    tags.extend(rows.into_iter().map(|tag| (tag.id, tag)));
    tags.mark_loaded();

    Ok(report)
}

/// Tags of each livestream, from the single pre-joined read
pub async fn load_livestream_tags(
    source: &dyn CacheSource,
    livestream_tags: &AppendMap<Tag>,
) -> CacheResult<LoadReport> {
    let rows = source
        .livestream_tags()
        .await
        .map_err(load_error(CacheEntity::LivestreamTags))?;
    let report = LoadReport::new(CacheEntity::LivestreamTags, rows.len());

    livestream_tags.extend(rows.into_iter().map(|link| (link.livestream_id, link.into_tag())));
    livestream_tags.mark_loaded();

    Ok(report)
}

/// Owner of each livestream keyed by livestream ID
pub async fn load_livestream_owners(
    source: &dyn CacheSource,
    owners: &OwnerIndex,
) -> CacheResult<LoadReport> {
    let rows = source
        .livestream_owners()
        .await
        .map_err(load_error(CacheEntity::LivestreamOwners))?;
    let report = LoadReport::new(CacheEntity::LivestreamOwners, rows.len());

    owners.extend(rows.into_iter().map(|row| (row.livestream_id, row.user_id)));
    owners.mark_loaded();

    Ok(report)
}

/// Per-owner reaction totals, derived from every reaction and `owners`
///
/// `owners` must already hold the current livestream → owner index. A
/// reaction whose livestream has no owner entry is logged and skipped; no
/// count is created for it.
pub async fn load_reaction_counts(
    source: &dyn CacheSource,
    owners: &OwnerIndex,
    counts: &AccumulateMap,
) -> CacheResult<LoadReport> {
    let reactions = source
        .reactions()
        .await
        .map_err(load_error(CacheEntity::ReactionCounts))?;
    let mut report = LoadReport::new(CacheEntity::ReactionCounts, reactions.len());

    if !owners.is_loaded() {
        debug!("Counting reactions against an owner index that is not loaded");
    }

    let mut increments = Vec::with_capacity(reactions.len());
    for reaction in &reactions {
        match owners.get(reaction.livestream_id) {
            Some(owner_id) => increments.push((owner_id, REACTION_INCREMENT)),
            None => {
                report.skipped += 1;
                warn!(
                    reaction_id = reaction.id,
                    livestream_id = reaction.livestream_id,
                    "Reaction references a livestream with no known owner, skipped"
                );
            }
        }
    }

    counts.extend(increments);
    counts.mark_loaded();

    debug!(
        reactions = report.rows,
        skipped = report.skipped,
        owners = counts.len(),
        "Reaction counts aggregated"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pipe_core::entities::{LivestreamOwner, LivestreamTag, Reaction};
    use pipe_core::traits::RepoResult;

    /// Source where every read returns fixed rows or fails
    #[derive(Default)]
    struct FixedSource {
        fail: bool,
        livestream_tags: Vec<LivestreamTag>,
        reactions: Vec<Reaction>,
    }

    impl FixedSource {
        fn rows<T: Clone>(&self, rows: &[T]) -> RepoResult<Vec<T>> {
            if self.fail {
                Err(DomainError::DatabaseError("connection reset".to_string()))
            } else {
                Ok(rows.to_vec())
            }
        }
    }

    #[async_trait]
    impl CacheSource for FixedSource {
        async fn users(&self) -> RepoResult<Vec<User>> {
            self.rows(&[
                User::new(1, "alice".to_string(), "Alice".to_string()),
                User::new(1, "alice2".to_string(), "Alice".to_string()),
            ])
        }

        async fn themes(&self) -> RepoResult<Vec<Theme>> {
            self.rows(&[Theme::new(1, 7, true)])
        }

        async fn tags(&self) -> RepoResult<Vec<Tag>> {
            self.rows(&[])
        }

        async fn livestream_tags(&self) -> RepoResult<Vec<LivestreamTag>> {
            self.rows(&self.livestream_tags)
        }

        async fn livestream_owners(&self) -> RepoResult<Vec<LivestreamOwner>> {
            self.rows(&[])
        }

        async fn reactions(&self) -> RepoResult<Vec<Reaction>> {
            self.rows(&self.reactions)
        }
    }

    fn link(id: i64, livestream_id: i64, tag_id: i64, name: &str) -> LivestreamTag {
        LivestreamTag {
            id,
            livestream_id,
            tag_id,
            tag_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_keys_keep_last_row() {
        let users = OverwriteMap::new();
        let report = load_users(&FixedSource::default(), &users).await.unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(users.len(), 1);
        assert_eq!(users.get(1).unwrap().name, "alice2");
        assert!(users.is_loaded());
    }

    #[tokio::test]
    async fn test_themes_keyed_by_user() {
        let themes = OverwriteMap::new();
        load_themes(&FixedSource::default(), &themes).await.unwrap();

        assert_eq!(themes.get(7), Some(Theme::new(1, 7, true)));
        assert_eq!(themes.get(1), None);
    }

    #[tokio::test]
    async fn test_failed_read_leaves_container_untouched() {
        let themes = OverwriteMap::new();
        themes.add(99, Theme::new(5, 99, false));

        let source = FixedSource {
            fail: true,
            ..Default::default()
        };
        let err = load_themes(&source, &themes).await.unwrap_err();

        assert_eq!(err.entity(), Some(CacheEntity::Themes));
        assert_eq!(themes.len(), 1);
        assert!(!themes.is_loaded());
    }

    #[tokio::test]
    async fn test_livestream_tags_append_in_row_order() {
        let source = FixedSource {
            livestream_tags: vec![
                link(1, 10, 2, "music"),
                link(2, 10, 1, "chess"),
                link(3, 10, 2, "music"),
                link(4, 11, 1, "chess"),
            ],
            ..Default::default()
        };
        let lists = AppendMap::new();
        load_livestream_tags(&source, &lists).await.unwrap();

        assert_eq!(
            lists.get(10),
            vec![Tag::new(2, "music"), Tag::new(1, "chess"), Tag::new(2, "music")]
        );
        assert_eq!(lists.get(11), vec![Tag::new(1, "chess")]);
    }

    #[tokio::test]
    async fn test_reactions_without_owner_are_skipped() {
        let source = FixedSource {
            reactions: vec![
                Reaction::new(1, 3, 100, "smile".to_string()),
                Reaction::new(2, 4, 100, "smile".to_string()),
                Reaction::new(3, 5, 300, "heart".to_string()),
            ],
            ..Default::default()
        };
        let owners = OwnerIndex::new();
        owners.add(100, 7);
        owners.mark_loaded();
        let counts = AccumulateMap::new();

        let report = load_reaction_counts(&source, &owners, &counts).await.unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(counts.get(7), 2);
        assert_eq!(counts.len(), 1);
    }
}
