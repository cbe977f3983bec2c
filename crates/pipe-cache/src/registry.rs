//! Cache registry - one container per cached entity
//!
//! The registry is built once at start-up, shared as `Arc<CacheRegistry>`,
//! and lives for the whole process. Request handlers only read from it;
//! the warmer is the only writer.

use parking_lot::RwLock;

use pipe_core::entities::{LivestreamId, Tag, TagId, Theme, User, UserId};

use crate::container::{AccumulateMap, AppendMap, OverwriteMap};
use crate::error::CacheEntity;
use crate::fallback::ImageHash;

/// Livestream → owning user
pub type OwnerIndex = OverwriteMap<UserId>;

/// In-memory mirror of the rows hot request paths read
#[derive(Debug, Default)]
pub struct CacheRegistry {
    users: OverwriteMap<User>,
    themes: OverwriteMap<Theme>,
    tags: OverwriteMap<Tag>,
    livestream_tags: AppendMap<Tag>,
    livestream_owners: OwnerIndex,
    reaction_counts: AccumulateMap,
    fallback_image_hash: RwLock<Option<ImageHash>>,
}

impl CacheRegistry {
    /// Create a registry with every container empty
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Containers
    // =========================================================================

    /// Users by user ID
    pub fn users(&self) -> &OverwriteMap<User> {
        &self.users
    }

    /// Themes by user ID
    pub fn themes(&self) -> &OverwriteMap<Theme> {
        &self.themes
    }

    /// Tag catalog by tag ID
    pub fn tags(&self) -> &OverwriteMap<Tag> {
        &self.tags
    }

    /// Tags attached to each livestream, in attachment order
    pub fn livestream_tag_lists(&self) -> &AppendMap<Tag> {
        &self.livestream_tags
    }

    /// Owner of each livestream
    pub fn livestream_owners(&self) -> &OwnerIndex {
        &self.livestream_owners
    }

    /// Reactions received across all livestreams of each owner
    pub fn reaction_counts(&self) -> &AccumulateMap {
        &self.reaction_counts
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Cached user, if any
    pub fn user(&self, id: UserId) -> Option<User> {
        self.users.get(id)
    }

    /// Cached theme of a user, if any
    pub fn theme(&self, user_id: UserId) -> Option<Theme> {
        self.themes.get(user_id)
    }

    /// Cached catalog tag, if any
    pub fn tag(&self, id: TagId) -> Option<Tag> {
        self.tags.get(id)
    }

    /// Tags of a livestream; empty when it has none or is not cached
    pub fn livestream_tags(&self, livestream_id: LivestreamId) -> Vec<Tag> {
        self.livestream_tags.get(livestream_id)
    }

    /// Owner of a livestream, if cached
    pub fn livestream_owner(&self, livestream_id: LivestreamId) -> Option<UserId> {
        self.livestream_owners.get(livestream_id)
    }

    /// Total reactions on livestreams owned by `owner_id`; zero when unknown
    pub fn reaction_count(&self, owner_id: UserId) -> i64 {
        self.reaction_counts.get(owner_id)
    }

    /// Hash of the fallback icon, once computed
    pub fn fallback_image_hash(&self) -> Option<ImageHash> {
        *self.fallback_image_hash.read()
    }

    pub(crate) fn set_fallback_image_hash(&self, hash: ImageHash) {
        *self.fallback_image_hash.write() = Some(hash);
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Empty the container backing `entity`
    pub fn clear(&self, entity: CacheEntity) {
        match entity {
            CacheEntity::Users => self.users.clear(),
            CacheEntity::Themes => self.themes.clear(),
            CacheEntity::LivestreamTags => self.livestream_tags.clear(),
            CacheEntity::Tags => self.tags.clear(),
            CacheEntity::LivestreamOwners => self.livestream_owners.clear(),
            CacheEntity::ReactionCounts => self.reaction_counts.clear(),
        }
    }

    /// Empty every container; the fallback hash is kept
    pub fn clear_all(&self) {
        for entity in CacheEntity::WARMUP_ORDER {
            self.clear(entity);
        }
    }

    /// Whether the container backing `entity` finished loading since its last clear
    pub fn is_loaded(&self, entity: CacheEntity) -> bool {
        match entity {
            CacheEntity::Users => self.users.is_loaded(),
            CacheEntity::Themes => self.themes.is_loaded(),
            CacheEntity::LivestreamTags => self.livestream_tags.is_loaded(),
            CacheEntity::Tags => self.tags.is_loaded(),
            CacheEntity::LivestreamOwners => self.livestream_owners.is_loaded(),
            CacheEntity::ReactionCounts => self.reaction_counts.is_loaded(),
        }
    }

    /// Number of keys held for `entity`
    pub fn len(&self, entity: CacheEntity) -> usize {
        match entity {
            CacheEntity::Users => self.users.len(),
            CacheEntity::Themes => self.themes.len(),
            CacheEntity::LivestreamTags => self.livestream_tags.len(),
            CacheEntity::Tags => self.tags.len(),
            CacheEntity::LivestreamOwners => self.livestream_owners.len(),
            CacheEntity::ReactionCounts => self.reaction_counts.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = CacheRegistry::new();
        for entity in CacheEntity::WARMUP_ORDER {
            assert_eq!(registry.len(entity), 0);
            assert!(!registry.is_loaded(entity));
        }
        assert_eq!(registry.user(1), None);
        assert!(registry.livestream_tags(1).is_empty());
        assert_eq!(registry.reaction_count(1), 0);
        assert_eq!(registry.fallback_image_hash(), None);
    }

    #[test]
    fn test_clear_is_per_container() {
        let registry = CacheRegistry::new();
        registry.tags().add(1, Tag::new(1, "chess"));
        registry.livestream_owners().add(10, 7);

        registry.clear(CacheEntity::Tags);

        assert_eq!(registry.tag(1), None);
        assert_eq!(registry.livestream_owner(10), Some(7));
    }

    #[test]
    fn test_clear_all_keeps_fallback_hash() {
        let registry = CacheRegistry::new();
        let hash = ImageHash::of(b"icon");
        registry.set_fallback_image_hash(hash);
        registry.reaction_counts().add(7, 2);

        registry.clear_all();

        assert_eq!(registry.reaction_count(7), 0);
        assert_eq!(registry.fallback_image_hash(), Some(hash));
    }
}
