//! Backing store port used to warm the in-memory cache
//!
//! Each method performs one bulk "select all current rows" read. The domain
//! layer defines what the cache needs and the infrastructure layer decides
//! how the queries are built.

use async_trait::async_trait;

use crate::entities::{LivestreamOwner, LivestreamTag, Reaction, Tag, Theme, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Cache Source
// ============================================================================

#[async_trait]
pub trait CacheSource: Send + Sync {
    /// All user accounts
    async fn users(&self) -> RepoResult<Vec<User>>;

    /// All per-user themes
    async fn themes(&self) -> RepoResult<Vec<Theme>>;

    /// The full tag catalog
    async fn tags(&self) -> RepoResult<Vec<Tag>>;

    /// All livestream/tag links, joined with the tag name
    async fn livestream_tags(&self) -> RepoResult<Vec<LivestreamTag>>;

    /// Owner of every livestream
    async fn livestream_owners(&self) -> RepoResult<Vec<LivestreamOwner>>;

    /// Every reaction ever posted
    async fn reactions(&self) -> RepoResult<Vec<Reaction>>;
}
