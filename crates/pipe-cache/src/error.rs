//! Cache error types

use std::fmt;
use std::path::PathBuf;

use pipe_core::DomainError;

/// Every container the warm-up fills, in warm-up order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEntity {
    Users,
    Themes,
    LivestreamTags,
    Tags,
    LivestreamOwners,
    ReactionCounts,
}

impl CacheEntity {
    /// Load order used by the warm-up; reaction counts read livestream owners
    pub const WARMUP_ORDER: [CacheEntity; 6] = [
        Self::Users,
        Self::Themes,
        Self::LivestreamTags,
        Self::Tags,
        Self::LivestreamOwners,
        Self::ReactionCounts,
    ];

    /// Stable name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Themes => "themes",
            Self::LivestreamTags => "livestream_tags",
            Self::Tags => "tags",
            Self::LivestreamOwners => "livestream_owners",
            Self::ReactionCounts => "reaction_counts",
        }
    }

    /// A failed load of this entity aborts the whole warm-up
    pub fn is_required(&self) -> bool {
        matches!(self, Self::LivestreamTags)
    }
}

impl fmt::Display for CacheEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache layer errors
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to load {entity}: {source}")]
    Load {
        entity: CacheEntity,
        #[source]
        source: DomainError,
    },

    #[error("warm-up aborted: {entity} could not be loaded: {source}")]
    WarmupAborted {
        entity: CacheEntity,
        #[source]
        source: DomainError,
    },

    #[error("failed to read fallback image {}: {source}", .path.display())]
    FallbackImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    /// Entity whose load failed, if any
    pub fn entity(&self) -> Option<CacheEntity> {
        match self {
            Self::Load { entity, .. } | Self::WarmupAborted { entity, .. } => Some(*entity),
            Self::FallbackImage { .. } => None,
        }
    }
}

/// Result type alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
