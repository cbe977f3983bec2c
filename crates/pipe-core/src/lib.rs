//! # pipe-core
//!
//! Domain layer containing the cached entities, the backing store port, and domain errors.
//! This crate has zero dependencies on infrastructure (database, cache containers, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    LivestreamId, LivestreamOwner, LivestreamTag, Reaction, Tag, TagId, Theme, User, UserId,
};
pub use error::DomainError;
pub use traits::{CacheSource, RepoResult};
