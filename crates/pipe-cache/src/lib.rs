//! # pipe-cache
//!
//! In-memory read-through cache mirroring rows of the backing store.
//!
//! ## Features
//!
//! - **Containers**: one generic, `RwLock`-guarded map ([`SyncMap`]) with a
//!   merge strategy chosen by type: overwrite, append, or accumulate
//! - **Registry**: one container per cached entity plus the fallback icon hash
//! - **Loaders**: bulk read of one entity, written into its container
//! - **Warm-up**: clear-then-load of every container in dependency order
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pipe_cache::{CacheRegistry, CacheWarmer};
//!
//! let registry = Arc::new(CacheRegistry::new());
//! let warmer = CacheWarmer::new(source, registry.clone(), "../img/NoImage.jpg");
//!
//! // At start-up and on every full reset
//! warmer.reset().await?;
//!
//! // Request handlers only read
//! let count = registry.reaction_count(user_id);
//! let tags = registry.livestream_tags(livestream_id);
//! ```

pub mod container;
pub mod error;
pub mod fallback;
pub mod loaders;
pub mod registry;
pub mod warmer;

pub use container::{
    Accumulate, AccumulateMap, Append, AppendMap, MergeStrategy, Overwrite, OverwriteMap, SyncMap,
};
pub use error::{CacheEntity, CacheError, CacheResult};
pub use fallback::ImageHash;
pub use loaders::LoadReport;
pub use registry::{CacheRegistry, OwnerIndex};
pub use warmer::{CacheWarmer, StepOutcome, WarmupReport};
