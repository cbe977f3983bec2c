//! Ports implemented by the infrastructure layer

mod cache_source;

pub use cache_source::{CacheSource, RepoResult};
