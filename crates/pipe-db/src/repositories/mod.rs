//! Repository implementations
//!
//! PostgreSQL implementation of the cache source port defined in pipe-core.

mod cache_source;
mod error;

pub use cache_source::PgCacheSource;
