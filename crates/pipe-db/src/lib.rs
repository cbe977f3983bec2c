//! # pipe-db
//!
//! Database layer implementing the cache source port with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides the PostgreSQL implementation of the `CacheSource`
//! trait defined in `pipe-core`. It handles:
//!
//! - Connection pool management, including waiting for the store to come up
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - The bulk-read repository used by cache warm-up
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pipe_db::pool::{connect_with_retry, DatabaseConfig};
//! use pipe_db::repositories::PgCacheSource;
//! use pipe_core::traits::CacheSource;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::default();
//!     let pool = connect_with_retry(&config).await?;
//!     let source = PgCacheSource::new(pool);
//!
//!     let users = source.users().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{connect_with_retry, create_pool, DatabaseConfig, PgPool};
pub use repositories::PgCacheSource;
