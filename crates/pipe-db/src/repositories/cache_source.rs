//! PostgreSQL implementation of CacheSource

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pipe_core::entities::{LivestreamOwner, LivestreamTag, Reaction, Tag, Theme, User};
use pipe_core::traits::{CacheSource, RepoResult};

use crate::models::{
    LivestreamOwnerModel, LivestreamTagModel, ReactionModel, TagModel, ThemeModel, UserModel,
};

use super::error::map_read_error;

/// PostgreSQL implementation of CacheSource
#[derive(Clone)]
pub struct PgCacheSource {
    pool: PgPool,
}

impl PgCacheSource {
    /// Create a new PgCacheSource
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheSource for PgCacheSource {
    #[instrument(skip(self))]
    async fn users(&self) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, name, display_name, description, password
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("users"))?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn themes(&self) -> RepoResult<Vec<Theme>> {
        let results = sqlx::query_as::<_, ThemeModel>(
            r#"
            SELECT id, user_id, dark_mode
            FROM themes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("themes"))?;

        Ok(results.into_iter().map(Theme::from).collect())
    }

    #[instrument(skip(self))]
    async fn tags(&self) -> RepoResult<Vec<Tag>> {
        let results = sqlx::query_as::<_, TagModel>(
            r#"
            SELECT id, name
            FROM tags
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("tags"))?;

        Ok(results.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self))]
    async fn livestream_tags(&self) -> RepoResult<Vec<LivestreamTag>> {
        let results = sqlx::query_as::<_, LivestreamTagModel>(
            r#"
            SELECT lt.id, lt.livestream_id, lt.tag_id, t.name AS tag_name
            FROM livestream_tags lt
            JOIN tags t ON lt.tag_id = t.id
            ORDER BY lt.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("livestream_tags"))?;

        Ok(results.into_iter().map(LivestreamTag::from).collect())
    }

    #[instrument(skip(self))]
    async fn livestream_owners(&self) -> RepoResult<Vec<LivestreamOwner>> {
        let results = sqlx::query_as::<_, LivestreamOwnerModel>(
            r#"
            SELECT id, user_id
            FROM livestreams
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("livestreams"))?;

        Ok(results.into_iter().map(LivestreamOwner::from).collect())
    }

    #[instrument(skip(self))]
    async fn reactions(&self) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, user_id, livestream_id, emoji_name, created_at
            FROM reactions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("reactions"))?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCacheSource>();
    }
}
