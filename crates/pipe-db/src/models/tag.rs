//! Tag database models

use sqlx::FromRow;

/// Database model for tags table
#[derive(Debug, Clone, FromRow)]
pub struct TagModel {
    pub id: i64,
    pub name: String,
}

/// A livestream_tags row joined with the name of its tag (from query)
#[derive(Debug, Clone, FromRow)]
pub struct LivestreamTagModel {
    pub id: i64,
    pub livestream_id: i64,
    pub tag_id: i64,
    pub tag_name: String,
}
