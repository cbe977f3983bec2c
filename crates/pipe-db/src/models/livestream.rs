//! Livestream database model

use sqlx::FromRow;

/// The ownership columns of the livestreams table (from query)
#[derive(Debug, Clone, FromRow)]
pub struct LivestreamOwnerModel {
    pub id: i64,
    pub user_id: i64,
}
