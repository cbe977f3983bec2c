//! Theme database model

use sqlx::FromRow;

/// Database model for themes table
#[derive(Debug, Clone, FromRow)]
pub struct ThemeModel {
    pub id: i64,
    pub user_id: i64,
    pub dark_mode: bool,
}
