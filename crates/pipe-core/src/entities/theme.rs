//! Theme entity - per-user display theme

use serde::Serialize;

use super::UserId;

/// Display theme of a user; one row per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: i64,
    pub user_id: UserId,
    pub dark_mode: bool,
}

impl Theme {
    /// Create a new Theme
    pub fn new(id: i64, user_id: UserId, dark_mode: bool) -> Self {
        Self {
            id,
            user_id,
            dark_mode,
        }
    }
}
