//! User entity - represents a streamer or viewer account

use serde::Serialize;

use super::UserId;

/// User account as mirrored from the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: UserId, name: String, display_name: String) -> Self {
        Self {
            id,
            name,
            display_name,
            description: String::new(),
            password_hash: String::new(),
        }
    }

    /// Set the profile description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
