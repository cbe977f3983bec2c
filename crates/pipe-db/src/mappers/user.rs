//! User model -> entity mapper

use pipe_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            display_name: model.display_name.unwrap_or_default(),
            description: model.description.unwrap_or_default(),
            password_hash: model.password,
        }
    }
}
