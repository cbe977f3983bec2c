//! Reaction model -> entity mapper

use pipe_core::entities::Reaction;

use crate::models::ReactionModel;

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: model.id,
            user_id: model.user_id,
            livestream_id: model.livestream_id,
            emoji_name: model.emoji_name,
            created_at: model.created_at,
        }
    }
}
