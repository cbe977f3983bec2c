//! Reaction entity - an emoji reaction posted to a livestream

use super::{LivestreamId, UserId};

/// Reaction event
///
/// `user_id` is the viewer who reacted; reaction counts are aggregated per
/// owner of `livestream_id`, not per reacting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: i64,
    pub user_id: UserId,
    pub livestream_id: LivestreamId,
    pub emoji_name: String,
    pub created_at: i64,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(id: i64, user_id: UserId, livestream_id: LivestreamId, emoji_name: String) -> Self {
        Self {
            id,
            user_id,
            livestream_id,
            emoji_name,
            created_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_creation() {
        let reaction = Reaction::new(1, 100, 10, "innocent".to_string());
        assert_eq!(reaction.livestream_id, 10);
        assert_eq!(reaction.user_id, 100);
        assert_eq!(reaction.emoji_name, "innocent");
        assert_eq!(reaction.created_at, 0);
    }
}
