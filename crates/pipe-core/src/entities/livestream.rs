//! Livestream ownership

use super::{LivestreamId, UserId};

/// Which user owns a livestream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivestreamOwner {
    pub livestream_id: LivestreamId,
    pub user_id: UserId,
}

impl LivestreamOwner {
    /// Create a new ownership record
    pub fn new(livestream_id: LivestreamId, user_id: UserId) -> Self {
        Self {
            livestream_id,
            user_id,
        }
    }
}
