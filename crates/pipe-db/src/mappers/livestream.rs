//! Livestream model -> entity mapper

use pipe_core::entities::LivestreamOwner;

use crate::models::LivestreamOwnerModel;

/// Convert LivestreamOwnerModel to LivestreamOwner entity
impl From<LivestreamOwnerModel> for LivestreamOwner {
    fn from(model: LivestreamOwnerModel) -> Self {
        LivestreamOwner::new(model.id, model.user_id)
    }
}
