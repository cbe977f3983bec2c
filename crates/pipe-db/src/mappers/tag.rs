//! Tag model -> entity mappers

use pipe_core::entities::{LivestreamTag, Tag};

use crate::models::{LivestreamTagModel, TagModel};

/// Convert TagModel to Tag entity
impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag::new(model.id, model.name)
    }
}

/// Convert the joined livestream_tags row to LivestreamTag entity
impl From<LivestreamTagModel> for LivestreamTag {
    fn from(model: LivestreamTagModel) -> Self {
        LivestreamTag {
            id: model.id,
            livestream_id: model.livestream_id,
            tag_id: model.tag_id,
            tag_name: model.tag_name,
        }
    }
}
