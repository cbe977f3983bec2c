//! Tag entities - the global tag catalog and livestream attachments

use serde::Serialize;

use super::{LivestreamId, TagId};

/// Entry of the global tag catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    /// Create a new Tag
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A tag attached to a livestream, already joined with the tag's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivestreamTag {
    pub id: i64,
    pub livestream_id: LivestreamId,
    pub tag_id: TagId,
    pub tag_name: String,
}

impl LivestreamTag {
    /// Consume the attachment, keeping only the catalog entry
    pub fn into_tag(self) -> Tag {
        Tag {
            id: self.tag_id,
            name: self.tag_name,
        }
    }
}
