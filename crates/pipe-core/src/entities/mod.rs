//! Domain entities - rows mirrored by the in-memory cache

mod livestream;
mod reaction;
mod tag;
mod theme;
mod user;

pub use livestream::LivestreamOwner;
pub use reaction::Reaction;
pub use tag::{LivestreamTag, Tag};
pub use theme::Theme;
pub use user::User;

/// Identifier of a user account
pub type UserId = i64;

/// Identifier of a livestream
pub type LivestreamId = i64;

/// Identifier of a catalog tag
pub type TagId = i64;
