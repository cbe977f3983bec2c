//! Database models - SQLx-compatible structs for PostgreSQL tables

mod livestream;
mod reaction;
mod tag;
mod theme;
mod user;

pub use livestream::LivestreamOwnerModel;
pub use reaction::ReactionModel;
pub use tag::{LivestreamTagModel, TagModel};
pub use theme::ThemeModel;
pub use user::UserModel;
