//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions turning database rows into the
//! shapes stored in the cache.

mod livestream;
mod reaction;
mod tag;
mod theme;
mod user;
