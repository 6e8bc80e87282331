//! Domain entities.

pub mod catalog;
pub mod playlist;
pub mod user;

pub use self::{playlist::Playlist, user::User};
