//! [`Catalog`]-related implementations.

pub mod spotify;

use derive_more::{Display, Error as StdError, From};

pub use self::spotify::Spotify;

/// External catalog operation.
pub use common::Handler as Catalog;

/// [`Catalog`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Spotify`] error.
    Spotify(spotify::Error),
}
