//! [`Query`] collection related to multiple [`Playlist`]s.

use common::operations::By;

use crate::domain::{user, Playlist};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Playlist`]s owned by a [`User`].
///
/// The result is ordered by creation time.
///
/// [`User`]: crate::domain::User
pub type ByOwner = DatabaseQuery<By<Vec<Playlist>, user::Id>>;
