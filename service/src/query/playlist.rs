//! [`Query`] collection related to a single [`Playlist`].

use common::operations::By;

use crate::domain::{playlist, Playlist};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Playlist`] by its [`playlist::Id`].
pub type ById = DatabaseQuery<By<Option<Playlist>, playlist::Id>>;
