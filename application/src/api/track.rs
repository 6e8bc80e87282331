//! Catalog search endpoints of the REST API.

use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::catalog::{self, Track},
};

use crate::{define_error, AsError, Error, Service};

/// Query parameters of the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query to search [`Track`]s by.
    pub query: String,
}

/// Representation of a [`Track`] in responses.
#[derive(Debug, Serialize)]
pub struct TrackBody {
    /// ID of the [`Track`] in the external catalog.
    pub id: String,

    /// Name of the [`Track`].
    pub name: String,

    /// Artists performing the [`Track`].
    pub artists: Vec<ArtistBody>,
}

/// Representation of a [`Track`] artist in responses.
#[derive(Debug, Serialize)]
pub struct ArtistBody {
    /// Name of the artist.
    pub name: String,
}

impl From<Track> for TrackBody {
    fn from(track: Track) -> Self {
        Self {
            id: track.id.to_string(),
            name: track.name.to_string(),
            artists: track
                .artists
                .into_iter()
                .map(|a| ArtistBody {
                    name: a.to_string(),
                })
                .collect(),
        }
    }
}

/// `GET /api/songs/search` endpoint searching [`Track`]s in the external
/// catalog.
///
/// Does not require authentication.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_QUERY` - if the provided `query` parameter is blank.
pub async fn search(
    Extension(service): Extension<Service>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TrackBody>>, Error> {
    let SearchParams { query } = params;

    let query =
        catalog::SearchQuery::new(query).ok_or(RequestError::InvalidQuery)?;

    service
        .execute(command::SearchCatalogTracks { query })
        .await
        .map_err(AsError::into_error)
        .map(|tracks| Json(tracks.into_iter().map(Into::into).collect()))
}

impl AsError for command::search_catalog_tracks::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum RequestError {
        #[code = "INVALID_QUERY"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `query` parameter provided"]
        InvalidQuery,
    }
}
