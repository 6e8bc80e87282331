//! [`Playlist`] endpoints of the REST API.
//!
//! All of them require an authenticated [`Session`], and every read and
//! mutation is scoped to the [`Playlist`]s owned by the session user.

use axum::{extract::Path, Extension, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{
        self,
        playlist::{self, song},
        Playlist,
    },
    query,
};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service, Session};

/// Request body of the [`Playlist`] creation and update endpoints.
///
/// The update endpoint replaces the whole record, so the `songs` list is
/// always the full new contents, never a diff.
#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    /// Name of the [`Playlist`].
    pub name: String,

    /// Description of the [`Playlist`].
    #[serde(default)]
    pub description: Option<String>,

    /// Songs of the [`Playlist`].
    #[serde(default)]
    pub songs: Vec<SongBody>,
}

/// Representation of a [`Playlist`] song in requests and responses.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SongBody {
    /// Title of the song.
    pub title: String,

    /// Artist of the song.
    pub artist: String,
}

/// Representation of a [`Playlist`] in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistBody {
    /// ID of the [`Playlist`].
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// ID of the [`User`] owning the [`Playlist`].
    ///
    /// [`User`]: domain::User
    pub owner: Uuid,

    /// Name of the [`Playlist`].
    pub name: String,

    /// Description of the [`Playlist`], if any.
    ///
    /// Serialized as `null` when absent.
    pub description: Option<String>,

    /// Songs of the [`Playlist`], in display order.
    pub songs: Vec<SongBody>,

    /// Time when the [`Playlist`] was created, as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://datatracker.ietf.org/doc/html/rfc3339
    pub created_at: String,
}

impl From<Playlist> for PlaylistBody {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: playlist.id.into(),
            owner: playlist.owner.into(),
            name: playlist.name.to_string(),
            description: playlist.description.map(|d| d.to_string()),
            songs: playlist
                .songs
                .into_iter()
                .map(|s| SongBody {
                    title: s.title.to_string(),
                    artist: s.artist.to_string(),
                })
                .collect(),
            created_at: playlist.created_at.to_rfc3339(),
        }
    }
}

/// Validates the provided [`PlaylistRequest`] fields against the domain
/// formats.
fn validate(
    req: PlaylistRequest,
) -> Result<
    (playlist::Name, Option<playlist::Description>, Vec<domain::playlist::Song>),
    Error,
> {
    let PlaylistRequest {
        name,
        description,
        songs,
    } = req;

    let name = playlist::Name::new(name).ok_or(RequestError::InvalidName)?;
    let description = description
        .map(|d| {
            playlist::Description::new(d)
                .ok_or(RequestError::InvalidDescription)
        })
        .transpose()?;
    let songs = songs
        .into_iter()
        .map(|SongBody { title, artist }| {
            Ok(domain::playlist::Song {
                title: song::Title::new(title)
                    .ok_or(RequestError::InvalidSong)?,
                artist: song::Artist::new(artist)
                    .ok_or(RequestError::InvalidSong)?,
            })
        })
        .collect::<Result<_, RequestError>>()?;

    Ok((name, description, songs))
}

/// `GET /api/playlists` endpoint listing all the [`Playlist`]s owned by the
/// session user.
pub async fn list(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<PlaylistBody>>, Error> {
    service
        .execute(query::playlists::ByOwner::by(session.user_id))
        .await
        .map_err(AsError::into_error)
        .map(|playlists| {
            Json(playlists.into_iter().map(Into::into).collect())
        })
}

/// `POST /api/playlists` endpoint creating a new [`Playlist`] owned by the
/// session user.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_NAME`, `INVALID_DESCRIPTION`, `INVALID_SONG` - if the provided
///   fields are malformed.
pub async fn create(
    Extension(service): Extension<Service>,
    session: Session,
    Json(req): Json<PlaylistRequest>,
) -> Result<(StatusCode, Json<PlaylistBody>), Error> {
    let (name, description, songs) = validate(req)?;

    let playlist = service
        .execute(command::CreatePlaylist {
            owner: session.user_id,
            name,
            description,
            songs,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(playlist.into())))
}

/// `PUT /api/playlists/:id` endpoint replacing a [`Playlist`] owned by the
/// session user.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_NAME`, `INVALID_DESCRIPTION`, `INVALID_SONG` - if the provided
///   fields are malformed;
/// - `PLAYLIST_NOT_FOUND` - if no `Playlist` with the provided ID exists;
/// - `NOT_OWNER` - if the `Playlist` is owned by another `User`.
pub async fn update(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<PlaylistRequest>,
) -> Result<Json<PlaylistBody>, Error> {
    let (name, description, songs) = validate(req)?;

    let playlist = service
        .execute(command::UpdatePlaylist {
            id: id.into(),
            executor: session.user_id,
            name,
            description,
            songs,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(playlist.into()))
}

/// Response body of the [`Playlist`] deletion endpoint.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DeletedBody {
    /// Human-readable confirmation message.
    pub message: &'static str,
}

/// `DELETE /api/playlists/:id` endpoint deleting a [`Playlist`] owned by the
/// session user.
///
/// # Errors
///
/// Possible error codes:
/// - `PLAYLIST_NOT_FOUND` - if no `Playlist` with the provided ID exists;
/// - `NOT_OWNER` - if the `Playlist` is owned by another `User`.
pub async fn remove(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedBody>, Error> {
    service
        .execute(command::DeletePlaylist {
            id: id.into(),
            executor: session.user_id,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(DeletedBody {
        message: "Playlist deleted",
    }))
}

impl AsError for command::update_playlist::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => {
                Some(PlaylistError::NotFound.into())
            }
            Self::NotOwned(_) => Some(PlaylistError::NotOwner.into()),
        }
    }
}

impl AsError for command::delete_playlist::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => {
                Some(PlaylistError::NotFound.into())
            }
            Self::NotOwned(_) => Some(PlaylistError::NotOwner.into()),
        }
    }
}

impl AsError for command::create_playlist::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum RequestError {
        #[code = "INVALID_NAME"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `name` provided"]
        InvalidName,

        #[code = "INVALID_DESCRIPTION"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `description` provided"]
        InvalidDescription,

        #[code = "INVALID_SONG"]
        #[status = BAD_REQUEST]
        #[message = "Invalid song provided"]
        InvalidSong,
    }
}

define_error! {
    enum PlaylistError {
        #[code = "PLAYLIST_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Playlist` with the provided ID does not exist"]
        NotFound,

        #[code = "NOT_OWNER"]
        #[status = FORBIDDEN]
        #[message = "`Playlist` is owned by another `User`"]
        NotOwner,
    }
}
