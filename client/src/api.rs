//! Typed client of the server REST API.

use derive_more::{Display, Error as StdError, From};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Client of the server REST API.
#[derive(Debug)]
pub struct Api {
    /// Base URL of the server.
    base: String,

    /// HTTP client to perform requests with.
    http: reqwest::Client,

    /// Authentication token to send with requests, if any.
    token: Option<String>,
}

/// User returned by the server.
#[derive(Debug, Deserialize)]
pub struct User {
    /// ID of the user.
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Name of the user.
    pub username: String,

    /// Email address of the user.
    pub email: String,
}

/// Response of the login endpoint.
#[derive(Debug, Deserialize)]
pub struct Login {
    /// Issued authentication token.
    pub token: String,

    /// User the token was issued for.
    pub user: User,
}

/// Playlist returned by the server.
#[derive(Debug, Deserialize)]
pub struct Playlist {
    /// ID of the playlist.
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Name of the playlist.
    pub name: String,

    /// Description of the playlist, if any.
    #[serde(default)]
    pub description: Option<String>,

    /// Songs of the playlist, in display order.
    pub songs: Vec<Song>,
}

/// Song of a [`Playlist`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Song {
    /// Title of the song.
    pub title: String,

    /// Artist of the song.
    pub artist: String,
}

/// Track returned by a catalog search.
#[derive(Debug, Deserialize)]
pub struct Track {
    /// ID of the track in the catalog.
    pub id: String,

    /// Name of the track.
    pub name: String,

    /// Artists performing the track.
    pub artists: Vec<Artist>,
}

/// Artist of a [`Track`].
#[derive(Debug, Deserialize)]
pub struct Artist {
    /// Name of the artist.
    pub name: String,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Machine-readable error code.
    code: String,

    /// Human-readable error message.
    message: String,
}

impl Api {
    /// Creates a new [`Api`] client of the server at the provided `base` URL.
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(
        base: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, Error> {
        Ok(Self {
            base: base.into(),
            http: reqwest::Client::builder().build()?,
            token,
        })
    }

    /// Registers a new user.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, Error> {
        let resp = self
            .http
            .post(format!("{}/api/auth/register", self.base))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Exchanges credentials for an authentication token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Login, Error> {
        let resp = self
            .http
            .post(format!("{}/api/auth/login", self.base))
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Lists the playlists of the logged-in user.
    pub async fn playlists(&self) -> Result<Vec<Playlist>, Error> {
        let resp = self
            .authorized(
                self.http.get(format!("{}/api/playlists", self.base)),
            )?
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Creates a new playlist.
    pub async fn create_playlist(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist, Error> {
        let resp = self
            .authorized(
                self.http.post(format!("{}/api/playlists", self.base)),
            )?
            .json(&json!({
                "name": name,
                "description": description,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Replaces the provided playlist on the server.
    pub async fn update_playlist(
        &self,
        playlist: &Playlist,
    ) -> Result<Playlist, Error> {
        let resp = self
            .authorized(self.http.put(format!(
                "{}/api/playlists/{}",
                self.base, playlist.id,
            )))?
            .json(&json!({
                "name": playlist.name,
                "description": playlist.description,
                "songs": playlist.songs,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Deletes a playlist.
    pub async fn delete_playlist(&self, id: Uuid) -> Result<(), Error> {
        let resp = self
            .authorized(
                self.http
                    .delete(format!("{}/api/playlists/{id}", self.base)),
            )?
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error(resp).await)
        }
    }

    /// Searches tracks in the music catalog.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>, Error> {
        let resp = self
            .http
            .get(format!("{}/api/songs/search", self.base))
            .query(&[("query", query)])
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Attaches the authentication token to the provided request.
    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, Error> {
        self.token
            .as_deref()
            .map(|token| request.bearer_auth(token))
            .ok_or(Error::NotLoggedIn)
    }

    /// Parses a successful response body, or converts an error one.
    async fn parse<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(Self::error(resp).await)
        }
    }

    /// Converts an error response into an [`Error`].
    async fn error(resp: reqwest::Response) -> Error {
        let status = resp.status();
        match resp.json::<ErrorBody>().await {
            Ok(body) => Error::Api {
                code: body.code,
                message: body.message,
            },
            Err(_) => Error::Status(status),
        }
    }
}

/// Error of an [`Api`] operation.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request failed or its body could not be decoded.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// Server rejected the request with a structured error.
    #[display("[{code}]: {message}")]
    #[from(ignore)]
    Api {
        /// Machine-readable error code.
        code: String,

        /// Human-readable error message.
        message: String,
    },

    /// Server responded with a non-success status and no structured error.
    #[display("Server responded with status {_0}")]
    #[from(ignore)]
    Status(#[error(not(source))] reqwest::StatusCode),

    /// No stored session to authorize the request with.
    #[display("Not logged in, run `login` first")]
    NotLoggedIn,
}
