//! Spotify [`Catalog`] implementation.

use common::operations::{By, Exchange, Select};
use derive_more::{Debug, Display, Error as StdError, From};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::catalog::{AccessToken, ArtistName, SearchQuery, Track},
    infra::catalog::{self, Catalog},
};

/// [`Spotify`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// OAuth client ID issued by Spotify.
    pub client_id: String,

    /// OAuth client secret issued by Spotify.
    #[debug(skip)]
    pub client_secret: SecretString,

    /// URL of the token endpoint.
    pub token_url: String,

    /// Base URL of the Web API.
    pub api_url: String,
}

/// Spotify Web API [`Catalog`] client.
#[derive(Clone, Debug)]
pub struct Spotify {
    /// Configuration of this [`Spotify`] client.
    config: Config,

    /// HTTP client to perform requests with.
    http: reqwest::Client,
}

impl Spotify {
    /// Creates a new [`Spotify`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to initialize the underlying HTTP client.
    pub fn new(config: Config) -> Result<Self, Traced<catalog::Error>> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self { config, http })
    }
}

/// Response of the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    /// Issued access token.
    access_token: String,
}

/// Response of the search endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Found tracks.
    tracks: TrackPage,
}

/// Page of tracks in a [`SearchResponse`].
#[derive(Debug, Deserialize)]
struct TrackPage {
    /// Tracks of this page.
    items: Vec<TrackItem>,
}

/// Single track of a [`TrackPage`].
#[derive(Debug, Deserialize)]
struct TrackItem {
    /// Catalog identifier of the track.
    id: String,

    /// Name of the track.
    name: String,

    /// Artists performing the track.
    artists: Vec<ArtistItem>,
}

/// Single artist of a [`TrackItem`].
#[derive(Debug, Deserialize)]
struct ArtistItem {
    /// Name of the artist.
    name: String,
}

impl Catalog<Exchange> for Spotify {
    type Ok = AccessToken;
    type Err = Traced<catalog::Error>;

    /// Exchanges the configured client credentials for a fresh
    /// [`AccessToken`].
    ///
    /// Tokens are deliberately not cached: every exchange hits the provider.
    async fn execute(&self, _: Exchange) -> Result<Self::Ok, Self::Err> {
        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose_secret()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(tracerr::new!(catalog::Error::from(
                Error::AuthRejected(status)
            )));
        }

        let TokenResponse { access_token } = response
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        // SAFETY: the provider always returns a valid bearer token.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        Ok(unsafe { AccessToken::new_unchecked(access_token) })
    }
}

impl<'q, 't>
    Catalog<Select<By<Vec<Track>, (&'q SearchQuery, &'t AccessToken)>>>
    for Spotify
{
    type Ok = Vec<Track>;
    type Err = Traced<catalog::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Track>, (&'q SearchQuery, &'t AccessToken)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (query, token) = by.into_inner();

        let response = self
            .http
            .get(format!("{}/search", self.config.api_url))
            .query(&[("q", query.as_ref()), ("type", "track")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(tracerr::new!(catalog::Error::from(
                Error::SearchRejected(status)
            )));
        }

        let SearchResponse { tracks } = response
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(tracks
            .items
            .into_iter()
            .map(|TrackItem { id, name, artists }| Track {
                id: id.into(),
                name: name.into(),
                artists: artists
                    .into_iter()
                    .map(|ArtistItem { name }| ArtistName::from(name))
                    .collect(),
            })
            .collect())
    }
}

/// Spotify [`Catalog`] [`Error`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request failed or its body could not be decoded.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// Token endpoint rejected the credentials exchange.
    #[display("Credentials exchange rejected with status {_0}")]
    #[from(ignore)]
    AuthRejected(#[error(not(source))] reqwest::StatusCode),

    /// Search endpoint responded with a non-success status.
    #[display("Search rejected with status {_0}")]
    #[from(ignore)]
    SearchRejected(#[error(not(source))] reqwest::StatusCode),
}
