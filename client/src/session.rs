//! Stored session of the client.

use std::{fs, io, path::PathBuf};

use derive_more::{Display, Error as StdError, From};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session stored on disk between invocations.
#[derive(Debug, Deserialize, Serialize)]
pub struct Session {
    /// Authentication token issued by the server.
    pub token: String,

    /// ID of the logged-in user.
    pub user_id: Uuid,

    /// Name of the logged-in user.
    pub username: String,
}

impl Session {
    /// Loads the stored [`Session`], if any.
    ///
    /// # Errors
    ///
    /// If the session file exists but cannot be read or parsed.
    pub fn load() -> Result<Option<Self>, Error> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Stores this [`Session`] on disk.
    ///
    /// # Errors
    ///
    /// If the session file cannot be written.
    pub fn store(&self) -> Result<(), Error> {
        let path = Self::path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Removes the stored [`Session`], if any.
    ///
    /// # Errors
    ///
    /// If the session file exists but cannot be removed.
    pub fn clear() -> Result<(), Error> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Returns the path of the session file.
    fn path() -> Result<PathBuf, Error> {
        dirs::config_dir()
            .map(|dir| dir.join("playlists-cli").join("session.json"))
            .ok_or(Error::NoConfigDir)
    }
}

/// Error of operating on the stored [`Session`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Filesystem operation failed.
    #[display("Filesystem operation failed: {_0}")]
    Io(io::Error),

    /// Session file contains malformed JSON.
    #[display("Malformed session file: {_0}")]
    Json(serde_json::Error),

    /// No configuration directory is available on this platform.
    #[display("No configuration directory is available")]
    NoConfigDir,
}
