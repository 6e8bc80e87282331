//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Command line client of the playlist curation system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the server.
    #[arg(
        long,
        env = "PLAYLISTS_SERVER",
        default_value = "http://127.0.0.1:8080"
    )]
    pub server: String,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Registers a new user.
    Register {
        /// Name of the new user.
        #[arg(long)]
        username: String,

        /// Email address of the new user.
        #[arg(long)]
        email: String,

        /// Password of the new user.
        #[arg(long)]
        password: String,
    },

    /// Logs in and stores the received session.
    Login {
        /// Email address of the user.
        #[arg(long)]
        email: String,

        /// Password of the user.
        #[arg(long)]
        password: String,
    },

    /// Discards the stored session.
    Logout,

    /// Lists the playlists of the logged-in user.
    Playlists,

    /// Creates a new playlist.
    Create {
        /// Name of the new playlist.
        #[arg(long)]
        name: String,

        /// Description of the new playlist.
        #[arg(long)]
        description: Option<String>,
    },

    /// Shows the songs of a playlist.
    Show {
        /// ID of the playlist to show.
        id: Uuid,
    },

    /// Renames a playlist or changes its description.
    Edit {
        /// ID of the playlist to edit.
        id: Uuid,

        /// New name of the playlist.
        #[arg(long)]
        name: Option<String>,

        /// New description of the playlist.
        #[arg(long)]
        description: Option<String>,
    },

    /// Deletes a playlist.
    Delete {
        /// ID of the playlist to delete.
        id: Uuid,
    },

    /// Searches tracks in the music catalog.
    Search {
        /// Free-text query to search tracks by.
        query: String,
    },

    /// Searches the catalog and appends the first found track to a playlist.
    AddTrack {
        /// ID of the playlist to append the track to.
        id: Uuid,

        /// Free-text query to search the track by.
        query: String,
    },
}
