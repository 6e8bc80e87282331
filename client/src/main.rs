//! Command line client of the playlist curation system.

mod api;
mod args;
mod session;

use std::process::ExitCode;

use clap::Parser as _;

use crate::{
    api::{Api, Song},
    args::{Args, Command},
    session::Session,
};

#[tokio::main]
async fn main() -> ExitCode {
    let Args { server, command } = Args::parse();

    match run(server, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Executes the provided [`Command`] against the server.
async fn run(server: String, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let stored = Session::load()?;
    let api = Api::new(server, stored.map(|s| s.token))?;

    match command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let user = api.register(&username, &email, &password).await?;
            println!("registered `{}` <{}>", user.username, user.email);
        }

        Command::Login { email, password } => {
            let login = api.login(&email, &password).await?;
            Session {
                token: login.token,
                user_id: login.user.id,
                username: login.user.username.clone(),
            }
            .store()?;
            println!("logged in as `{}`", login.user.username);
        }

        Command::Logout => {
            Session::clear()?;
            println!("logged out");
        }

        Command::Playlists => {
            let playlists = api.playlists().await?;
            if playlists.is_empty() {
                println!("no playlists yet");
            }
            for p in playlists {
                println!("{}  {} ({} songs)", p.id, p.name, p.songs.len());
                for s in &p.songs {
                    println!("    {} - {}", s.artist, s.title);
                }
            }
        }

        Command::Create { name, description } => {
            let playlist =
                api.create_playlist(&name, description.as_deref()).await?;
            println!("created `{}` ({})", playlist.name, playlist.id);
        }

        Command::Show { id } => {
            let playlist = find_playlist(&api, id).await?;
            println!("{}", playlist.name);
            if let Some(description) = &playlist.description {
                println!("{description}");
            }
            for s in &playlist.songs {
                println!("    {} - {}", s.artist, s.title);
            }
        }

        Command::Edit {
            id,
            name,
            description,
        } => {
            let mut playlist = find_playlist(&api, id).await?;
            if let Some(name) = name {
                playlist.name = name;
            }
            if let Some(description) = description {
                playlist.description = Some(description);
            }
            let updated = api.update_playlist(&playlist).await?;
            println!("updated `{}`", updated.name);
        }

        Command::Delete { id } => {
            api.delete_playlist(id).await?;
            println!("deleted {id}");
        }

        Command::Search { query } => {
            for track in api.search(&query).await? {
                let artists = track
                    .artists
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}  {} - {}", track.id, artists, track.name);
            }
        }

        Command::AddTrack { id, query } => {
            let track = api
                .search(&query)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| format!("no tracks found for `{query}`"))?;

            let mut playlist = find_playlist(&api, id).await?;

            // Mirrors the catalog entry into a playlist song, keeping only
            // the first artist.
            playlist.songs.push(Song {
                title: track.name,
                artist: track
                    .artists
                    .into_iter()
                    .next()
                    .map_or_else(|| "Unknown Artist".to_owned(), |a| a.name),
            });

            let updated = api.update_playlist(&playlist).await?;
            println!(
                "added to `{}` ({} songs)",
                updated.name,
                updated.songs.len(),
            );
        }
    }

    Ok(())
}

/// Finds a playlist of the logged-in user by its ID.
///
/// The server exposes no single-playlist endpoint, so the whole list is
/// fetched and filtered locally.
async fn find_playlist(
    api: &Api,
    id: uuid::Uuid,
) -> Result<api::Playlist, Box<dyn std::error::Error>> {
    Ok(api
        .playlists()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| format!("no playlist with ID `{id}`"))?)
}
