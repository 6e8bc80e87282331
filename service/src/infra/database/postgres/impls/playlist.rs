//! [`Playlist`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use postgres_types::Json;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        playlist::{self, song, Song},
        user, Playlist,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// `JSONB` representation of a [`Song`].
#[derive(Debug, Deserialize, Serialize)]
struct SongRow {
    /// Title of the [`Song`].
    title: String,

    /// Artist of the [`Song`].
    artist: String,
}

/// Decodes a [`Playlist`] out of the provided [`Row`].
fn decode(row: &Row) -> Playlist {
    let Json(songs) = row.get::<_, Json<Vec<SongRow>>>("songs");
    Playlist {
        id: row.get("id"),
        owner: row.get("owner_id"),
        name: row.get("name"),
        description: row.get("description"),
        songs: songs
            .into_iter()
            .map(|SongRow { title, artist }| {
                // SAFETY: values were validated before being persisted.
                #[expect(unsafe_code, reason = "invariants are preserved")]
                unsafe {
                    Song {
                        title: song::Title::new_unchecked(title),
                        artist: song::Artist::new_unchecked(artist),
                    }
                }
            })
            .collect(),
        created_at: row.get("created_at"),
    }
}

/// Encodes the [`Song`]s of a [`Playlist`] for a `JSONB` column.
fn encode(songs: &[Song]) -> Json<Vec<SongRow>> {
    Json(
        songs
            .iter()
            .map(|s| SongRow {
                title: s.title.to_string(),
                artist: s.artist.to_string(),
            })
            .collect(),
    )
}

impl<C> Database<Select<By<Option<Playlist>, playlist::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Playlist>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Playlist>, playlist::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, owner_id, name, description, songs, created_at \
            FROM playlists \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(decode))
    }
}

impl<C> Database<Select<By<Vec<Playlist>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Playlist>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Playlist>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();

        // Creation order keeps listing stable across reads.
        const SQL: &str = "\
            SELECT id, owner_id, name, description, songs, created_at \
            FROM playlists \
            WHERE owner_id = $1::UUID \
            ORDER BY created_at, id";
        Ok(self
            .query(SQL, &[&owner])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(decode)
            .collect())
    }
}

impl<C> Database<Insert<Playlist>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Playlist>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(playlist): Insert<Playlist>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(playlist)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Playlist>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(playlist): Update<Playlist>,
    ) -> Result<Self::Ok, Self::Err> {
        let Playlist {
            id,
            owner,
            name,
            description,
            songs,
            created_at,
        } = playlist;
        let songs = encode(&songs);

        // Whole-record upsert: the song list is replaced, never merged.
        const SQL: &str = "\
            INSERT INTO playlists (\
                id, owner_id, name, description, songs, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::JSONB, \
                $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                description = EXCLUDED.description, \
                songs = EXCLUDED.songs";
        self.exec(
            SQL,
            &[&id, &owner, &name, &description, &songs, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Playlist, playlist::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Playlist, playlist::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM playlists \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
