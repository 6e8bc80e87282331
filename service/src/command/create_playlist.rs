//! [`Command`] for creating a new [`Playlist`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    playlist::{Description, Name},
    User,
};
use crate::{
    domain::{
        playlist::{self, Song},
        user, Playlist,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Playlist`].
#[derive(Clone, Debug)]
pub struct CreatePlaylist {
    /// ID of the [`User`] creating the [`Playlist`] and owning it.
    pub owner: user::Id,

    /// [`Name`] of a new [`Playlist`].
    pub name: playlist::Name,

    /// [`Description`] of a new [`Playlist`].
    pub description: Option<playlist::Description>,

    /// Initial [`Song`]s of a new [`Playlist`].
    pub songs: Vec<Song>,
}

impl<Db, Ctl> Command<CreatePlaylist> for Service<Db, Ctl>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Playlist>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Playlist;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePlaylist,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePlaylist {
            owner,
            name,
            description,
            songs,
        } = cmd;

        let playlist = Playlist {
            id: playlist::Id::new(),
            owner,
            name,
            description,
            songs,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(playlist.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(playlist)
    }
}

/// Error of [`CreatePlaylist`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{command::tests, domain::{playlist, user}};

    use super::{Command as _, CreatePlaylist};

    #[tokio::test]
    async fn creates_empty_playlist() {
        let service = tests::service();

        let playlist = service
            .execute(CreatePlaylist {
                owner: user::Id::new(),
                name: playlist::Name::new("Road Trip").unwrap(),
                description: None,
                songs: vec![],
            })
            .await
            .unwrap();

        assert_eq!(playlist.name.to_string(), "Road Trip");
        assert!(playlist.songs.is_empty());
    }
}
