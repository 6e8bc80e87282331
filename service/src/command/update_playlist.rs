//! [`Command`] for updating a [`Playlist`].

use common::operations::{
    By, Commit, Select, Transact, Transacted, Update,
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

/// [`Command`] for updating a [`Playlist`].
///
/// The whole [`Playlist`] record is replaced: its [`Song`]s are overwritten
/// with the provided list, never merged with the stored one.
#[derive(Clone, Debug)]
pub struct UpdatePlaylist {
    /// ID of the [`Playlist`] to update.
    pub id: playlist::Id,

    /// ID of the [`User`] performing the update.
    pub executor: user::Id,

    /// New [`Name`] of the [`Playlist`].
    pub name: playlist::Name,

    /// New [`Description`] of the [`Playlist`].
    pub description: Option<playlist::Description>,

    /// New [`Song`]s of the [`Playlist`], replacing the stored ones.
    pub songs: Vec<Song>,
}

impl<Db, Ctl> Command<UpdatePlaylist> for Service<Db, Ctl>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Playlist>, playlist::Id>>,
            Ok = Option<Playlist>,
            Err = Traced<database::Error>,
        > + Database<Update<Playlist>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Playlist;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePlaylist,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePlaylist {
            id,
            executor,
            name,
            description,
            songs,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Existence is checked before ownership, so a stranger probing a
        // missing ID cannot tell it apart from a foreign-owned one.
        let mut playlist = tx
            .execute(Select(By::<Option<Playlist>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;
        if playlist.owner != executor {
            return Err(tracerr::new!(E::NotOwned(id)));
        }

        playlist.name = name;
        playlist.description = description;
        playlist.songs = songs;
        tx.execute(Update(playlist.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(playlist)
    }
}

/// Error of [`UpdatePlaylist`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Playlist`] doesn't exist.
    #[display("`Playlist(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] playlist::Id),

    /// [`Playlist`] is owned by another [`User`].
    #[display("`Playlist(id: {_0})` is owned by another `User`")]
    #[from(ignore)]
    NotOwned(#[error(not(source))] playlist::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{tests, CreatePlaylist},
        domain::{
            playlist::{self, song, Song},
            user, Playlist,
        },
    };

    use super::{Command as _, ExecutionError, UpdatePlaylist};

    async fn created(
        service: &crate::Service<tests::InMemory, tests::FakeCatalog>,
        owner: user::Id,
    ) -> Playlist {
        service
            .execute(CreatePlaylist {
                owner,
                name: playlist::Name::new("Road Trip").unwrap(),
                description: None,
                songs: vec![],
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn replaces_songs_wholesale() {
        let service = tests::service();
        let owner = user::Id::new();
        let playlist = created(&service, owner).await;

        let updated = service
            .execute(UpdatePlaylist {
                id: playlist.id,
                executor: owner,
                name: playlist.name.clone(),
                description: playlist.description.clone(),
                songs: vec![Song {
                    title: song::Title::new("Hello").unwrap(),
                    artist: song::Artist::new("Adele").unwrap(),
                }],
            })
            .await
            .unwrap();

        assert_eq!(updated.songs.len(), 1);
        assert_eq!(updated.owner, owner);
        assert_eq!(updated.created_at, playlist.created_at);
    }

    #[tokio::test]
    async fn rejects_missing_playlist() {
        let service = tests::service();

        let err = service
            .execute(UpdatePlaylist {
                id: playlist::Id::new(),
                executor: user::Id::new(),
                name: playlist::Name::new("Road Trip").unwrap(),
                description: None,
                songs: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotExists(_)));
    }

    #[tokio::test]
    async fn rejects_foreign_playlist() {
        let service = tests::service();
        let playlist = created(&service, user::Id::new()).await;

        let err = service
            .execute(UpdatePlaylist {
                id: playlist.id,
                executor: user::Id::new(),
                name: playlist.name.clone(),
                description: None,
                songs: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotOwned(_)));
    }
}
