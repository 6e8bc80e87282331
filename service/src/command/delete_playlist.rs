//! [`Command`] for deleting a [`Playlist`].

use common::operations::{
    By, Commit, Delete, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{playlist, user, Playlist},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Playlist`].
#[derive(Clone, Copy, Debug)]
pub struct DeletePlaylist {
    /// ID of the [`Playlist`] to delete.
    pub id: playlist::Id,

    /// ID of the [`User`] performing the deletion.
    pub executor: user::Id,
}

impl<Db, Ctl> Command<DeletePlaylist> for Service<Db, Ctl>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Playlist>, playlist::Id>>,
            Ok = Option<Playlist>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Playlist, playlist::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePlaylist,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePlaylist { id, executor } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let playlist = tx
            .execute(Select(By::<Option<Playlist>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;
        if playlist.owner != executor {
            return Err(tracerr::new!(E::NotOwned(id)));
        }

        tx.execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(())
    }
}

/// Error of [`DeletePlaylist`] [`Command`] execution.
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
    use common::operations::{By, Select};

    use crate::{
        command::{tests, CreatePlaylist},
        domain::{playlist, user, Playlist},
    };

    use super::{Command as _, DeletePlaylist, ExecutionError};

    #[tokio::test]
    async fn deletes_owned_playlist() {
        let service = tests::service();
        let owner = user::Id::new();
        let playlist = service
            .execute(CreatePlaylist {
                owner,
                name: playlist::Name::new("Road Trip").unwrap(),
                description: None,
                songs: vec![],
            })
            .await
            .unwrap();

        service
            .execute(DeletePlaylist {
                id: playlist.id,
                executor: owner,
            })
            .await
            .unwrap();

        let stored = service
            .database()
            .execute(Select(By::<Option<Playlist>, _>::new(playlist.id)))
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn rejects_missing_playlist() {
        let service = tests::service();

        let err = service
            .execute(DeletePlaylist {
                id: playlist::Id::new(),
                executor: user::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotExists(_)));
    }

    #[tokio::test]
    async fn rejects_foreign_playlist() {
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

        let err = service
            .execute(DeletePlaylist {
                id: playlist.id,
                executor: user::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotOwned(_)));
    }
}
