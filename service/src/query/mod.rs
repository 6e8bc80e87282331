//! [`Query`] definition.

pub mod playlist;
pub mod playlists;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, Ctl, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db, Ctl>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{tests, Command as _, CreatePlaylist},
        domain::{playlist, user},
        query,
    };

    #[tokio::test]
    async fn selects_playlist_by_id() {
        let service = tests::service();

        let created = service
            .execute(CreatePlaylist {
                owner: user::Id::new(),
                name: playlist::Name::new("Focus").unwrap(),
                description: None,
                songs: vec![],
            })
            .await
            .unwrap();

        let found = service
            .execute(query::playlist::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);

        let missing = service
            .execute(query::playlist::ById::by(playlist::Id::new()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn selects_playlists_of_owner_only() {
        let service = tests::service();
        let owner = user::Id::new();

        for name in ["Morning", "Evening"] {
            drop(
                service
                    .execute(CreatePlaylist {
                        owner,
                        name: playlist::Name::new(name).unwrap(),
                        description: None,
                        songs: vec![],
                    })
                    .await
                    .unwrap(),
            );
        }
        drop(
            service
                .execute(CreatePlaylist {
                    owner: user::Id::new(),
                    name: playlist::Name::new("Foreign").unwrap(),
                    description: None,
                    songs: vec![],
                })
                .await
                .unwrap(),
        );

        let playlists = service
            .execute(query::playlists::ByOwner::by(owner))
            .await
            .unwrap();
        assert_eq!(playlists.len(), 2);
        assert!(playlists.iter().all(|p| p.owner == owner));
    }
}
