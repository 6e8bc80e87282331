//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_playlist;
pub mod create_user;
pub mod create_user_session;
pub mod delete_playlist;
pub mod search_catalog_tracks;
pub mod update_playlist;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_playlist::CreatePlaylist, create_user::CreateUser,
    create_user_session::CreateUserSession, delete_playlist::DeletePlaylist,
    search_catalog_tracks::SearchCatalogTracks,
    update_playlist::UpdatePlaylist,
};

#[cfg(test)]
pub(crate) mod tests {
    //! In-memory infrastructure for exercising [`Command`]s.

    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use common::operations::{
        By, Commit, Delete, Exchange, Insert, Select, Transact, Update,
    };
    use tracerr::Traced;

    use crate::{
        domain::{
            catalog::{AccessToken, ArtistName, SearchQuery, Track},
            playlist, user, Playlist, User,
        },
        infra::{catalog, database, Catalog, Database},
        Config, Service,
    };

    /// [`Database`] backed by process memory.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct InMemory {
        /// Stored [`User`]s.
        users: Arc<Mutex<Vec<User>>>,

        /// Stored [`Playlist`]s.
        playlists: Arc<Mutex<Vec<Playlist>>>,
    }

    impl<'l> Database<Select<By<Option<User>, &'l user::Email>>> for InMemory {
        type Ok = Option<User>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<User>, &'l user::Email>>,
        ) -> Result<Self::Ok, Self::Err> {
            let email = by.into_inner();
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| &u.email == email)
                .cloned())
        }
    }

    impl Database<Insert<User>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Insert(user): Insert<User>,
        ) -> Result<Self::Ok, Self::Err> {
            self.users.lock().unwrap().push(user);
            Ok(())
        }
    }

    impl Database<Select<By<Option<Playlist>, playlist::Id>>> for InMemory {
        type Ok = Option<Playlist>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<Playlist>, playlist::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let id = by.into_inner();
            Ok(self
                .playlists
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }
    }

    impl Database<Select<By<Vec<Playlist>, user::Id>>> for InMemory {
        type Ok = Vec<Playlist>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Vec<Playlist>, user::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let owner = by.into_inner();
            Ok(self
                .playlists
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.owner == owner)
                .cloned()
                .collect())
        }
    }

    impl Database<Insert<Playlist>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Insert(playlist): Insert<Playlist>,
        ) -> Result<Self::Ok, Self::Err> {
            self.execute(Update(playlist)).await
        }
    }

    impl Database<Update<Playlist>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Update(playlist): Update<Playlist>,
        ) -> Result<Self::Ok, Self::Err> {
            let mut playlists = self.playlists.lock().unwrap();
            if let Some(p) = playlists.iter_mut().find(|p| p.id == playlist.id)
            {
                *p = playlist;
            } else {
                playlists.push(playlist);
            }
            Ok(())
        }
    }

    impl Database<Delete<By<Playlist, playlist::Id>>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Delete(by): Delete<By<Playlist, playlist::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let id = by.into_inner();
            self.playlists.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }

    impl Database<Transact> for InMemory {
        type Ok = Self;
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
            Ok(self.clone())
        }
    }

    impl Database<Commit> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    /// [`Catalog`] returning canned [`Track`]s.
    #[derive(Clone, Copy, Debug, Default)]
    pub(crate) struct FakeCatalog;

    impl Catalog<Exchange> for FakeCatalog {
        type Ok = AccessToken;
        type Err = Traced<catalog::Error>;

        async fn execute(&self, _: Exchange) -> Result<Self::Ok, Self::Err> {
            #[expect(unsafe_code, reason = "invariants are preserved")]
            Ok(unsafe { AccessToken::new_unchecked("token".into()) })
        }
    }

    impl<'q, 't>
        Catalog<Select<By<Vec<Track>, (&'q SearchQuery, &'t AccessToken)>>>
        for FakeCatalog
    {
        type Ok = Vec<Track>;
        type Err = Traced<catalog::Error>;

        async fn execute(
            &self,
            Select(by): Select<
                By<Vec<Track>, (&'q SearchQuery, &'t AccessToken)>,
            >,
        ) -> Result<Self::Ok, Self::Err> {
            let (query, _) = by.into_inner();
            Ok(vec![Track {
                id: "2takcwOaAZWiXQijPHIx7B".into(),
                name: query.to_string().into(),
                artists: vec![ArtistName::from("Rick Astley")],
            }])
        }
    }

    /// Creates a [`Service`] wired to an [`InMemory`] database and a
    /// [`FakeCatalog`].
    pub(crate) fn service() -> Service<InMemory, FakeCatalog> {
        let secret = b"test-secret";
        Service::new(
            Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    secret,
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    secret,
                ),
                session_ttl: Duration::from_secs(24 * 60 * 60),
            },
            InMemory::default(),
            FakeCatalog,
        )
    }
}
