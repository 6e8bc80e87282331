//! [`Command`] for searching [`Track`]s in the external catalog.

use common::operations::{By, Exchange, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::catalog::{AccessToken, SearchQuery, Track},
    infra::{catalog, Catalog},
    Service,
};

use super::Command;

/// [`Command`] for searching [`Track`]s in the external catalog.
#[derive(Clone, Debug, From)]
pub struct SearchCatalogTracks {
    /// [`SearchQuery`] to search [`Track`]s by.
    pub query: SearchQuery,
}

impl<Db, Ctl> Command<SearchCatalogTracks> for Service<Db, Ctl>
where
    Ctl: Catalog<Exchange, Ok = AccessToken, Err = Traced<catalog::Error>>
        + for<'q, 't> Catalog<
            Select<By<Vec<Track>, (&'q SearchQuery, &'t AccessToken)>>,
            Ok = Vec<Track>,
            Err = Traced<catalog::Error>,
        >,
{
    type Ok = Vec<Track>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SearchCatalogTracks,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SearchCatalogTracks { query } = cmd;

        // A fresh token is exchanged for every search.
        let token = self
            .catalog()
            .execute(Exchange)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.catalog()
            .execute(Select(By::new((&query, &token))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SearchCatalogTracks`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Catalog`] error.
    #[display("`Catalog` operation failed: {_0}")]
    Catalog(catalog::Error),
}

#[cfg(test)]
mod spec {
    use crate::{command::tests, domain::catalog::SearchQuery};

    use super::{Command as _, SearchCatalogTracks};

    #[tokio::test]
    async fn returns_catalog_tracks() {
        let service = tests::service();

        let tracks = service
            .execute(SearchCatalogTracks {
                query: SearchQuery::new("never gonna").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name.to_string(), "never gonna");
    }

    // `tokio::spawn` requires the command future to be `Send`, which only
    // holds when the catalog bound is met for independent query and token
    // lifetimes.
    #[tokio::test]
    async fn searches_from_spawned_task() {
        let service = tests::service();

        let tracks = tokio::spawn(async move {
            service
                .execute(SearchCatalogTracks {
                    query: SearchQuery::new("never gonna").unwrap(),
                })
                .await
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(tracks.len(), 1);
    }
}
