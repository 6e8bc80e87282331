//! External catalog definitions.
//!
//! Entities of this module are transient projections of the external music
//! catalog: nothing here is ever persisted.

use std::str::FromStr;

use derive_more::{AsRef, Display, From};

/// Track of the external catalog, as returned by a search.
#[derive(Clone, Debug)]
pub struct Track {
    /// ID of this [`Track`] in the external catalog.
    pub id: TrackId,

    /// Name of this [`Track`].
    pub name: TrackName,

    /// Names of the artists performing this [`Track`], in catalog order.
    pub artists: Vec<ArtistName>,
}

/// Opaque upstream identifier of a [`Track`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct TrackId(String);

/// Name of a [`Track`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct TrackName(String);

/// Name of an artist performing a [`Track`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct ArtistName(String);

/// Free-text query to search [`Track`]s by.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a new [`SearchQuery`] if the given `query` is valid.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Option<Self> {
        let query = query.into();
        (!query.trim().is_empty()).then_some(Self(query))
    }
}

impl FromStr for SearchQuery {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `SearchQuery`")
    }
}

/// Short-lived bearer token of the external catalog.
#[derive(AsRef, Clone, Debug, Display)]
#[as_ref(str, String)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new [`AccessToken`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`AccessToken`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod search_query_spec {
    use super::SearchQuery;

    #[test]
    fn rejects_empty_and_blank() {
        assert!(SearchQuery::new("").is_none());
        assert!(SearchQuery::new("  ").is_none());
    }

    #[test]
    fn accepts_free_text() {
        assert!(SearchQuery::new("adele").is_some());
    }
}
