//! [`Playlist`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Named, ordered collection of [`Song`]s curated by a single [`User`].
///
/// A [`Playlist`] has exactly one owner, assigned at creation and never
/// reassigned. All reads and mutations are scoped to the owner.
#[derive(Clone, Debug, From)]
pub struct Playlist {
    /// ID of this [`Playlist`].
    pub id: Id,

    /// ID of the [`User`] owning this [`Playlist`].
    pub owner: user::Id,

    /// [`Name`] of this [`Playlist`].
    pub name: Name,

    /// [`Description`] of this [`Playlist`], if any.
    pub description: Option<Description>,

    /// [`Song`]s of this [`Playlist`], in display order.
    ///
    /// Duplicate entries are allowed.
    pub songs: Vec<Song>,

    /// [`DateTime`] when this [`Playlist`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Playlist`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`Playlist`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        !name.trim().is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Description of a [`Playlist`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (text.len() <= 4096).then_some(Self(text))
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Single entry of a [`Playlist`].
///
/// Has no identity or lifecycle of its own, existing only embedded into its
/// [`Playlist`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Song {
    /// [`Title`] of this [`Song`].
    ///
    /// [`Title`]: song::Title
    pub title: song::Title,

    /// [`Artist`] of this [`Song`].
    ///
    /// [`Artist`]: song::Artist
    pub artist: song::Artist,
}

pub mod song {
    //! [`Song`]-related definitions.

    use std::str::FromStr;

    use derive_more::{AsRef, Display};

    #[cfg(doc)]
    use super::Song;

    /// Title of a [`Song`].
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str, String)]
    pub struct Title(String);

    impl Title {
        /// Creates a new [`Title`].
        ///
        /// # Safety
        ///
        /// The caller must ensure that the given `title` matches the format.
        #[expect(unsafe_code, reason = "bypass")]
        #[must_use]
        pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
            Self(title.into())
        }

        /// Creates a new [`Title`] if the given `title` is valid.
        #[must_use]
        pub fn new(title: impl Into<String>) -> Option<Self> {
            let title = title.into();
            (!title.trim().is_empty()).then_some(Self(title))
        }
    }

    impl FromStr for Title {
        type Err = &'static str;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::new(s).ok_or("invalid `Title`")
        }
    }

    /// Artist of a [`Song`].
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str, String)]
    pub struct Artist(String);

    impl Artist {
        /// Creates a new [`Artist`].
        ///
        /// # Safety
        ///
        /// The caller must ensure that the given `artist` matches the format.
        #[expect(unsafe_code, reason = "bypass")]
        #[must_use]
        pub unsafe fn new_unchecked(artist: impl Into<String>) -> Self {
            Self(artist.into())
        }

        /// Creates a new [`Artist`] if the given `artist` is valid.
        #[must_use]
        pub fn new(artist: impl Into<String>) -> Option<Self> {
            let artist = artist.into();
            (!artist.trim().is_empty()).then_some(Self(artist))
        }
    }

    impl FromStr for Artist {
        type Err = &'static str;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::new(s).ok_or("invalid `Artist`")
        }
    }
}

/// [`DateTime`] when a [`Playlist`] was created.
pub type CreationDateTime = DateTimeOf<(Playlist, unit::Creation)>;

#[cfg(test)]
mod name_spec {
    use super::Name;

    #[test]
    fn rejects_empty_and_blank() {
        assert!(Name::new("").is_none());
        assert!(Name::new("   ").is_none());
    }

    #[test]
    fn accepts_regular_name() {
        assert!(Name::new("Road Trip").is_some());
    }

    #[test]
    fn parses_from_string() {
        assert!("Road Trip".parse::<Name>().is_ok());
        assert!("".parse::<Name>().is_err());
    }
}

#[cfg(test)]
mod song_spec {
    use super::song::{Artist, Title};

    #[test]
    fn title_and_artist_must_be_non_empty() {
        assert!(Title::new("").is_none());
        assert!(Artist::new(" ").is_none());
        assert!(Title::new("Hello").is_some());
        assert!(Artist::new("Adele").is_some());
    }
}
