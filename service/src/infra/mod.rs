//! Infrastructure layer.

pub mod catalog;
pub mod database;

pub use self::{catalog::Catalog, database::Database};
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
