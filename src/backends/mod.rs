//! Database backend implementations
//!
//! This module contains the native driver handles that the executor and
//! connection types run on top of.

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConnection, SqliteHandle, SqliteStatement};
