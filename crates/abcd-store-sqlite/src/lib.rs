//! SQLite reader for AddressBook `.abcddb` databases.
//!
//! Implements [`abcd_core::source::RecordSource`] over a read-only
//! [`rusqlite`] connection. Access is synchronous; the export is a single
//! sequential pass.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::AbcdDatabase;
