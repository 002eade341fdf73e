//! Entity model and assembly for AddressBook exports.
//!
//! This crate has no database or output-format dependencies. The SQLite
//! reader implements [`source::RecordSource`]; the vCard encoder consumes the
//! assembled [`record::Record`]s.

pub mod assemble;
pub mod entry;
pub mod error;
pub mod label;
pub mod record;
pub mod source;
pub mod template;

pub use error::{Error, Result};
