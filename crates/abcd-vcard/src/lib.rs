//! vCard 3.0 encoder for AddressBook records.
//!
//! Converts assembled [`abcd_core`] records into vCard text. Pure
//! synchronous; no database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use abcd_core::record::Record;
//!
//! let record = Record {
//!   first_name: "Alice".to_string(),
//!   last_name: "Smith".to_string(),
//!   ..Record::new(1)
//! };
//! print!("{}", abcd_vcard::encode(&record));
//! ```

pub mod error;
pub mod escape;
mod extract;
pub mod label;
pub mod photo;
mod serialize;

pub use error::{Error, Result};
pub use extract::{ExtractedPhoto, PhotoScan, extract_photos};
pub use serialize::encode;
