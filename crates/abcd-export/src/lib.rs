//! Batch export for AddressBook databases.
//!
//! Ties the record source, the assembler and the vCard encoder together:
//! [`Exporter`] writes assembled records to a single `.vcf` file or to one
//! file per record, isolating failures at the record boundary.
//! [`images`] does the reverse trip for embedded photos.

pub mod error;
pub mod export;
pub mod images;
pub mod settings;

pub use error::{Error, Result};
pub use export::{Exporter, Output, Summary};
pub use settings::ExportConfig;
