//! Error type for `abcd-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("invalid Core Data timestamp: {0}")]
  InvalidTimestamp(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
