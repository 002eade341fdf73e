//! Error types for the export runner.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{}: output parent directory does not exist", .0.display())]
  MissingParent(PathBuf),

  #[error("{}: not a directory", .0.display())]
  NotADirectory(PathBuf),

  #[error("{}: already exists; use --force to overwrite", .0.display())]
  Exists(PathBuf),

  #[error("{}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid split template: {0}")]
  Template(#[from] abcd_core::Error),
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
