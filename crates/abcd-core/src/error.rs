//! Error types for `abcd-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown filename template field: %{{{0}}}")]
  UnknownTemplateField(String),

  #[error("unterminated placeholder in filename template: {0:?}")]
  UnterminatedPlaceholder(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
