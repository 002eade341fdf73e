//! Error types for the abcd-vcard encoder.
//!
//! Every variant is recoverable for the record being encoded: the encoder
//! logs it and leaves the offending field out.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported image format (leading bytes {head:02x?})")]
  UnsupportedImageFormat { head: Vec<u8> },

  #[error("unknown messaging service: {0}")]
  UnknownService(String),

  #[error("invalid base64 photo data: {0}")]
  InvalidPhotoData(#[from] base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
