//! The [`RecordSource`] trait, the seam between a concrete address-book
//! backend and the assembler.

use crate::{
  entry::{Address, Email, MessagingService, Note, Phone, SocialProfile, Url},
  record::Record,
};

/// A backend that yields raw records and sub-entity rows.
///
/// Labelled sub-entity lists must come back grouped by owner, with the
/// source's primary entry first and the rest in the source's ordering. The
/// assembler relies on that order to decide which entry is preferred.
pub trait RecordSource {
  type Error;

  /// Every record row, without sub-entities attached.
  fn records(&mut self) -> Result<Vec<Record>, Self::Error>;

  fn emails(&mut self) -> Result<Vec<Email>, Self::Error>;

  fn phones(&mut self) -> Result<Vec<Phone>, Self::Error>;

  fn addresses(&mut self) -> Result<Vec<Address>, Self::Error>;

  fn social_profiles(&mut self) -> Result<Vec<SocialProfile>, Self::Error>;

  fn notes(&mut self) -> Result<Vec<Note>, Self::Error>;

  fn urls(&mut self) -> Result<Vec<Url>, Self::Error>;

  fn services(&mut self) -> Result<Vec<MessagingService>, Self::Error>;
}
