//! One person or organisation from the address book, together with
//! every sub-entity attached to it.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::entry::{Address, Email, MessagingService, Phone, SocialProfile, Url};

// ─── Birthday ────────────────────────────────────────────────────────────────

/// A birthday as stored by the source.
///
/// AddressBook has no "year unknown" column; it stores such dates in the
/// year [`Birthday::OMITTED_YEAR`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday(pub NaiveDate);

impl Birthday {
  pub const OMITTED_YEAR: i32 = 1604;

  pub fn year_omitted(&self) -> bool { self.0.year() == Self::OMITTED_YEAR }
}

impl fmt::Display for Birthday {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format("%Y-%m-%d"))
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A person or organisation.
///
/// Required text fields are empty strings when the source has no value;
/// optional single-line fields are `None` (never `Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
  pub id:                    i64,
  /// Synthesised by the assembler because sub-entity rows referenced an id
  /// with no record row. Only `id` is meaningful.
  pub placeholder:           bool,

  pub first_name:            String,
  pub last_name:             String,
  pub middle_name:           String,
  pub name_prefix:           String,
  pub name_suffix:           String,
  pub nickname:              Option<String>,
  pub maiden_name:           Option<String>,
  pub phonetic_first_name:   Option<String>,
  pub phonetic_middle_name:  Option<String>,
  pub phonetic_last_name:    Option<String>,

  pub organization:          String,
  pub department:            String,
  pub phonetic_organization: Option<String>,
  pub job_title:             Option<String>,

  pub birthday:              Option<Birthday>,
  /// Raw `ZTHUMBNAILIMAGEDATA`, including the source's leading marker byte.
  pub photo:                 Option<Vec<u8>>,
  /// The record describes an organisation, not a person.
  pub is_company:            bool,

  pub emails:                Vec<Email>,
  pub phones:                Vec<Phone>,
  pub addresses:             Vec<Address>,
  pub social_profiles:       Vec<SocialProfile>,
  pub note:                  Option<String>,
  pub urls:                  Vec<Url>,
  pub services:              Vec<MessagingService>,
}

impl Record {
  pub fn new(id: i64) -> Self { Self { id, ..Self::default() } }

  /// An empty stand-in for a parent id that has no record row.
  pub fn placeholder(id: i64) -> Self {
    Self {
      id,
      placeholder: true,
      ..Self::default()
    }
  }

  /// Display name: the organisation for companies, otherwise the non-empty
  /// name parts in prefix / first / middle / last / suffix order.
  pub fn full_name(&self) -> String {
    if self.is_company {
      return self.organization.clone();
    }
    [
      &self.name_prefix,
      &self.first_name,
      &self.middle_name,
      &self.last_name,
      &self.name_suffix,
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .map(String::as_str)
    .collect::<Vec<_>>()
    .join(" ")
  }
}

/// Map an empty source string to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.is_empty())
}
