//! Sub-entity types: the repeated rows attached to a [`Record`].
//!
//! Every sub-entity carries the `owner` id of its parent record. Payload
//! fields hold the raw source text; escaping for output happens in the
//! encoder, not here.
//!
//! [`Record`]: crate::record::Record

use std::fmt;

use crate::label::Label;

// ─── Contact methods ─────────────────────────────────────────────────────────

/// An email address (`ZABCDEMAILADDRESS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
  pub owner:   i64,
  pub label:   Label,
  pub address: String,
}

/// A telephone number (`ZABCDPHONENUMBER`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
  pub owner:  i64,
  pub label:  Label,
  pub number: String,
}

/// A postal address (`ZABCDPOSTALADDRESS`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
  pub owner:   i64,
  pub label:   Label,
  pub street:  String,
  pub city:    String,
  pub state:   String,
  pub zip:     String,
  pub country: String,
}

impl Address {
  /// The non-empty components in street → country order.
  pub fn components(&self) -> impl Iterator<Item = &str> {
    [&self.street, &self.city, &self.state, &self.zip, &self.country]
      .into_iter()
      .map(String::as_str)
      .filter(|s| !s.is_empty())
  }
}

/// A social-network profile (`ZABCDSOCIALPROFILE`). Unlabelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialProfile {
  pub owner:    i64,
  pub service:  String,
  pub username: String,
}

/// Free-text note (`ZABCDNOTE`). At most one per record survives assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
  pub owner: i64,
  pub text:  String,
}

/// A web link (`ZABCDURLADDRESS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
  pub owner: i64,
  pub label: Label,
  pub url:   String,
}

/// An instant-messaging handle (`ZABCDMESSAGINGADDRESS` ⨝ `ZABCDSERVICE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingService {
  pub owner:    i64,
  /// Normalised service name, e.g. "Yahoo" for the source's "YahooInstant".
  pub service:  String,
  pub label:    Label,
  pub username: String,
}

impl MessagingService {
  pub fn new(
    owner: i64,
    service: &str,
    label: Label,
    username: String,
  ) -> Self {
    Self {
      owner,
      service: normalize_service_name(service).to_owned(),
      label,
      username,
    }
  }
}

/// Strip the trailing `Instant` some source service names carry.
pub fn normalize_service_name(raw: &str) -> &str {
  raw.strip_suffix("Instant").unwrap_or(raw)
}

// ─── Printable projections ───────────────────────────────────────────────────

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.address)
  }
}

impl fmt::Display for Phone {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.number)
  }
}

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<&str> = self.components().collect();
    f.write_str(&parts.join(", "))
  }
}

/// `service:username`.
impl fmt::Display for SocialProfile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.service, self.username)
  }
}

impl fmt::Display for Url {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.url)
  }
}

/// `service, label, username`, with the label as stored in the source.
impl fmt::Display for MessagingService {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}, {}, {}",
      self.service,
      self.label.as_source_str(),
      self.username
    )
  }
}

// ─── Entry ───────────────────────────────────────────────────────────────────

/// Any sub-entity row, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
  Email(Email),
  Phone(Phone),
  Address(Address),
  SocialProfile(SocialProfile),
  Note(Note),
  Url(Url),
  Service(MessagingService),
}

impl Entry {
  /// Id of the record this row belongs to.
  pub fn owner(&self) -> i64 {
    match self {
      Self::Email(e) => e.owner,
      Self::Phone(p) => p.owner,
      Self::Address(a) => a.owner,
      Self::SocialProfile(s) => s.owner,
      Self::Note(n) => n.owner,
      Self::Url(u) => u.owner,
      Self::Service(s) => s.owner,
    }
  }

  /// Short kind name for log messages.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Email(_) => "email",
      Self::Phone(_) => "phone",
      Self::Address(_) => "address",
      Self::SocialProfile(_) => "social profile",
      Self::Note(_) => "note",
      Self::Url(_) => "url",
      Self::Service(_) => "messaging service",
    }
  }
}
