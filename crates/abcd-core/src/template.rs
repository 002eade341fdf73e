//! Filename templates for split output, e.g. `%{full_name}.vcf`.
//!
//! A template is parsed once, up front, so an unknown field name is reported
//! before any file is written.

use std::str::FromStr;

use strum::EnumString;

use crate::{Error, Result, record::Record};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// A record attribute usable inside `%{…}`.
///
/// Both the snake_case name and the compact legacy spelling are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum RecordField {
  #[strum(serialize = "id")]
  Id,
  #[strum(serialize = "first_name", serialize = "firstname")]
  FirstName,
  #[strum(serialize = "last_name", serialize = "lastname")]
  LastName,
  #[strum(serialize = "middle_name", serialize = "middlename")]
  MiddleName,
  #[strum(serialize = "name_prefix", serialize = "nameprefix")]
  NamePrefix,
  #[strum(serialize = "name_suffix", serialize = "namesuffix")]
  NameSuffix,
  #[strum(serialize = "full_name", serialize = "fullname")]
  FullName,
  #[strum(serialize = "nickname")]
  Nickname,
  #[strum(serialize = "maiden_name", serialize = "maidenname")]
  MaidenName,
  #[strum(serialize = "phonetic_first_name", serialize = "phonetic_firstname")]
  PhoneticFirstName,
  #[strum(serialize = "phonetic_middle_name", serialize = "phonetic_middlename")]
  PhoneticMiddleName,
  #[strum(serialize = "phonetic_last_name", serialize = "phonetic_lastname")]
  PhoneticLastName,
  #[strum(serialize = "phonetic_organization", serialize = "phonetic_org")]
  PhoneticOrganization,
  #[strum(serialize = "organization")]
  Organization,
  #[strum(serialize = "department")]
  Department,
  #[strum(serialize = "job_title", serialize = "jobtitle")]
  JobTitle,
  #[strum(serialize = "birthday", serialize = "bday")]
  Birthday,
  #[strum(serialize = "is_company", serialize = "iscompany")]
  IsCompany,
  #[strum(serialize = "email")]
  Email,
  #[strum(serialize = "phone")]
  Phone,
  #[strum(serialize = "address")]
  Address,
  #[strum(serialize = "social_profile", serialize = "socialprofile")]
  SocialProfile,
  #[strum(serialize = "note")]
  Note,
  #[strum(serialize = "url", serialize = "urls")]
  Url,
  #[strum(serialize = "service")]
  Service,
}

impl RecordField {
  /// Printable value of this field for `record`. List fields project their
  /// first element, or the empty string when the list is empty.
  pub fn value(self, record: &Record) -> String {
    fn first<T: ToString>(items: &[T]) -> String {
      items.first().map(ToString::to_string).unwrap_or_default()
    }

    match self {
      Self::Id => record.id.to_string(),
      Self::FirstName => record.first_name.clone(),
      Self::LastName => record.last_name.clone(),
      Self::MiddleName => record.middle_name.clone(),
      Self::NamePrefix => record.name_prefix.clone(),
      Self::NameSuffix => record.name_suffix.clone(),
      Self::FullName => record.full_name(),
      Self::Nickname => record.nickname.clone().unwrap_or_default(),
      Self::MaidenName => record.maiden_name.clone().unwrap_or_default(),
      Self::PhoneticFirstName => {
        record.phonetic_first_name.clone().unwrap_or_default()
      }
      Self::PhoneticMiddleName => {
        record.phonetic_middle_name.clone().unwrap_or_default()
      }
      Self::PhoneticLastName => {
        record.phonetic_last_name.clone().unwrap_or_default()
      }
      Self::PhoneticOrganization => {
        record.phonetic_organization.clone().unwrap_or_default()
      }
      Self::Organization => record.organization.clone(),
      Self::Department => record.department.clone(),
      Self::JobTitle => record.job_title.clone().unwrap_or_default(),
      Self::Birthday => record
        .birthday
        .map(|b| b.to_string())
        .unwrap_or_default(),
      Self::IsCompany => record.is_company.to_string(),
      Self::Email => first(&record.emails),
      Self::Phone => first(&record.phones),
      Self::Address => first(&record.addresses),
      Self::SocialProfile => first(&record.social_profiles),
      Self::Note => record.note.clone().unwrap_or_default(),
      Self::Url => first(&record.urls),
      Self::Service => first(&record.services),
    }
  }
}

// ─── Template ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  Literal(String),
  Field(RecordField),
}

/// A parsed output path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
  segments: Vec<Segment>,
}

impl FilenameTemplate {
  /// Parse `pattern`, validating every placeholder.
  pub fn parse(pattern: &str) -> Result<Self> {
    let mut segments = Vec::new();
    let mut rest = pattern;

    while let Some(start) = rest.find("%{") {
      if start > 0 {
        segments.push(Segment::Literal(rest[..start].to_owned()));
      }
      let after = &rest[start + 2..];
      let end = after
        .find('}')
        .ok_or_else(|| Error::UnterminatedPlaceholder(pattern.to_owned()))?;
      let name = &after[..end];
      let field = RecordField::from_str(name)
        .map_err(|_| Error::UnknownTemplateField(name.to_owned()))?;
      segments.push(Segment::Field(field));
      rest = &after[end + 1..];
    }
    if !rest.is_empty() {
      segments.push(Segment::Literal(rest.to_owned()));
    }

    Ok(Self { segments })
  }

  /// Substitute `record` into the template.
  ///
  /// `/` inside substituted values becomes `:` so a value can never add a
  /// path segment; literal text is left untouched.
  pub fn format(&self, record: &Record) -> String {
    let mut out = String::new();
    for segment in &self.segments {
      match segment {
        Segment::Literal(s) => out.push_str(s),
        Segment::Field(f) => out.push_str(&f.value(record).replace('/', ":")),
      }
    }
    out
  }
}

impl FromStr for FilenameTemplate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}
