//! vCard 3.0 card encoder.
//!
//! Produces CRLF line endings. Only `PHOTO` values are folded; every other
//! property is a single physical line.

use abcd_core::{
  entry::{Address, Email, MessagingService, Phone, SocialProfile, Url},
  record::{Birthday, Record},
};

use crate::{
  error::{Error, Result},
  escape::escape,
  label::{Fragment, LabelScheme, resolve, resolve_with},
  photo::encode_photo,
};

// ─── Messaging services ──────────────────────────────────────────────────────

/// Services that older importers only read from an `X-<SERVICE>` property.
/// They are written that way first and then again as `IMPP`.
const LEGACY_SERVICES: [&str; 4] = ["Jabber", "MSN", "Yahoo", "ICQ"];

/// URI scheme used in the `IMPP` value for `service`.
fn impp_scheme(service: &str) -> Result<&'static str> {
  let scheme = match service {
    "Jabber" | "GoogleTalk" | "Facebook" => "xmpp",
    "GaduGadu" | "QQ"                    => "x-apple",
    "ICQ"                                => "aim",
    "MSN"                                => "msnim",
    "Skype"                              => "skype",
    "Yahoo"                              => "ymsgr",
    other => return Err(Error::UnknownService(other.to_owned())),
  };
  Ok(scheme)
}

// ─── Card under construction ─────────────────────────────────────────────────

/// Output buffer for one record.
///
/// Owns the `itemN.` counter, so numbering restarts at 1 for every card.
struct Card {
  out:       String,
  next_item: u32,
}

impl Card {
  fn new() -> Self {
    Self {
      out:       String::new(),
      next_item: 1,
    }
  }

  fn line(&mut self, line: &str) {
    self.out.push_str(line);
    self.out.push_str("\r\n");
  }

  /// Emit `key:value` when `value` is present and non-empty.
  fn optional(&mut self, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
      self.line(&format!("{key}:{}", escape(value)));
    }
  }

  fn fragment(&mut self, fragment: Fragment) {
    match fragment {
      Fragment::Plain(line) => self.line(&line),
      Fragment::Grouped { field, label } => {
        let n = self.next_item;
        self.next_item += 1;
        self.line(&format!("item{n}.{field}"));
        self.line(&format!("item{n}.X-ABLabel:{label}"));
      }
    }
  }

  /// Render a sub-entity list. The first entry that renders is preferred;
  /// entries that fail are logged and skipped.
  fn list<P: Property>(&mut self, record: &Record, items: &[P]) {
    let mut first = true;
    for item in items {
      match item.render(first) {
        Ok(fragment) => {
          self.fragment(fragment);
          first = false;
        }
        Err(e) => {
          tracing::warn!(
            record = record.id,
            name = %record.full_name(),
            "skipping {}: {e}",
            P::KIND
          );
        }
      }
    }
  }
}

// ─── Per-kind rendering ──────────────────────────────────────────────────────

/// A sub-entity that renders as one property.
trait Property {
  const KIND: &'static str;

  fn render(&self, is_first: bool) -> Result<Fragment>;
}

impl Property for Email {
  const KIND: &'static str = "email";

  fn render(&self, is_first: bool) -> Result<Fragment> {
    Ok(resolve(
      "EMAIL;type=INTERNET",
      &self.label,
      is_first,
      &escape(&self.address),
      false,
    ))
  }
}

impl Property for Phone {
  const KIND: &'static str = "phone";

  fn render(&self, is_first: bool) -> Result<Fragment> {
    Ok(resolve_with(
      "TEL",
      &self.label,
      is_first,
      &escape(&self.number),
      LabelScheme::Phone,
    ))
  }
}

impl Property for Address {
  const KIND: &'static str = "address";

  fn render(&self, is_first: bool) -> Result<Fragment> {
    // Post-office box and extended address are never populated.
    let value = [&self.street, &self.city, &self.state, &self.zip, &self.country]
      .map(|part| escape(part))
      .join(";");
    Ok(resolve(
      "ADR",
      &self.label,
      is_first,
      &format!(";;{value}"),
      true,
    ))
  }
}

impl Property for SocialProfile {
  const KIND: &'static str = "social profile";

  /// Social profiles are unlabelled and never preferred.
  fn render(&self, _is_first: bool) -> Result<Fragment> {
    Ok(Fragment::Plain(format!(
      "X-SOCIALPROFILE;type={}:{}",
      param_value(&self.service).to_lowercase(),
      escape(&self.username)
    )))
  }
}

impl Property for Url {
  const KIND: &'static str = "url";

  fn render(&self, is_first: bool) -> Result<Fragment> {
    Ok(resolve("URL", &self.label, is_first, &escape(&self.url), false))
  }
}

impl Property for MessagingService {
  const KIND: &'static str = "messaging service";

  fn render(&self, is_first: bool) -> Result<Fragment> {
    let scheme = impp_scheme(&self.service)?;
    Ok(resolve(
      &format!("IMPP;X-SERVICE-TYPE={}", self.service),
      &self.label,
      is_first,
      &format!("{scheme}:{}", escape(&self.username)),
      false,
    ))
  }
}

/// The `X-<SERVICE>` form of a legacy messaging entry.
fn legacy_service(service: &MessagingService) -> Fragment {
  resolve(
    &format!("X-{}", service.service.to_uppercase()),
    &service.label,
    true,
    &escape(&service.username),
    false,
  )
}

/// Drop the characters that would end a parameter value early.
fn param_value(raw: &str) -> String {
  raw.chars().filter(|c| !matches!(c, ';' | ':' | ',')).collect()
}

fn birthday_line(birthday: Birthday) -> String {
  if birthday.year_omitted() {
    format!("BDAY;X-APPLE-OMIT-YEAR={}:{birthday}", Birthday::OMITTED_YEAR)
  } else {
    format!("BDAY:{birthday}")
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Encode `record` as one vCard 3.0 card.
///
/// Never fails as a whole: an unsupported photo or an unknown messaging
/// service is logged and left out, and the rest of the card is written.
pub fn encode(record: &Record) -> String {
  let mut card = Card::new();
  let full_name = record.full_name();

  card.line("BEGIN:VCARD");
  card.line("VERSION:3.0");
  card.line(&format!(
    "N:{};{};{};{};{}",
    escape(&record.last_name),
    escape(&record.first_name),
    escape(&record.middle_name),
    escape(&record.name_prefix),
    escape(&record.name_suffix),
  ));
  card.line(&format!("FN:{}", escape(&full_name)));
  card.optional("NICKNAME", record.nickname.as_deref());
  card.optional("X-MAIDENNAME", record.maiden_name.as_deref());
  card.optional("X-PHONETIC-FIRST-NAME", record.phonetic_first_name.as_deref());
  card.optional("X-PHONETIC-MIDDLE-NAME", record.phonetic_middle_name.as_deref());
  card.optional("X-PHONETIC-LAST-NAME", record.phonetic_last_name.as_deref());

  if !record.organization.is_empty() || !record.department.is_empty() {
    card.line(&format!(
      "ORG:{};{}",
      escape(&record.organization),
      escape(&record.department)
    ));
  }

  card.optional("X-PHONETIC-ORG", record.phonetic_organization.as_deref());
  card.optional("TITLE", record.job_title.as_deref());
  card.list(record, &record.emails);
  card.list(record, &record.phones);
  card.list(record, &record.addresses);
  card.list(record, &record.social_profiles);
  card.optional("NOTE", record.note.as_deref());
  card.list(record, &record.urls);

  if let Some(birthday) = record.birthday {
    card.line(&birthday_line(birthday));
  }

  for kind in LEGACY_SERVICES {
    if let Some(service) = record.services.iter().find(|s| s.service == kind) {
      card.fragment(legacy_service(service));
    }
  }
  card.list(record, &record.services);

  if let Some(photo) = record.photo.as_deref().filter(|p| !p.is_empty()) {
    match encode_photo(photo) {
      Ok(lines) => lines.iter().for_each(|l| card.line(l)),
      Err(e) => {
        tracing::warn!(
          record = record.id,
          name = %full_name,
          "could not embed photo, skipping: {e}"
        );
      }
    }
  }

  if record.is_company {
    card.line("X-ABShowAs:COMPANY");
  }
  card.line("END:VCARD");
  card.out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
