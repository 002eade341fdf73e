//! Attaches sub-entity rows to their parent records.

use std::collections::HashMap;

use crate::{entry::Entry, record::Record, source::RecordSource};

/// Builds fully populated records from a record set plus sub-entity rows.
///
/// Records keep the order the source produced them in. Placeholders for
/// unknown owners are appended in the order their first row was seen.
#[derive(Debug, Default)]
pub struct Assembler {
  records: Vec<Record>,
  index:   HashMap<i64, usize>,
}

impl Assembler {
  pub fn new(records: impl IntoIterator<Item = Record>) -> Self {
    let mut assembler = Self::default();
    for record in records {
      if assembler.index.contains_key(&record.id) {
        tracing::warn!(id = record.id, "duplicate record id; keeping the first");
        continue;
      }
      assembler.index.insert(record.id, assembler.records.len());
      assembler.records.push(record);
    }
    assembler
  }

  /// Attach `entry` to its owner, synthesising a placeholder owner if none
  /// exists. Entries are appended, so per-owner source order is preserved.
  pub fn attach(&mut self, entry: Entry) {
    let owner = entry.owner();
    let record = self.record_mut(owner, entry.kind());
    match entry {
      Entry::Email(e) => record.emails.push(e),
      Entry::Phone(p) => record.phones.push(p),
      Entry::Address(a) => record.addresses.push(a),
      Entry::SocialProfile(s) => record.social_profiles.push(s),
      // The last note wins.
      Entry::Note(n) => record.note = Some(n.text),
      Entry::Url(u) => record.urls.push(u),
      Entry::Service(s) => record.services.push(s),
    }
  }

  pub fn finish(self) -> Vec<Record> { self.records }

  fn record_mut(&mut self, owner: i64, kind: &str) -> &mut Record {
    let idx = match self.index.get(&owner) {
      Some(&idx) => idx,
      None => {
        tracing::warn!(
          owner,
          kind,
          "unreferenced data field; synthesising placeholder record"
        );
        let idx = self.records.len();
        self.records.push(Record::placeholder(owner));
        self.index.insert(owner, idx);
        idx
      }
    };
    &mut self.records[idx]
  }
}

/// Assemble `records` with every row in `entries`.
pub fn assemble(
  records: impl IntoIterator<Item = Record>,
  entries: impl IntoIterator<Item = Entry>,
) -> Vec<Record> {
  let mut assembler = Assembler::new(records);
  for entry in entries {
    assembler.attach(entry);
  }
  assembler.finish()
}

/// Query everything from `source` and assemble it.
///
/// Each kind is queried once and then distributed.
pub fn load<S: RecordSource>(source: &mut S) -> Result<Vec<Record>, S::Error> {
  let mut assembler = Assembler::new(source.records()?);

  source.emails()?.into_iter().map(Entry::Email).for_each(|e| assembler.attach(e));
  source.phones()?.into_iter().map(Entry::Phone).for_each(|e| assembler.attach(e));
  source
    .addresses()?
    .into_iter()
    .map(Entry::Address)
    .for_each(|e| assembler.attach(e));
  source
    .social_profiles()?
    .into_iter()
    .map(Entry::SocialProfile)
    .for_each(|e| assembler.attach(e));
  source.notes()?.into_iter().map(Entry::Note).for_each(|e| assembler.attach(e));
  source.urls()?.into_iter().map(Entry::Url).for_each(|e| assembler.attach(e));
  source
    .services()?
    .into_iter()
    .map(Entry::Service)
    .for_each(|e| assembler.attach(e));

  Ok(assembler.finish())
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use super::*;
  use crate::{
    entry::{Address, Email, MessagingService, Note, Phone, SocialProfile, Url},
    label::Label,
  };

  fn email(owner: i64, address: &str) -> Entry {
    Entry::Email(Email {
      owner,
      label: Label::Home,
      address: address.to_string(),
    })
  }

  fn note(owner: i64, text: &str) -> Entry {
    Entry::Note(Note { owner, text: text.to_string() })
  }

  #[test]
  fn entries_are_distributed_in_order() {
    let out = assemble(
      [Record::new(1), Record::new(2)],
      [email(2, "a@x"), email(1, "b@x"), email(2, "c@x")],
    );
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].emails.len(), 1);
    let second: Vec<_> = out[1].emails.iter().map(|e| e.address.as_str()).collect();
    assert_eq!(second, ["a@x", "c@x"]);
  }

  #[test]
  fn orphan_rows_get_a_placeholder() {
    let out = assemble([Record::new(1)], [email(5, "o@x"), email(5, "p@x")]);
    assert_eq!(out.len(), 2);
    let placeholder = &out[1];
    assert_eq!(placeholder.id, 5);
    assert!(placeholder.placeholder);
    assert_eq!(placeholder.emails.len(), 2);
    assert!(!out[0].placeholder);
  }

  #[test]
  fn last_note_wins() {
    let out = assemble([Record::new(1)], [note(1, "first"), note(1, "second")]);
    assert_eq!(out[0].note.as_deref(), Some("second"));
  }

  #[test]
  fn duplicate_record_ids_keep_first() {
    let first = Record { first_name: "A".into(), ..Record::new(1) };
    let dup = Record { first_name: "B".into(), ..Record::new(1) };
    let out = assemble([first, dup], Vec::<Entry>::new());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].first_name, "A");
  }

  #[derive(Default)]
  struct FakeSource {
    records:  Vec<Record>,
    phones:   Vec<Phone>,
    services: Vec<MessagingService>,
    notes:    Vec<Note>,
  }

  impl RecordSource for FakeSource {
    type Error = Infallible;

    fn records(&mut self) -> Result<Vec<Record>, Infallible> {
      Ok(std::mem::take(&mut self.records))
    }

    fn emails(&mut self) -> Result<Vec<Email>, Infallible> { Ok(vec![]) }

    fn phones(&mut self) -> Result<Vec<Phone>, Infallible> {
      Ok(std::mem::take(&mut self.phones))
    }

    fn addresses(&mut self) -> Result<Vec<Address>, Infallible> { Ok(vec![]) }

    fn social_profiles(&mut self) -> Result<Vec<SocialProfile>, Infallible> {
      Ok(vec![])
    }

    fn notes(&mut self) -> Result<Vec<Note>, Infallible> {
      Ok(std::mem::take(&mut self.notes))
    }

    fn urls(&mut self) -> Result<Vec<Url>, Infallible> { Ok(vec![]) }

    fn services(&mut self) -> Result<Vec<MessagingService>, Infallible> {
      Ok(std::mem::take(&mut self.services))
    }
  }

  #[test]
  fn load_pulls_every_kind_from_source() {
    let mut source = FakeSource {
      records: vec![Record::new(3)],
      phones: vec![Phone { owner: 3, label: Label::default(), number: "555".into() }],
      services: vec![MessagingService::new(3, "YahooInstant", Label::default(), "y".into())],
      notes: vec![Note { owner: 4, text: "orphan".into() }],
    };
    let out = load(&mut source).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].phones[0].number, "555");
    assert_eq!(out[0].services[0].service, "Yahoo");
    assert_eq!(out[1].id, 4);
    assert_eq!(out[1].note.as_deref(), Some("orphan"));
  }
}
