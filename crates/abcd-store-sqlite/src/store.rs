//! [`AbcdDatabase`], the SQLite implementation of [`RecordSource`].

use std::{
  collections::{HashMap, HashSet},
  path::Path,
};

use abcd_core::{
  entry::{Address, Email, MessagingService, Note, Phone, SocialProfile, Url},
  label::Label,
  record::{Birthday, Record, non_empty},
  source::RecordSource,
};
use rusqlite::{Connection, OpenFlags, OptionalExtension as _, Row};

use crate::{
  Result,
  encode::{blob, core_data_date, integer, real, text},
  schema::*,
};

// ─── Database ────────────────────────────────────────────────────────────────

/// A read-only AddressBook database.
///
/// Queries adapt to the columns actually present: a missing column reads as
/// NULL and is reported once; a missing table reads as empty.
pub struct AbcdDatabase {
  conn:    Connection,
  columns: HashMap<&'static str, HashSet<String>>,
  warned:  HashSet<String>,
}

impl AbcdDatabase {
  /// Open the database at `path` without write access.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(Self::from_connection(conn))
  }

  /// Wrap an existing connection.
  pub fn from_connection(conn: Connection) -> Self {
    Self {
      conn,
      columns: HashMap::new(),
      warned: HashSet::new(),
    }
  }

  // ── Introspection ─────────────────────────────────────────────────────────

  fn table_columns(&mut self, table: &'static str) -> Result<&HashSet<String>> {
    if !self.columns.contains_key(table) {
      let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({table})"))?;
      let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<HashSet<String>>>()?;
      drop(stmt);
      self.columns.insert(table, names);
    }
    Ok(&self.columns[table])
  }

  fn warn_once(&mut self, key: String, message: &str) {
    if self.warned.insert(key.clone()) {
      tracing::warn!(missing = %key, "{message}");
    }
  }

  /// `true` if `table` exists; warns once if it does not.
  fn has_table(&mut self, table: &'static str) -> Result<bool> {
    let exists = !self.table_columns(table)?.is_empty();
    if !exists {
      self.warn_once(table.to_owned(), "missing table; no rows read");
    }
    Ok(exists)
  }

  fn has_column(&mut self, table: &'static str, column: &str) -> Result<bool> {
    Ok(self.table_columns(table)?.contains(column))
  }

  /// Select expression for `table.column`, or `NULL` when the column is
  /// missing.
  fn column(&mut self, table: &'static str, column: &str) -> Result<String> {
    if self.has_column(table, column)? {
      return Ok(format!("{table}.{column}"));
    }
    self.warn_once(
      format!("{table}.{column}"),
      "missing column; substituting empty values",
    );
    Ok("NULL".to_owned())
  }

  fn select_list(&mut self, table: &'static str, columns: &[&str]) -> Result<String> {
    let exprs = columns
      .iter()
      .map(|c| self.column(table, c))
      .collect::<Result<Vec<_>>>()?;
    Ok(exprs.join(", "))
  }

  /// The `Z_ENT` value of contact rows, looked up in `Z_PRIMARYKEY`.
  /// `None` when the registry, its columns, or the contact entry is missing.
  fn contact_entity(&mut self) -> Result<Option<i64>> {
    let registry = self.table_columns(PRIMARY_KEY)?;
    if !registry.contains(PRIMARY_KEY_ENTITY) || !registry.contains(PRIMARY_KEY_NAME) {
      return Ok(None);
    }
    if !self.has_column(RECORD, RECORD_ENTITY)? {
      return Ok(None);
    }
    let sql = format!(
      "SELECT {PRIMARY_KEY_ENTITY} FROM {PRIMARY_KEY} WHERE {PRIMARY_KEY_NAME} = ?1"
    );
    Ok(
      self
        .conn
        .query_row(&sql, [CONTACT_ENTITY_NAME], |row| row.get::<_, i64>(0))
        .optional()?,
    )
  }

  /// `WHERE` clause selecting contact rows from `ZABCDRECORD`.
  fn record_filter(&mut self) -> Result<String> {
    if let Some(entity) = self.contact_entity()? {
      return Ok(format!("WHERE {RECORD}.{RECORD_ENTITY} = {entity}"));
    }
    if self.has_column(RECORD, RECORD_CONTAINER)? {
      self.warn_once(
        format!("{PRIMARY_KEY}.{CONTACT_ENTITY_NAME}"),
        "contact entity id not found; selecting records by container",
      );
      return Ok(format!("WHERE {RECORD}.{RECORD_CONTAINER} IS NOT NULL"));
    }
    self.warn_once(
      format!("{RECORD}.{RECORD_CONTAINER}"),
      "neither contact entity nor container known; exporting every record",
    );
    Ok(String::new())
  }

  /// `ORDER BY` clause for a labelled sub-entity table.
  fn primary_first(&mut self, table: &'static str) -> Result<String> {
    let owner = self.column(table, OWNER)?;
    let primary = self.column(table, IS_PRIMARY)?;
    let index = self.column(table, ORDERING_INDEX)?;
    Ok(format!("ORDER BY {owner}, {primary} DESC, {index}"))
  }

  // ── Querying ──────────────────────────────────────────────────────────────

  /// Run `sql` and decode each row; rows decoded as `None` are dropped.
  fn query<T>(
    &self,
    table: &str,
    sql: &str,
    mut decode: impl FnMut(&Row<'_>) -> Result<Option<T>>,
  ) -> Result<Vec<T>> {
    let mut stmt = self.conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
      if let Some(item) = decode(row)? {
        out.push(item);
      }
    }
    tracing::debug!(table, rows = out.len(), "loaded");
    Ok(out)
  }

  /// Query a labelled sub-entity table in primary-first order.
  fn labelled<T>(
    &mut self,
    table: &'static str,
    columns: &[&str],
    decode: impl FnMut(&Row<'_>) -> Result<Option<T>>,
  ) -> Result<Vec<T>> {
    if !self.has_table(table)? {
      return Ok(Vec::new());
    }
    let select = self.select_list(table, columns)?;
    let order = self.primary_first(table)?;
    self.query(table, &format!("SELECT {select} FROM {table} {order}"), decode)
  }
}

// ─── Row decoding ────────────────────────────────────────────────────────────

/// The owner id in column 0. Rows without one cannot be attached anywhere.
fn owner(row: &Row<'_>, table: &str) -> Result<Option<i64>> {
  let owner = integer(row, 0)?;
  if owner.is_none() {
    tracing::warn!(table, "row without owner; skipping");
  }
  Ok(owner)
}

fn label(row: &Row<'_>, idx: usize) -> Result<Label> {
  Ok(Label::from_source(text(row, idx)?.as_deref()))
}

fn required(row: &Row<'_>, idx: usize) -> Result<String> {
  Ok(text(row, idx)?.unwrap_or_default())
}

fn optional(row: &Row<'_>, idx: usize) -> Result<Option<String>> {
  Ok(non_empty(text(row, idx)?))
}

fn decode_record(row: &Row<'_>) -> Result<Option<Record>> {
  let Some(id) = integer(row, 0)? else {
    tracing::warn!("record without primary key; skipping");
    return Ok(None);
  };

  let birthday = match real(row, 15)?.map(core_data_date) {
    Some(Ok(date)) => Some(Birthday(date)),
    Some(Err(e)) => {
      tracing::warn!(record = id, "ignoring birthday: {e}");
      None
    }
    None => None,
  };

  Ok(Some(Record {
    first_name: required(row, 1)?,
    last_name: required(row, 2)?,
    middle_name: required(row, 3)?,
    name_prefix: required(row, 4)?,
    name_suffix: required(row, 5)?,
    nickname: optional(row, 6)?,
    maiden_name: optional(row, 7)?,
    phonetic_first_name: optional(row, 8)?,
    phonetic_middle_name: optional(row, 9)?,
    phonetic_last_name: optional(row, 10)?,
    phonetic_organization: optional(row, 11)?,
    organization: required(row, 12)?,
    department: required(row, 13)?,
    job_title: optional(row, 14)?,
    birthday,
    photo: blob(row, 16)?,
    is_company: integer(row, 17)?.is_some_and(|flags| flags & 1 != 0),
    ..Record::new(id)
  }))
}

// ─── RecordSource impl ───────────────────────────────────────────────────────

impl RecordSource for AbcdDatabase {
  type Error = crate::Error;

  fn records(&mut self) -> Result<Vec<Record>> {
    if !self.has_table(RECORD)? {
      return Ok(Vec::new());
    }
    let select = self.select_list(RECORD, &RECORD_COLUMNS)?;
    let filter = self.record_filter()?;
    self.query(RECORD, &format!("SELECT {select} FROM {RECORD} {filter}"), decode_record)
  }

  fn emails(&mut self) -> Result<Vec<Email>> {
    self.labelled(EMAIL, &EMAIL_COLUMNS, |row| {
      let Some(owner) = owner(row, EMAIL)? else { return Ok(None) };
      Ok(Some(Email {
        owner,
        label: label(row, 1)?,
        address: required(row, 2)?,
      }))
    })
  }

  fn phones(&mut self) -> Result<Vec<Phone>> {
    self.labelled(PHONE, &PHONE_COLUMNS, |row| {
      let Some(owner) = owner(row, PHONE)? else { return Ok(None) };
      Ok(Some(Phone {
        owner,
        label: label(row, 1)?,
        number: required(row, 2)?,
      }))
    })
  }

  fn addresses(&mut self) -> Result<Vec<Address>> {
    self.labelled(ADDRESS, &ADDRESS_COLUMNS, |row| {
      let Some(owner) = owner(row, ADDRESS)? else { return Ok(None) };
      Ok(Some(Address {
        owner,
        label: label(row, 1)?,
        street: required(row, 2)?,
        city: required(row, 3)?,
        state: required(row, 4)?,
        zip: required(row, 5)?,
        country: required(row, 6)?,
      }))
    })
  }

  fn social_profiles(&mut self) -> Result<Vec<SocialProfile>> {
    if !self.has_table(SOCIAL)? {
      return Ok(Vec::new());
    }
    let select = self.select_list(SOCIAL, &SOCIAL_COLUMNS)?;
    self.query(SOCIAL, &format!("SELECT {select} FROM {SOCIAL}"), |row| {
      let Some(owner) = owner(row, SOCIAL)? else { return Ok(None) };
      Ok(Some(SocialProfile {
        owner,
        service: required(row, 1)?,
        username: required(row, 2)?,
      }))
    })
  }

  fn notes(&mut self) -> Result<Vec<Note>> {
    if !self.has_table(NOTE)? {
      return Ok(Vec::new());
    }
    let select = self.select_list(NOTE, &NOTE_COLUMNS)?;
    let text_col = self.column(NOTE, NOTE_COLUMNS[1])?;
    let sql = format!("SELECT {select} FROM {NOTE} WHERE {text_col} IS NOT NULL");
    self.query(NOTE, &sql, |row| {
      let Some(owner) = owner(row, NOTE)? else { return Ok(None) };
      Ok(Some(Note {
        owner,
        text: required(row, 1)?,
      }))
    })
  }

  fn urls(&mut self) -> Result<Vec<Url>> {
    self.labelled(URL, &URL_COLUMNS, |row| {
      let Some(owner) = owner(row, URL)? else { return Ok(None) };
      Ok(Some(Url {
        owner,
        label: label(row, 1)?,
        url: required(row, 2)?,
      }))
    })
  }

  fn services(&mut self) -> Result<Vec<MessagingService>> {
    if !self.has_table(MESSAGING)? || !self.has_table(SERVICE)? {
      return Ok(Vec::new());
    }
    if !self.has_column(MESSAGING, MESSAGING_SERVICE_FK)?
      || !self.has_column(SERVICE, "Z_PK")?
    {
      self.warn_once(
        format!("{MESSAGING}.{MESSAGING_SERVICE_FK}"),
        "cannot join messaging addresses to services; no rows read",
      );
      return Ok(Vec::new());
    }

    let select = self.select_list(MESSAGING, &MESSAGING_COLUMNS)?;
    let name = self.column(SERVICE, SERVICE_NAME)?;
    let order = self.primary_first(MESSAGING)?;
    let sql = format!(
      "SELECT {select}, {name} FROM {MESSAGING} \
       INNER JOIN {SERVICE} ON {MESSAGING}.{MESSAGING_SERVICE_FK} = {SERVICE}.Z_PK \
       {order}"
    );
    self.query(MESSAGING, &sql, |row| {
      let Some(owner) = owner(row, MESSAGING)? else { return Ok(None) };
      Ok(Some(MessagingService::new(
        owner,
        &required(row, 3)?,
        label(row, 1)?,
        required(row, 2)?,
      )))
    })
  }
}
