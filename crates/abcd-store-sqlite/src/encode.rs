//! Decoding helpers between SQLite column values and domain types.
//!
//! AddressBook columns are loosely typed, so text helpers accept any storage
//! class rather than failing on an unexpected one.

use chrono::{DateTime, NaiveDate};
use rusqlite::{Row, types::ValueRef};

use crate::{Error, Result};

// ─── Column values ────────────────────────────────────────────────────────────

pub fn text(row: &Row<'_>, idx: usize) -> Result<Option<String>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Null => None,
    ValueRef::Text(b) | ValueRef::Blob(b) => {
      Some(String::from_utf8_lossy(b).into_owned())
    }
    ValueRef::Integer(i) => Some(i.to_string()),
    ValueRef::Real(f) => Some(f.to_string()),
  })
}

pub fn integer(row: &Row<'_>, idx: usize) -> Result<Option<i64>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Integer(i) => Some(i),
    ValueRef::Real(f) => Some(f as i64),
    ValueRef::Text(b) => std::str::from_utf8(b).ok().and_then(|s| s.trim().parse().ok()),
    ValueRef::Null | ValueRef::Blob(_) => None,
  })
}

pub fn real(row: &Row<'_>, idx: usize) -> Result<Option<f64>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Real(f) => Some(f),
    ValueRef::Integer(i) => Some(i as f64),
    ValueRef::Text(b) => std::str::from_utf8(b).ok().and_then(|s| s.trim().parse().ok()),
    ValueRef::Null | ValueRef::Blob(_) => None,
  })
}

pub fn blob(row: &Row<'_>, idx: usize) -> Result<Option<Vec<u8>>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Blob(b) | ValueRef::Text(b) => Some(b.to_vec()),
    _ => None,
  })
}

// ─── Core Data timestamps ─────────────────────────────────────────────────────

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z.
const CORE_DATA_EPOCH: i64 = 978_307_200;

/// Convert a Core Data timestamp to its UTC calendar date.
pub fn core_data_date(secs: f64) -> Result<NaiveDate> {
  if !secs.is_finite() {
    return Err(Error::InvalidTimestamp(secs));
  }
  let unix = (secs.floor() as i64).saturating_add(CORE_DATA_EPOCH);
  DateTime::from_timestamp(unix, 0)
    .map(|dt| dt.date_naive())
    .ok_or(Error::InvalidTimestamp(secs))
}
