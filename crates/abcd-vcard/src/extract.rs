//! Photo scanner: pulls embedded `PHOTO` data back out of a `.vcf` document.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{error::Result, escape::unescape};

/// A decoded photo and the display name of the card it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPhoto {
  /// Unescaped `FN` value; empty when the card has none.
  pub name: String,
  pub data: Vec<u8>,
  /// 1-based position of the card in the document.
  pub card: usize,
}

impl ExtractedPhoto {
  /// `<name>.jpg`, with `/` replaced so the name stays one path segment.
  /// Unnamed cards fall back to their position.
  pub fn file_name(&self) -> String {
    if self.name.is_empty() {
      format!("unnamed-{}.jpg", self.card)
    } else {
      format!("{}.jpg", self.name.replace('/', "-"))
    }
  }
}

/// Result of scanning one document.
#[derive(Debug, Default)]
pub struct PhotoScan {
  /// Number of `BEGIN:VCARD` blocks seen.
  pub cards:  usize,
  pub photos: Vec<ExtractedPhoto>,
}

/// Join CRLF+SP (or LF+SP / LF+HT) continuation lines.
/// Tolerates bare LF line endings.
fn unfold_lines(s: &str) -> Vec<String> {
  let mut lines: Vec<String> = Vec::new();
  for raw in s.split('\n') {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    if let Some(rest) = line.strip_prefix([' ', '\t']) {
      if let Some(last) = lines.last_mut() {
        last.push_str(rest);
      }
    } else {
      lines.push(line.to_string());
    }
  }
  lines.retain(|l| !l.is_empty());
  lines
}

fn decode(value: &str) -> Result<Vec<u8>> { Ok(STANDARD.decode(value.trim())?) }

/// Scan `input` for cards with an inline photo.
///
/// Photo data that is not valid base64 is logged and skipped.
pub fn extract_photos(input: &str) -> PhotoScan {
  let mut scan = PhotoScan::default();
  let mut name = String::new();
  let mut photo: Option<String> = None;

  for line in unfold_lines(input) {
    if line.eq_ignore_ascii_case("BEGIN:VCARD") {
      scan.cards += 1;
      name.clear();
      photo = None;
    } else if let Some(value) = line.strip_prefix("FN:") {
      name = unescape(value);
    } else if line.starts_with("PHOTO;") || line.starts_with("PHOTO:") {
      photo = line.split_once(':').map(|(_, v)| v.to_owned());
    } else if line.eq_ignore_ascii_case("END:VCARD")
      && let Some(data) = photo.take()
    {
      match decode(&data) {
        Ok(data) => scan.photos.push(ExtractedPhoto {
          name: name.clone(),
          data,
          card: scan.cards,
        }),
        Err(e) => tracing::warn!(card = scan.cards, name = %name, "skipping photo: {e}"),
      }
    }
  }

  scan
}
