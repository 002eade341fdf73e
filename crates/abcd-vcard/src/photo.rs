//! Inline `PHOTO` encoding and line folding.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::{Error, Result};

/// Characters per continuation line, excluding the leading space.
pub const FOLD_WIDTH: usize = 74;

/// Leading bytes included in [`Error::UnsupportedImageFormat`].
const HEAD_LEN: usize = 20;

/// Encode a source thumbnail as folded `PHOTO` lines (without CRLF).
///
/// The source prepends one marker byte to every image; it is dropped before
/// the format check. Only JFIF (JPEG) data is supported.
pub fn encode_photo(raw: &[u8]) -> Result<Vec<String>> {
  let image = raw.get(1..).unwrap_or_default();
  if image.get(6..10) != Some(b"JFIF".as_slice()) {
    return Err(Error::UnsupportedImageFormat {
      head: raw[..raw.len().min(HEAD_LEN)].to_vec(),
    });
  }
  let value = format!("PHOTO;ENCODING=b;TYPE=JPEG:{}", STANDARD.encode(image));
  Ok(fold(&value))
}

/// Fold `value` into physical lines.
///
/// The first character stands alone on the first line; the rest follows in
/// continuation lines of one space plus up to [`FOLD_WIDTH`] characters, so
/// every continuation line starts at the same column.
pub fn fold(value: &str) -> Vec<String> {
  let mut chars = value.chars();
  let Some(head) = chars.next() else {
    return Vec::new();
  };
  let rest: Vec<char> = chars.collect();

  let mut lines = Vec::with_capacity(1 + rest.len().div_ceil(FOLD_WIDTH));
  lines.push(head.to_string());
  for chunk in rest.chunks(FOLD_WIDTH) {
    let mut line = String::with_capacity(chunk.len() + 1);
    line.push(' ');
    line.extend(chunk);
    lines.push(line);
  }
  lines
}

#[cfg(test)]
pub(crate) mod tests {
  use proptest::prelude::*;

  use super::*;

  /// A minimal JFIF header behind the source's marker byte.
  pub(crate) fn jfif_thumbnail() -> Vec<u8> {
    let mut raw = vec![0x01, 0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    raw.extend_from_slice(b"JFIF\0");
    raw.extend(std::iter::repeat_n(0xAB, 120));
    raw
  }

  #[test]
  fn jpeg_is_encoded_and_folded() {
    let raw = jfif_thumbnail();
    let lines = encode_photo(&raw).unwrap();
    assert_eq!(lines[0], "P");
    assert!(lines[1].starts_with(" HOTO;ENCODING=b;TYPE=JPEG:/9j/4AAQSkZJRg"));

    let joined: String =
      lines.iter().enumerate().map(|(i, l)| if i == 0 { l.as_str() } else { &l[1..] }).collect();
    let encoded = joined.strip_prefix("PHOTO;ENCODING=b;TYPE=JPEG:").unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), &raw[1..]);
  }

  #[test]
  fn non_jfif_is_unsupported() {
    let mut png = vec![0x01];
    png.extend_from_slice(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x10\0\0\0\x10");
    match encode_photo(&png) {
      Err(Error::UnsupportedImageFormat { head }) => {
        assert_eq!(head.len(), 20);
        assert_eq!(&head[..], &png[..20]);
      }
      other => panic!("expected unsupported format, got {other:?}"),
    }
  }

  #[test]
  fn truncated_image_is_unsupported() {
    assert!(encode_photo(&[0x01, 0xFF, 0xD8]).is_err());
    assert!(encode_photo(&[]).is_err());
  }

  #[test]
  fn fold_of_empty_and_single_char() {
    assert!(fold("").is_empty());
    assert_eq!(fold("P"), vec!["P".to_string()]);
  }

  proptest! {
    #[test]
    fn fold_shape(value in "[A-Za-z0-9+/=;:]{1,400}") {
      let lines = fold(&value);
      let len = value.chars().count();
      prop_assert_eq!(lines.len(), (len - 1).div_ceil(FOLD_WIDTH) + 1);

      let mut rebuilt = lines[0].clone();
      for line in &lines[1..] {
        prop_assert!(line.starts_with(' '));
        prop_assert!(line.len() <= FOLD_WIDTH + 1);
        rebuilt.push_str(&line[1..]);
      }
      prop_assert_eq!(rebuilt, value);
    }
  }
}
