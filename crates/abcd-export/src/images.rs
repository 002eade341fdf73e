//! Writing photos pulled out of a `.vcf` document to disk.

use std::{fs, path::Path};

use abcd_vcard::PhotoScan;

use crate::{Error, Result};

/// Make sure `outdir` exists. Only the last path segment is created.
pub fn prepare_outdir(outdir: &Path) -> Result<()> {
  if outdir.is_dir() {
    return Ok(());
  }
  if outdir.exists() {
    return Err(Error::NotADirectory(outdir.to_path_buf()));
  }
  match outdir.parent() {
    Some(p) if !p.as_os_str().is_empty() && !p.is_dir() => {
      Err(Error::MissingParent(outdir.to_path_buf()))
    }
    _ => fs::create_dir(outdir).map_err(Error::io(outdir)),
  }
}

/// Write each photo as `<outdir>/<name>.jpg` and return how many were
/// written. Cards sharing a name overwrite each other.
pub fn write_photos(scan: &PhotoScan, outdir: &Path) -> usize {
  let mut written = 0;
  for photo in &scan.photos {
    let path = outdir.join(photo.file_name());
    match fs::write(&path, &photo.data) {
      Ok(()) => written += 1,
      Err(e) => tracing::warn!(card = photo.card, path = %path.display(), "image not written: {e}"),
    }
  }
  written
}

#[cfg(test)]
mod tests {
  use abcd_vcard::extract_photos;

  use super::*;

  #[test]
  fn writes_named_images() {
    let dir = tempfile::tempdir().unwrap();
    let text = "BEGIN:VCARD\r\nFN:AC/DC\r\nPHOTO;ENCODING=b;TYPE=JPEG:\r\n QUJD\r\nEND:VCARD\r\n\
                BEGIN:VCARD\r\nFN:Nobody\r\nEND:VCARD\r\n";
    let scan = extract_photos(text);

    assert_eq!(write_photos(&scan, dir.path()), 1);
    assert_eq!(scan.cards, 2);
    assert_eq!(fs::read(dir.path().join("AC-DC.jpg")).unwrap(), b"ABC");
  }

  #[test]
  fn creates_only_the_last_segment() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("images");
    prepare_outdir(&out).unwrap();
    assert!(out.is_dir());
    prepare_outdir(&out).unwrap();

    let deep = dir.path().join("a").join("b");
    assert!(matches!(prepare_outdir(&deep), Err(Error::MissingParent(_))));
  }
}
