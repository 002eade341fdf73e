//! The export runner.

use std::{
  collections::HashSet,
  fmt,
  fs::{self, File, OpenOptions},
  io::Write as _,
  path::{Path, PathBuf},
};

use abcd_core::{record::Record, template::FilenameTemplate};

use crate::{Error, Result};

// ─── Output ──────────────────────────────────────────────────────────────────

/// Where the cards go.
#[derive(Debug, Clone)]
pub enum Output {
  /// Every card concatenated into one file.
  Single(PathBuf),
  /// One file per record, named by `template`, under `dir`. Records that
  /// format to the same name share a file.
  Split {
    dir:      PathBuf,
    template: FilenameTemplate,
  },
}

impl Output {
  /// Build from the command-line shape: a template turns `path` into a
  /// directory.
  pub fn new(path: PathBuf, split: Option<&str>) -> Result<Self> {
    Ok(match split {
      Some(pattern) => Self::Split {
        dir:      path,
        template: FilenameTemplate::parse(pattern)?,
      },
      None => Self::Single(path),
    })
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
  pub total:   usize,
  pub written: usize,
}

impl Summary {
  pub fn failed(&self) -> usize { self.total - self.written }
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} of {} contacts written.", self.written, self.total)
  }
}

// ─── Exporter ────────────────────────────────────────────────────────────────

pub struct Exporter {
  output: Output,
  force:  bool,
}

impl Exporter {
  pub fn new(output: Output, force: bool) -> Self { Self { output, force } }

  /// Check the output side before anything is written.
  pub fn validate(&self) -> Result<()> {
    match &self.output {
      Output::Single(path) => {
        let parent = parent_dir(path);
        if !parent.is_dir() {
          return Err(Error::MissingParent(path.clone()));
        }
        if path.exists() && !self.force {
          return Err(Error::Exists(path.clone()));
        }
      }
      Output::Split { dir, .. } => {
        if dir.exists() {
          if !dir.is_dir() {
            return Err(Error::NotADirectory(dir.clone()));
          }
        } else if !parent_dir(dir).is_dir() {
          return Err(Error::MissingParent(dir.clone()));
        }
      }
    }
    Ok(())
  }

  /// Files the export would touch, in first-use order.
  pub fn plan(&self, records: &[Record]) -> Vec<PathBuf> {
    match &self.output {
      Output::Single(path) => vec![path.clone()],
      Output::Split { dir, template } => {
        let mut seen = HashSet::new();
        records
          .iter()
          .map(|r| dir.join(template.format(r)))
          .filter(|p| seen.insert(p.clone()))
          .collect()
      }
    }
  }

  /// Encode and write every record.
  ///
  /// Failing to create the single output file is fatal. Anything that goes
  /// wrong with one record is logged and counted against the summary.
  pub fn run(&self, records: &[Record]) -> Result<Summary> {
    let mut summary = Summary {
      total: records.len(),
      ..Summary::default()
    };

    match &self.output {
      Output::Single(path) => {
        let mut file = File::create(path).map_err(Error::io(path))?;
        for record in records {
          let card = abcd_vcard::encode(record);
          match file.write_all(card.as_bytes()) {
            Ok(()) => summary.written += 1,
            Err(e) => report(record, &Error::io(path)(e)),
          }
        }
      }
      Output::Split { dir, template } => {
        fs::create_dir_all(dir).map_err(Error::io(dir))?;
        let mut opened = HashSet::new();
        for record in records {
          let path = dir.join(template.format(record));
          match self.write_split(&path, record, &mut opened) {
            Ok(()) => summary.written += 1,
            Err(e) => report(record, &e),
          }
        }
      }
    }

    tracing::info!(
      total = summary.total,
      failed = summary.failed(),
      "{summary}"
    );
    Ok(summary)
  }

  fn write_split(
    &self,
    path: &Path,
    record: &Record,
    opened: &mut HashSet<PathBuf>,
  ) -> Result<()> {
    let mut options = OpenOptions::new();
    if opened.contains(path) {
      options.append(true);
    } else {
      if path.exists() && !self.force {
        return Err(Error::Exists(path.to_path_buf()));
      }
      let parent = parent_dir(path);
      fs::create_dir_all(parent).map_err(Error::io(parent))?;
      options.write(true).create(true).truncate(true);
    }

    let mut file = options.open(path).map_err(Error::io(path))?;
    opened.insert(path.to_path_buf());
    file
      .write_all(abcd_vcard::encode(record).as_bytes())
      .map_err(Error::io(path))
  }
}

fn parent_dir(path: &Path) -> &Path {
  match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  }
}

fn report(record: &Record, error: &Error) {
  tracing::warn!(
    record = record.id,
    name = %record.full_name(),
    "contact not written: {error}"
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  fn person(id: i64, first: &str, last: &str) -> Record {
    Record {
      first_name: first.to_string(),
      last_name: last.to_string(),
      ..Record::new(id)
    }
  }

  fn book() -> Vec<Record> {
    vec![
      person(1, "Ada", "Lovelace"),
      person(2, "Charles", "Babbage"),
      person(3, "Byron", "Lovelace"),
    ]
  }

  fn cards_in(path: &Path) -> usize {
    fs::read_to_string(path)
      .unwrap()
      .matches("BEGIN:VCARD\r\n")
      .count()
  }

  // ── Single file ───────────────────────────────────────────────────────────

  #[test]
  fn single_file_holds_every_card() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contacts.vcf");
    let exporter = Exporter::new(Output::Single(out.clone()), false);

    exporter.validate().unwrap();
    let summary = exporter.run(&book()).unwrap();

    assert_eq!(summary, Summary { total: 3, written: 3 });
    assert_eq!(summary.to_string(), "3 of 3 contacts written.");
    assert_eq!(cards_in(&out), 3);
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.find("FN:Ada Lovelace").unwrap() < text.find("FN:Charles").unwrap());
  }

  #[test]
  fn existing_file_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contacts.vcf");
    fs::write(&out, "old").unwrap();

    let err = Exporter::new(Output::Single(out.clone()), false)
      .validate()
      .unwrap_err();
    assert!(matches!(err, Error::Exists(p) if p == out));

    let forced = Exporter::new(Output::Single(out.clone()), true);
    forced.validate().unwrap();
    forced.run(&book()[..1]).unwrap();
    assert!(!fs::read_to_string(&out).unwrap().contains("old"));
  }

  #[test]
  fn missing_parent_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("contacts.vcf");
    let err = Exporter::new(Output::Single(out), false)
      .validate()
      .unwrap_err();
    assert!(matches!(err, Error::MissingParent(_)));
  }

  #[test]
  fn empty_book_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contacts.vcf");
    let summary = Exporter::new(Output::Single(out.clone()), false)
      .run(&[])
      .unwrap();
    assert_eq!(summary.to_string(), "0 of 0 contacts written.");
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
  }

  // ── Split ─────────────────────────────────────────────────────────────────

  #[test]
  fn split_writes_one_file_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cards");
    let exporter =
      Exporter::new(Output::new(out.clone(), Some("%{id}_%{fullname}.vcf")).unwrap(), false);

    exporter.validate().unwrap();
    let summary = exporter.run(&book()).unwrap();

    assert_eq!(summary.written, 3);
    assert_eq!(cards_in(&out.join("1_Ada Lovelace.vcf")), 1);
    assert_eq!(cards_in(&out.join("2_Charles Babbage.vcf")), 1);
    assert_eq!(cards_in(&out.join("3_Byron Lovelace.vcf")), 1);
  }

  #[test]
  fn colliding_names_share_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(
      Output::new(dir.path().to_path_buf(), Some("%{last_name}.vcf")).unwrap(),
      false,
    );

    let summary = exporter.run(&book()).unwrap();
    assert_eq!(summary.written, 3);
    assert_eq!(cards_in(&dir.path().join("Lovelace.vcf")), 2);
    assert_eq!(cards_in(&dir.path().join("Babbage.vcf")), 1);
  }

  #[test]
  fn existing_split_file_fails_only_that_record() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2.vcf"), "keep").unwrap();
    let exporter = Exporter::new(
      Output::new(dir.path().to_path_buf(), Some("%{id}.vcf")).unwrap(),
      false,
    );

    let summary = exporter.run(&book()).unwrap();
    assert_eq!(summary, Summary { total: 3, written: 2 });
    assert_eq!(summary.failed(), 1);
    assert_eq!(fs::read_to_string(dir.path().join("2.vcf")).unwrap(), "keep");
  }

  #[test]
  fn template_literals_may_nest_directories() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(
      Output::new(dir.path().to_path_buf(), Some("%{last_name}/%{first_name}.vcf")).unwrap(),
      false,
    );
    exporter.run(&book()).unwrap();
    assert!(dir.path().join("Lovelace").join("Byron.vcf").is_file());
  }

  #[test]
  fn plan_lists_distinct_paths() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(
      Output::new(dir.path().to_path_buf(), Some("%{last_name}.vcf")).unwrap(),
      false,
    );
    assert_eq!(
      exporter.plan(&book()),
      vec![dir.path().join("Lovelace.vcf"), dir.path().join("Babbage.vcf")]
    );
    assert!(!dir.path().join("Lovelace.vcf").exists());
  }

  #[test]
  fn bad_template_is_rejected_up_front() {
    let err = Output::new(PathBuf::from("out"), Some("%{shoe_size}.vcf")).unwrap_err();
    assert!(matches!(err, Error::Template(_)));
  }

  #[test]
  fn split_target_must_be_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file");
    fs::write(&file, "").unwrap();
    let err = Exporter::new(Output::new(file, Some("%{id}")).unwrap(), false)
      .validate()
      .unwrap_err();
    assert!(matches!(err, Error::NotADirectory(_)));
  }
}
