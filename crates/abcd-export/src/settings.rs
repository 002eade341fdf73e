//! Layered export settings: optional TOML file, then `ABCDDB2VCARD_*`
//! environment variables. Command-line flags are applied on top by the
//! binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Where macOS keeps the current AddressBook database.
pub const DEFAULT_INPUT: &str =
  "~/Library/Application Support/AddressBook/AddressBook-v22.abcddb";

/// Config file read from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "abcddb2vcard.toml";

pub const ENV_PREFIX: &str = "ABCDDB2VCARD";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
  pub input: Option<PathBuf>,
  pub split: Option<String>,
  pub force: bool,
}

impl ExportConfig {
  /// Load settings. An explicit `path` must exist; the default file is
  /// optional.
  pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
    let file = match path {
      Some(path) => config::File::from(path).required(true),
      None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };
    config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  /// The database to read, with `~` expanded.
  pub fn input_path(&self) -> PathBuf {
    let input = self
      .input
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    expand_tilde(&input)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn reads_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.toml");
    fs::write(
      &path,
      "input = \"/tmp/book.abcddb\"\nsplit = \"%{id}.vcf\"\nforce = true\n",
    )
    .unwrap();

    let cfg = ExportConfig::load(Some(&path)).unwrap();
    assert_eq!(cfg.input.as_deref(), Some(Path::new("/tmp/book.abcddb")));
    assert_eq!(cfg.split.as_deref(), Some("%{id}.vcf"));
    assert!(cfg.force);
  }

  #[test]
  fn missing_keys_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let cfg = ExportConfig::load(Some(&path)).unwrap();
    assert_eq!(cfg.input, None);
    assert!(!cfg.force);
  }

  #[test]
  fn explicit_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ExportConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
  }

  #[test]
  fn absolute_paths_are_untouched() {
    assert_eq!(expand_tilde(Path::new("/a/b")), PathBuf::from("/a/b"));
    assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
  }

  #[test]
  fn default_input_lives_under_home() {
    let cfg = ExportConfig::default();
    if std::env::var("HOME").is_ok() {
      assert!(!cfg.input_path().starts_with("~"));
    }
    assert!(cfg.input_path().ends_with("AddressBook/AddressBook-v22.abcddb"));
  }
}
