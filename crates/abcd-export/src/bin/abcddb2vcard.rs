//! abcddb2vcard: export an AddressBook database (`.abcddb`) to vCard 3.0.
//!
//! Settings come from `abcddb2vcard.toml` (or `--config`), then
//! `ABCDDB2VCARD_*` environment variables, then the flags below.
//!
//! ```text
//! abcddb2vcard contacts.vcf
//! abcddb2vcard -s '%{id}_%{fullname}.vcf' cards/
//! ```

use std::path::PathBuf;

use abcd_core::assemble::load;
use abcd_export::{ExportConfig, Exporter, Output};
use abcd_store_sqlite::AbcdDatabase;
use anyhow::{Context as _, bail};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Export an AddressBook database to vCard 3.0")]
struct Cli {
  /// vCard output file, or the output directory with `--split`.
  output: PathBuf,

  /// AddressBook database to read.
  #[arg(short, long, value_name = "FILE")]
  input: Option<PathBuf>,

  /// Overwrite existing output.
  #[arg(short, long)]
  force: bool,

  /// Write one file per contact, named by TEMPLATE, e.g. `%{id}_%{fullname}.vcf`.
  #[arg(short, long, value_name = "TEMPLATE")]
  split: Option<String>,

  /// Print the files that would be written and exit.
  #[arg(long)]
  dry_run: bool,

  /// Path to a TOML configuration file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let settings = ExportConfig::load(cli.config.as_deref())
    .context("failed to read configuration")?;
  let settings = ExportConfig {
    input: cli.input.or(settings.input),
    split: cli.split.or(settings.split),
    force: cli.force || settings.force,
  };

  // Validate everything before touching the output.
  let input = settings.input_path();
  if !input.is_file() {
    bail!("AddressBook {} does not exist", input.display());
  }
  let output = Output::new(cli.output, settings.split.as_deref())?;
  let exporter = Exporter::new(output, settings.force);
  exporter.validate()?;

  let mut db = AbcdDatabase::open(&input)
    .with_context(|| format!("failed to open {}", input.display()))?;
  let records = load(&mut db)
    .with_context(|| format!("failed to read {}", input.display()))?;

  if cli.dry_run {
    for path in exporter.plan(&records) {
      println!("{}", path.display());
    }
    return Ok(());
  }

  exporter.run(&records)?;
  Ok(())
}
