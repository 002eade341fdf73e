//! vcard2img: extract every embedded contact photo from a `.vcf` file.

use std::path::PathBuf;

use abcd_export::images::{prepare_outdir, write_photos};
use abcd_vcard::extract_photos;
use anyhow::Context as _;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Extract contact photos from a vCard file")]
struct Cli {
  /// vCard input file.
  input: PathBuf,

  /// Directory to write `<name>.jpg` files into.
  outdir: PathBuf,
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

  let text = std::fs::read_to_string(&cli.input)
    .with_context(|| format!("failed to read {}", cli.input.display()))?;
  prepare_outdir(&cli.outdir)?;

  let scan = extract_photos(&text);
  let images = write_photos(&scan, &cli.outdir);
  tracing::info!("{} contacts. {} images.", scan.cards, images);
  Ok(())
}
