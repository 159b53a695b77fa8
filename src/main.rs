use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use style_dictionary_exporter::{export, write_files, ExportContext, ExporterConfiguration, Snapshot};
use tracing_subscriber::EnvFilter;

/// Export design tokens as Style Dictionary JSON files.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Design system snapshot (tokens, groups, collections, themes, brands)
    #[arg(long)]
    snapshot: PathBuf,

    /// Exporter configuration; defaults are used for missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only export tokens of this brand
    #[arg(long)]
    brand: Option<String>,

    /// Theme to apply, by id; repeat for several. Defaults to all themes
    #[arg(long = "theme")]
    themes: Vec<String>,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let snapshot = Snapshot::load(&args.snapshot)?;
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration {}", path.display()))?;
            ExporterConfiguration::from_json(&text)
                .with_context(|| format!("Invalid configuration {}", path.display()))?
        }
        None => ExporterConfiguration::default(),
    };
    let context = ExportContext {
        brand_id: args.brand,
        theme_ids: args.themes,
    };

    let files = export(&snapshot, &context, &config)?;
    write_files(&args.out, &files)?;
    Ok(())
}
