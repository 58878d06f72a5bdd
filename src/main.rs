//! refdoc: generate API reference pages from a type surface and its XML comments.
//!
//! ```text
//! refdoc Acme.surface.json Acme.xml _data/nav.yml docs/api
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use refdoc::{
    BuildConfig, DocumentationStore, ModelBuilder, NavigationBuilder, PageRenderer, SiteWriter,
    SurfaceManifest, TypeUniverse,
};

#[derive(Parser)]
#[command(
    name = "refdoc",
    version,
    about = "Generate API reference pages from a compiled type surface and its XML documentation"
)]
struct Cli {
    /// Surface manifest of the binary (JSON or YAML)
    surface: PathBuf,

    /// XML documentation comment file emitted by the compiler
    comments: PathBuf,

    /// Where to write the navigation manifest
    navigation: PathBuf,

    /// Folder receiving one page per documented type
    output: PathBuf,

    /// Configuration file (YAML, JSON or TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Assembly name shown in page headers
    #[arg(long)]
    assembly_label: Option<String>,

    /// Keep existing files in the output folder
    #[arg(long)]
    no_clean: bool,

    /// Build the model on the thread pool
    #[arg(long)]
    parallel: bool,

    /// Also write the unified model as JSON
    #[arg(long)]
    dump_model: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = BuildConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.assembly_label.is_some() {
        config.assembly_label = cli.assembly_label.clone();
    }
    if cli.no_clean {
        config.clean_output = false;
    }
    if cli.parallel {
        config.parallel = true;
    }

    info!("Loading type surface from {}", cli.surface.display());
    let surface = SurfaceManifest::from_path(&cli.surface)
        .with_context(|| format!("failed to load {}", cli.surface.display()))?;

    info!("Loading documentation comments from {}", cli.comments.display());
    let store = DocumentationStore::from_path(&cli.comments)
        .with_context(|| format!("failed to read {}", cli.comments.display()))?;

    let output = ModelBuilder::new(&store)
        .with_parallel(config.parallel)
        .build(&surface);
    let warning_count = output.warnings.len() + store.warnings().len();
    if warning_count > 0 {
        warn!("{} inputs were skipped or ambiguous, see warnings above", warning_count);
    }

    if let Some(path) = &cli.dump_model {
        let json = serde_json::to_string_pretty(&output.model).context("failed to serialize model")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote model to {}", path.display());
    }

    let label = config
        .assembly_label
        .clone()
        .unwrap_or_else(|| surface.assembly_name().to_string());
    let canon = config.canonicalizer();
    let pages = PageRenderer::new(&output.model, &canon)
        .with_assembly_label(label.clone())
        .render_all();

    let mut navigation = NavigationBuilder::new(label).with_home_entry(&config.home_entry);
    for page in &pages {
        navigation.register_page(page);
    }

    let stats = SiteWriter::new(&cli.output, &cli.navigation)
        .with_clean_output(config.clean_output)
        .write(&pages, &navigation)
        .with_context(|| format!("failed to write site to {}", cli.output.display()))?;

    info!(
        "Done: {} pages, navigation written to {}",
        stats.pages_written,
        cli.navigation.display()
    );
    Ok(())
}
