//! Radar catalog builder.
//!
//! Reads product identifiers (listing file, stdin, directory scan or WMS
//! capabilities) and either writes the catalog document or prints the latest
//! products that still need downloading, one JSON object per line.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ingestion::RawIdentifier;
use radar_common::SourceFormat;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use catalog_builder::config::{BuilderConfig, ConfigOverrides};
use catalog_builder::{config_loader, inputs, pipeline};

#[derive(Parser, Debug)]
#[command(name = "catalog-builder")]
#[command(about = "Builds the radar product catalog")]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Configuration file (defaults are used when not given)
    #[arg(short, long, env = "CATALOG_BUILDER_CONFIG")]
    config: Option<PathBuf>,

    /// Identifier listing, one per line; "-" reads stdin
    #[arg(short, long)]
    listing: Option<PathBuf>,

    /// Directory to scan for product files
    #[arg(long)]
    scan_dir: Option<PathBuf>,

    /// WMS GetCapabilities document to read layers from
    #[arg(long)]
    capabilities: Option<PathBuf>,

    /// Grammar of listed identifiers (directory_scan, object_store_key, wms_layer, wfs_feature)
    #[arg(long, env = "CATALOG_SOURCE")]
    source: Option<SourceFormat>,

    /// Site directory YAML
    #[arg(long, env = "SITES_FILE")]
    sites_file: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, env = "CATALOG_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Pretty-print the catalog
    #[arg(long)]
    pretty: bool,

    /// Aggregate on a single thread
    #[arg(long)]
    sequential: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Mode {
    /// Build and write the catalog document
    Catalog,
    /// Print latest products whose metadata is not yet downloaded
    Latest,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => BuilderConfig::default(),
    };
    config.apply(ConfigOverrides {
        sites_file: args.sites_file.clone(),
        source: args.source,
        output_dir: args.output_dir.clone(),
        pretty: args.pretty,
        sequential: args.sequential,
        log_level: args.log_level.clone(),
    });

    // Initialize tracing
    let level = match config.logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!(mode = ?args.mode, source = %config.input.source, "Starting catalog builder");

    let mode = args.mode;
    let work = tokio::task::spawn_blocking(move || run(mode, &args, &config));

    tokio::select! {
        joined = work => joined.context("Catalog builder task failed")?,
        _ = tokio::signal::ctrl_c() => {
            // Nothing is published before the run completes.
            warn!("Received shutdown signal, discarding in-flight results");
            std::process::exit(130);
        }
    }
}

fn run(mode: Mode, args: &Args, config: &BuilderConfig) -> Result<()> {
    let raws = collect_inputs(args, config)?;

    match mode {
        Mode::Catalog => {
            let directory = config_loader::load_site_directory(&config.sites_file)?;
            info!(sites = directory.len(), "Loaded site directory");

            let build = pipeline::build_catalog(&raws, &directory, config.aggregation.partitioned);
            pipeline::write_catalog(
                &build.catalog,
                &config.output.catalog_path(),
                config.output.pretty,
            )?;

            info!(
                identifiers = build.parse_summary.total,
                parse_failures = build.parse_summary.failed,
                unnameable = build.unnameable,
                conflicts = build.report.conflicts.len(),
                unknown_sites = ?build.report.unknown_sites,
                "Catalog run complete"
            );
        }
        Mode::Latest => {
            let pending = pipeline::select_pending(&raws, &config.output.dir);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            for download in &pending {
                serde_json::to_writer(&mut out, download)?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

fn collect_inputs(args: &Args, config: &BuilderConfig) -> Result<Vec<RawIdentifier>> {
    let mut raws = Vec::new();

    if let Some(path) = &args.capabilities {
        raws.extend(inputs::read_capabilities(path)?);
    }
    if let Some(dir) = &args.scan_dir {
        raws.extend(inputs::scan_directory(dir, &config.input.extensions)?);
    }

    let read_stdin = match &args.listing {
        Some(path) if path.as_os_str() == "-" => true,
        Some(path) => {
            raws.extend(inputs::read_listing_file(path, config.input.source)?);
            false
        }
        None => args.capabilities.is_none() && args.scan_dir.is_none(),
    };
    if read_stdin {
        let stdin = io::stdin();
        raws.extend(inputs::read_listing(stdin.lock(), config.input.source)?);
    }

    info!(count = raws.len(), "Collected identifiers");
    Ok(raws)
}
