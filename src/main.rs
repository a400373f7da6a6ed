use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use lazythumb::cli::{
    CliArgs, Command, CommonArgs, CompressionLevel, ResizeFilter, ResolveArgs, WarmArgs,
};
use lazythumb::config::{LoadedConfig, ThumbConfig, save_config};
use lazythumb::request::Dimensions;
use lazythumb::resolver::ThumbnailResolver;
use lazythumb::source::collect_sources;
use lazythumb::storage::LocalDisk;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match cli.command {
        Command::Resolve(args) => resolve(&args),
        Command::Warm(args) => warm(&args),
        Command::Init { file } => {
            init_logging(false);
            save_config(&ThumbConfig::default(), &file)?;
            info!("Wrote default config to {}", file.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn resolve(args: &ResolveArgs) -> Result<()> {
    let merged = merge_config_with_args(&args.common)?;
    init_logging(merged.verbose);

    let resolver = merged.build_resolver();
    let mode = args.mode.as_str();

    let url = if args.strict {
        resolver
            .resolve(&args.source, args.width, args.height, mode)
            .with_context(|| format!("failed to resolve '{}'", args.source))?
            .url
    } else {
        resolver.resolve_or_default(&args.source, args.width, args.height, mode)
    };

    println!("{}", url);
    Ok(())
}

fn warm(args: &WarmArgs) -> Result<()> {
    let merged = merge_config_with_args(&args.common)?;
    init_logging(merged.verbose);

    info!("lazythumb v{}", env!("CARGO_PKG_VERSION"));

    let size = Dimensions::new(args.width, args.height)?;
    let source_root = merged.disk_root.join(merged.config.root_path.trim_start_matches('/'));
    let sources = collect_sources(&source_root, &args.patterns)
        .with_context(|| format!("failed to collect images under {}", source_root.display()))?;

    if sources.is_empty() {
        bail!("no files under {} match the given patterns", source_root.display());
    }

    let resolver = merged.build_resolver();
    let report = resolver.warm(&sources, size, args.mode);

    if report.generated + report.cached == 0 {
        bail!("none of the {} matched files could be thumbnailed", report.total());
    }

    info!("Done!");
    Ok(())
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    config: ThumbConfig,
    disk_root: PathBuf,
    filter: ResizeFilter,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

impl MergedConfig {
    fn build_resolver(&self) -> ThumbnailResolver<LocalDisk> {
        ThumbnailResolver::local(&self.config, &self.disk_root, self.filter, self.compress)
    }
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    let loaded = if let Some(config_path) = &args.config {
        LoadedConfig::load(config_path)
            .with_context(|| format!("failed to load config: {}", config_path.display()))?
    } else {
        LoadedConfig::defaults()
    };

    // A CLI disk root is relative to the working directory, not the config file
    let disk_root = args
        .disk_root
        .clone()
        .unwrap_or_else(|| loaded.resolve_disk_root());

    let mut config = loaded.config;
    if let Some(root_path) = &args.root_path {
        config.root_path = root_path.clone();
    }
    if let Some(thumb_path) = &args.thumb_path {
        config.thumb_path = thumb_path.clone();
    }
    if let Some(default_img) = &args.default_img {
        config.default_img = default_img.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }

    let filter = match args.resize_filter {
        Some(filter) => filter,
        None => config.filter()?,
    };

    let compress = match args.compress {
        Some(level) => Some(level),
        None => config.compress_level()?,
    };

    Ok(MergedConfig {
        config,
        disk_root,
        filter,
        compress,
        verbose: args.verbose,
    })
}
