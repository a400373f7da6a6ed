use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::request::ResizeMode;

#[derive(Parser, Debug)]
#[command(name = "lazythumb")]
#[command(version, about = "On-demand thumbnail generator", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the URL for an image, generating its thumbnail if needed
    Resolve(ResolveArgs),
    /// Pre-generate thumbnails for every image matching the given patterns
    Warm(WarmArgs),
    /// Write a config file with default settings
    Init {
        /// Path of the config file to create
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Source image path, as it appears in public URLs (e.g. storage/photos/cat.jpg)
    pub source: String,

    /// Thumbnail width in pixels (requires --height)
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Thumbnail height in pixels (requires --width)
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Resize mode
    #[arg(short, long, value_enum, default_value_t = ResizeMode::Fit)]
    pub mode: ResizeMode,

    /// Report failures instead of printing the default image URL
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct WarmArgs {
    /// Glob patterns relative to the image root (e.g. "photos/**/*.jpg")
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Thumbnail width in pixels
    #[arg(long)]
    pub width: u32,

    /// Thumbnail height in pixels
    #[arg(long)]
    pub height: u32,

    /// Resize mode
    #[arg(short, long, value_enum, default_value_t = ResizeMode::Fit)]
    pub mode: ResizeMode,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory prefix (inside the disk root) holding source images [default: ""]
    #[arg(long)]
    pub root_path: Option<String>,

    /// Directory (inside the root path) holding generated thumbnails [default: thumbs]
    #[arg(long)]
    pub thumb_path: Option<String>,

    /// Image served whenever a thumbnail cannot be produced [default: images/default.png]
    #[arg(long)]
    pub default_img: Option<String>,

    /// Filesystem directory backing the public disk [default: storage/app/public]
    #[arg(long)]
    pub disk_root: Option<PathBuf>,

    /// URL prefix under which the disk is served [default: /storage]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Resize filter algorithm [default: lanczos3]
    #[arg(long, value_enum)]
    pub resize_filter: Option<ResizeFilter>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resize filter algorithm
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash)]
pub enum ResizeFilter {
    /// Nearest neighbor (best for pixel art)
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear interpolation
    #[value(name = "triangle")]
    Triangle,
    /// Cubic interpolation (bicubic)
    #[value(name = "catmull-rom", alias = "bicubic")]
    CatmullRom,
    /// Gaussian filter
    #[value(name = "gaussian")]
    Gaussian,
    /// Lanczos with window 3 (highest quality)
    #[default]
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResizeFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }

    /// Parse a filter name as written in a config file.
    pub fn parse(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
