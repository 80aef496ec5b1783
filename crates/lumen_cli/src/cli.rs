use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render a Lumen scene to a PNG")]
pub struct Args {
    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Samples per pixel (overrides the render config)
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path (overrides the render config)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Frame number; keys the per-path random streams
    #[arg(long, default_value = "0")]
    pub frame: u32,

    /// Number of consecutive frames to render (the last one is saved)
    #[arg(long, default_value = "1")]
    pub frames: u32,

    /// Scene document (JSON) to render instead of the demo scene
    #[arg(long, conflicts_with_all = ["blender", "seed"])]
    pub scene: Option<PathBuf>,

    /// Simplified Blender export (JSON) to import
    #[arg(long, conflicts_with = "seed")]
    pub blender: Option<PathBuf>,

    /// Populate a random scene from this seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render settings (JSON); missing fields use defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the scene document here before rendering
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,
}
