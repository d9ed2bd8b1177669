//! CLI argument definitions and command dispatch.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default stamp library location, relative to the project root.
pub const DEFAULT_STAMPS_DIR: &str = "public/stamps";

/// Default profile output path when no argument is given.
pub const DEFAULT_PROFILE_OUTPUT: &str = "public/Coloring Page Maker.ulanziDeckProfile";

/// Stamp pipeline CLI - asset tooling for the Coloring Page Maker.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "stamps", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "STAMPS_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose output (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Profile Generation ===
    /// Build the .ulanziDeckProfile archive from the stamp library
    Profile(ProfileArgs),

    // === Stamp Library Maintenance ===
    /// Normalize an image into the stamp library as {index}.png
    Import(ImportArgs),

    /// Resize an image to a target height, preserving aspect ratio
    Resize(ResizeArgs),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct ProfileArgs {
    /// Output file path for the generated profile
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory containing the stamp images ({index}.png)
    #[arg(long, env = "STAMPS_DIR", default_value = DEFAULT_STAMPS_DIR)]
    pub stamps_dir: PathBuf,

    /// Target device model, passed through to the manifest unvalidated
    #[arg(long, default_value = "D200H")]
    pub device_model: String,

    /// Profile display name
    #[arg(long, default_value = "Coloring Page Maker")]
    pub name: String,

    /// TOML file overriding layout fields (columns, max_actions, ...)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Copy stamps verbatim as button icons instead of rendering thumbnails
    #[arg(long)]
    pub copy_icons: bool,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Stamp number (e.g., 4, 7, 13)
    pub index: i64,

    /// Source image to import
    pub image: PathBuf,

    /// Directory containing the stamp images
    #[arg(long, env = "STAMPS_DIR", default_value = DEFAULT_STAMPS_DIR)]
    pub stamps_dir: PathBuf,

    /// Edge length of the stored stamp in pixels
    #[arg(long, default_value = "512")]
    pub size: u32,
}

#[derive(Parser, Debug)]
pub struct ResizeArgs {
    /// Image file to resize
    pub image: PathBuf,

    /// Target height in pixels
    #[arg(long, default_value = "512")]
    pub height: u32,

    /// Write the result here instead of overwriting the input
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
