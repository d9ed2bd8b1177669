//! Stamp pipeline CLI - asset tooling for the Coloring Page Maker.
//!
//! Builds Ulanzi stream-deck profiles from the stamp library and keeps the
//! library images normalized.
#![forbid(unsafe_code)]

mod cli;
mod error;
mod image_ops;
mod logging;
mod profile;
mod stamps;

use std::io::{self, IsTerminal};

use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use cli::{Cli, Commands, DEFAULT_PROFILE_OUTPUT};
use error::{Result, StampError};
use profile::{DeckLayout, ProfileBuilder};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    // Run the command
    let result = run(&cli);

    // Handle errors
    if let Err(e) = result {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Profile(args)) => cmd_profile(cli, args),
        Some(Commands::Import(args)) => cmd_import(cli, args),
        Some(Commands::Resize(args)) => cmd_resize(cli, args),
        Some(Commands::Version) => cmd_version(cli),
        Some(Commands::Completions(args)) => cmd_completions(cli, args),
    }
}

// === Quick Start ===

/// Prints quick-start help for both humans and scripts.
#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        print_robot_quick_start();
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_robot_quick_start() {
    let help = RobotQuickStart {
        tool: "stamps",
        version: build_info::VERSION,
        description: "Coloring Page Maker asset pipeline: Ulanzi profiles and stamp images",
        profile: RobotProfile {
            build: "stamps profile",
            build_to: "stamps profile out/My Profile.ulanziDeckProfile",
            custom_layout: "stamps profile --layout layout.toml",
        },
        library: RobotLibrary {
            import_stamp: "stamps import <INDEX> <IMAGE>",
            resize_image: "stamps resize <IMAGE> --height 512",
        },
        layout: RobotLayout {
            note: "13 stamps placed row-major on a 5-column keypad, hotkeys Ctrl+Shift+Alt+A-M",
            reserved: "Stamp 14 is the remove tool and is never placed",
        },
        output_modes: OutputModes {
            human: "--format=text (default)",
            robot: "--robot or --format=json",
            compact: "--format=json-compact",
        },
    };

    println!("{}", serde_json::to_string_pretty(&help).unwrap());
}

fn print_human_quick_start() {
    println!(
        "{} {} - Stamp asset pipeline\n",
        "stamps".bold().cyan(),
        build_info::VERSION
    );

    println!("{}", "QUICK START".bold().underline());
    println!();

    println!(
        "  {}  Build the Ulanzi profile from public/stamps",
        "stamps profile".green()
    );
    println!(
        "  {}  Import an image as stamp 7",
        "stamps import 7 new.png".green()
    );
    println!(
        "  {}  Resize an image to 512px height",
        "stamps resize img.png".green()
    );
    println!();

    println!("{}", "ROBOT MODE (for scripts)".bold().underline());
    println!();
    println!("  {}  JSON output", "stamps --robot <command>".cyan());
    println!();

    println!("{}", "STAMP LIBRARY".bold().underline());
    println!();
    println!("  Files named 1.png .. 14.png under public/stamps");
    println!("  Stamp 14 is the remove tool: present in the library, never on a button");
    println!();

    println!("Run {} for full help", "stamps --help".yellow());
}

// === Robot Mode JSON Structures ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    profile: RobotProfile,
    library: RobotLibrary,
    layout: RobotLayout,
    output_modes: OutputModes,
}

#[derive(Serialize)]
struct RobotProfile {
    build: &'static str,
    build_to: &'static str,
    custom_layout: &'static str,
}

#[derive(Serialize)]
struct RobotLibrary {
    import_stamp: &'static str,
    resize_image: &'static str,
}

#[derive(Serialize)]
struct RobotLayout {
    note: &'static str,
    reserved: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Command Implementations ===

fn cmd_profile(cli: &Cli, args: &cli::ProfileArgs) -> Result<()> {
    let layout = match &args.layout {
        Some(path) => DeckLayout::from_toml_file(path)?,
        None => DeckLayout::default(),
    };

    let mut builder = ProfileBuilder::new(&args.stamps_dir)
        .with_layout(layout)
        .with_device_model(&args.device_model)
        .with_profile_name(&args.name);
    if args.copy_icons {
        builder = builder.with_thumbnailer(Box::new(image_ops::VerbatimCopy));
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| DEFAULT_PROFILE_OUTPUT.into());

    let summary = builder.build(&output)?;

    if cli.use_json() {
        output_json(cli, &summary);
    } else {
        println!(
            "{} Generated Ulanzi profile: {}",
            "[SUCCESS]".green().bold(),
            summary.output.display()
        );
        if let Some(letter) = summary.last_hotkey_letter {
            println!(
                "{} Configured {} stamps with hotkeys Ctrl+Shift+Alt+A-{}",
                "[SUCCESS]".green().bold(),
                summary.placed,
                letter
            );
        }
        if summary.dropped > 0 && !cli.quiet {
            println!(
                "{} stamps beyond the button capacity were not placed",
                summary.dropped
            );
        }
    }
    Ok(())
}

fn cmd_import(cli: &Cli, args: &cli::ImportArgs) -> Result<()> {
    if args.index < 1 {
        return Err(StampError::InvalidStampIndex { index: args.index });
    }
    let index = u32::try_from(args.index)
        .map_err(|_| StampError::InvalidStampIndex { index: args.index })?;

    if DeckLayout::default().reserved_indices.contains(&index) {
        tracing::warn!(index, "Importing over the reserved remove-tool slot");
    }

    let stamp = image_ops::normalize_stamp(&args.image, args.size)?;

    std::fs::create_dir_all(&args.stamps_dir)?;
    let dest = args.stamps_dir.join(format!("{index}.png"));
    stamp
        .save(&dest)
        .map_err(|e| StampError::ImageProcessing(e.to_string()))?;

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "index": index,
                "path": dest.display().to_string(),
                "size": args.size,
                "ok": true
            }),
        );
    } else if !cli.quiet {
        println!("Saved stamp {} to {}", index, dest.display());
    }
    Ok(())
}

fn cmd_resize(cli: &Cli, args: &cli::ResizeArgs) -> Result<()> {
    let output = args.output.as_ref().unwrap_or(&args.image);
    let report = image_ops::resize_to_height(&args.image, output, args.height)?;

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "input": args.image.display().to_string(),
                "output": output.display().to_string(),
                "old_size": format!("{}x{}", report.old_width, report.old_height),
                "new_size": format!("{}x{}", report.new_width, report.new_height),
                "ok": true
            }),
        );
    } else if !cli.quiet {
        println!(
            "Current size: {}x{} pixels",
            report.old_width, report.old_height
        );
        println!(
            "Resized to: {}x{} pixels",
            report.new_width, report.new_height
        );
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "version": build_info::VERSION,
                "git_sha": build_info::git_sha(),
                "git_dirty": build_info::git_dirty() == "true",
                "build_timestamp": build_info::build_timestamp(),
                "rustc_version": build_info::rustc_semver(),
                "target": build_info::target(),
            }),
        );
    } else {
        println!("stamps {}", build_info::VERSION);
        println!(
            "git: {}{}",
            build_info::git_sha(),
            if build_info::git_dirty() == "true" {
                " (dirty)"
            } else {
                ""
            }
        );
        println!("built: {}", build_info::build_timestamp());
        println!("rustc: {}", build_info::rustc_semver());
        println!("target: {}", build_info::target());
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(_cli: &Cli, args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "stamps", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

fn output_json<T: Serialize>(cli: &Cli, data: &T) {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data).unwrap()
    } else {
        serde_json::to_string_pretty(data).unwrap()
    };
    println!("{json}");
}

fn output_error(cli: &Cli, error: &StampError) {
    if cli.use_json() {
        let json = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    } else {
        eprintln!("{}: {}", "Error".red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", "Hint".yellow(), suggestion);
        }
    }
}
