// ABOUTME: repcoach CLI - command-line front end for exercise phase detection
// ABOUTME: Lists categories, classifies single frames, and analyzes recorded frame sequences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List the available motion categories
//! repcoach-cli categories
//!
//! # Dump the category table in the category file format
//! repcoach-cli categories --json > categories.json
//!
//! # Classify one frame (JSON object keyed by joint name, or an array of 33 landmarks)
//! repcoach-cli classify --category elbow_dominant --frame frame.json
//!
//! # Classify both body sides of a frame read from stdin
//! cat frame.json | repcoach-cli classify --category knee_dominant --frame - --side both
//!
//! # Analyze a JSON-lines recording at 60 fps with a custom category file
//! repcoach-cli --categories my_categories.json analyze --category curl --input session.jsonl --fps 60
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand, ValueEnum};
use repcoach::config::MotionConfig;
use repcoach::errors::{AppError, AppResult};
use repcoach::intelligence::CategoryRegistry;
use repcoach::logging::LoggingConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "repcoach-cli",
    about = "Exercise repetition phase detection CLI",
    long_about = "Classifies pose-landmark frames into repetition phases and counts repetitions in recorded sequences."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Category file replacing the built-in table (overrides REPCOACH_CATEGORIES_PATH)
    #[arg(long, global = true)]
    categories: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List registered motion categories
    Categories {
        /// Print the table in the category file format
        #[arg(long)]
        json: bool,
    },

    /// Classify a single frame
    Classify {
        /// Category key
        #[arg(long, short = 'c')]
        category: String,

        /// Frame file, or `-` for stdin
        #[arg(long, short = 'f')]
        frame: PathBuf,

        /// Body side to evaluate
        #[arg(long, value_enum, default_value_t = SideArg::Defined)]
        side: SideArg,
    },

    /// Classify and count repetitions over a JSON-lines recording
    Analyze {
        /// Category key
        #[arg(long, short = 'c')]
        category: String,

        /// Recording file (one frame per line), or `-` for stdin
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Frame rate used for frames without `timestamp_ms`
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Print the full report, including per-frame results, as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Side selection for `classify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    /// Joints exactly as defined by the category
    Defined,
    /// Joints mapped onto the left side
    Left,
    /// Joints mapped onto the right side
    Right,
    /// Both sides in one report
    Both,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging.with_level("warn")
    };
    logging
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let (config, registry) = load_settings(cli.categories.as_deref())?;
    debug!(categories = registry.len(), "Category registry ready");

    match cli.command {
        Command::Categories { json } => commands::categories::list(&registry, json)?,
        Command::Classify {
            category,
            frame,
            side,
        } => {
            commands::classify::run(&registry, &config, &category, &frame, side).await?;
        }
        Command::Analyze {
            category,
            input,
            fps,
            json,
        } => {
            commands::analyze::run(&registry, &config, &category, &input, fps, json).await?;
        }
    }

    Ok(())
}

/// Environment configuration and the category registry it selects.
///
/// Invalid `REPCOACH_*` values abort the command instead of falling back to defaults.
fn load_settings(override_path: Option<&Path>) -> Result<(MotionConfig, CategoryRegistry)> {
    let config = MotionConfig::load()?;
    let registry = match override_path {
        Some(path) => CategoryRegistry::from_path(path)?,
        None => config.load_registry()?,
    };
    Ok((config, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcoach::errors::ErrorCode;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_invalid_environment_aborts() {
        env::set_var("REPCOACH_SMOOTHING_WINDOW", "five");
        let error = load_settings(None).unwrap_err();
        env::remove_var("REPCOACH_SMOOTHING_WINDOW");

        assert_eq!(error.code, ErrorCode::ConfigInvalid);
        assert!(error.message.contains("REPCOACH_SMOOTHING_WINDOW"));
    }

    #[test]
    #[serial]
    fn test_out_of_range_environment_aborts() {
        env::set_var("REPCOACH_VISIBILITY_THRESHOLD", "2");
        let error = load_settings(None).unwrap_err();
        env::remove_var("REPCOACH_VISIBILITY_THRESHOLD");

        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    #[serial]
    fn test_override_path_replaces_registry_source() {
        let (config, registry) = load_settings(None).unwrap();
        assert!(config.categories_path.is_none());
        assert_eq!(registry.len(), 5);

        let error = load_settings(Some(Path::new("/nonexistent/categories.json"))).unwrap_err();
        assert_eq!(error.code, ErrorCode::StorageError);
    }
}
