// ABOUTME: Recorded-sequence analysis command for repcoach-cli
// ABOUTME: Reads JSON-lines frames, runs the sequence analyzer, and prints the report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::display_report;
use crate::helpers::input::read_frames;
use repcoach::analysis::SequenceAnalyzer;
use repcoach::config::MotionConfig;
use repcoach::errors::AppResult;
use repcoach::intelligence::CategoryRegistry;
use std::path::Path;
use tracing::info;

/// Analyze the recording at `input`
pub async fn run(
    registry: &CategoryRegistry,
    config: &MotionConfig,
    category: &str,
    input: &Path,
    fps: f64,
    json: bool,
) -> AppResult<()> {
    let frames = read_frames(input).await?;
    info!(frames = frames.len(), path = %input.display(), "Recording loaded");

    let report = SequenceAnalyzer::new(registry)
        .with_counter_config(config.counter_config())
        .with_fps(fps)?
        .analyze(category, &frames)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }
    Ok(())
}
