// ABOUTME: Single-frame classification command for repcoach-cli
// ABOUTME: Reads one JSON frame and prints the classification result for the chosen side
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::input::read_source;
use crate::SideArg;
use repcoach::config::MotionConfig;
use repcoach::errors::{AppError, AppResult};
use repcoach::intelligence::{CategoryRegistry, StateClassifier};
use repcoach::models::{BodySide, Frame};
use std::path::Path;

/// Classify the frame at `frame_path`
pub async fn run(
    registry: &CategoryRegistry,
    config: &MotionConfig,
    category: &str,
    frame_path: &Path,
    side: SideArg,
) -> AppResult<()> {
    let content = read_source(frame_path).await?;
    let frame: Frame = serde_json::from_str(&content).map_err(|e| {
        AppError::invalid_format(format!("Invalid frame in {}: {e}", frame_path.display()))
    })?;

    let classifier =
        StateClassifier::new(registry).with_visibility_threshold(config.visibility_threshold);
    println!("{}", render(&classifier, category, &frame, side)?);
    Ok(())
}

/// Pretty JSON for the requested side selection
fn render(
    classifier: &StateClassifier<'_>,
    category: &str,
    frame: &Frame,
    side: SideArg,
) -> AppResult<String> {
    let output = match side {
        SideArg::Defined => serde_json::to_string_pretty(&classifier.classify(category, frame))?,
        SideArg::Left => serde_json::to_string_pretty(&classifier.classify_side(
            category,
            frame,
            BodySide::Left,
        ))?,
        SideArg::Right => serde_json::to_string_pretty(&classifier.classify_side(
            category,
            frame,
            BodySide::Right,
        ))?,
        SideArg::Both => {
            serde_json::to_string_pretty(&classifier.classify_bilateral(category, frame))?
        }
    };
    Ok(output)
}
