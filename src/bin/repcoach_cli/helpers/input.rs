// ABOUTME: Input helpers for repcoach-cli
// ABOUTME: Reads files or stdin asynchronously and parses JSON-lines frame recordings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcoach::analysis::TimedFrame;
use repcoach::errors::{AppError, AppResult};
use repcoach::models::Frame;
use std::path::Path;
use tokio::fs;
use tokio::io::{self, AsyncReadExt};

/// Read all of `path`, treating `-` as stdin
pub async fn read_source(path: &Path) -> AppResult<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).await?;
        return Ok(buffer);
    }

    fs::read_to_string(path).await.map_err(|e| {
        AppError::not_found(format!("Input file {}", path.display())).with_source(e)
    })
}

/// Parse a JSON-lines recording; blank lines are skipped
pub async fn read_frames(path: &Path) -> AppResult<Vec<TimedFrame>> {
    let content = read_source(path).await?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_line(line).map_err(|e| {
                AppError::invalid_format(format!("{}:{}: {e}", path.display(), index + 1))
            })
        })
        .collect()
}

fn parse_line(line: &str) -> Result<TimedFrame, serde_json::Error> {
    serde_json::from_str::<TimedFrame>(line)
        .or_else(|_| serde_json::from_str::<Frame>(line).map(TimedFrame::new))
}
