// ABOUTME: Offline analysis of a recorded frame sequence for one motion category
// ABOUTME: Classifies every frame in parallel, replays the counter in order, and summarizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sequence Analysis
//!
//! Classification is stateless, so the per-frame pass runs on the rayon pool.
//! The counter pass is inherently sequential and replays frames in input order.

use crate::errors::{AppError, AppResult};
use crate::intelligence::{CategoryRegistry, CounterConfig, RepetitionCounter, StateClassifier};
use crate::models::{ClassificationResult, Frame, Phase};
use rayon::prelude::*;
use repcoach_core::constants::counter::DEFAULT_FPS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

/// A frame with an optional capture time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedFrame {
    /// Milliseconds since the start of the recording; derived from the frame rate when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    /// Landmarks observed in this frame
    pub landmarks: Frame,
}

impl TimedFrame {
    /// Frame without an explicit timestamp
    #[must_use]
    pub const fn new(landmarks: Frame) -> Self {
        Self {
            timestamp_ms: None,
            landmarks,
        }
    }

    /// Frame captured `timestamp_ms` after the recording started
    #[must_use]
    pub const fn at(timestamp_ms: u64, landmarks: Frame) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            landmarks,
        }
    }
}

/// Number of frames per detected phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCounts {
    /// Frames classified `DOWN`
    pub down: usize,
    /// Frames classified `UP`
    pub up: usize,
    /// Frames classified `TRANSITION`
    pub transition: usize,
}

impl PhaseCounts {
    fn record(&mut self, phase: Phase) {
        match phase {
            Phase::Down => self.down += 1,
            Phase::Up => self.up += 1,
            Phase::Transition | Phase::Unknown => self.transition += 1,
        }
    }
}

/// Summary of one analyzed sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceReport {
    /// Category key the sequence was analyzed against
    pub category: String,
    /// Number of input frames
    pub frame_count: usize,
    /// Histogram of classified phases
    pub phase_counts: PhaseCounts,
    /// Frames with no phase (hidden joints or computation faults)
    pub unclassified: usize,
    /// Repetitions counted over the whole sequence
    pub repetitions: u32,
    /// Indices of the frames that completed a repetition
    pub repetition_frames: Vec<usize>,
    /// Smallest signal among classified frames
    pub min_signal: Option<f64>,
    /// Largest signal among classified frames
    pub max_signal: Option<f64>,
    /// Timestamp of the last frame
    pub duration_ms: u64,
    /// Per-frame classification in input order
    pub results: Vec<ClassificationResult>,
}

/// Batch analyzer over a category registry
#[derive(Debug, Clone)]
pub struct SequenceAnalyzer<'a> {
    registry: &'a CategoryRegistry,
    counter_config: CounterConfig,
    frame_interval: Duration,
}

impl<'a> SequenceAnalyzer<'a> {
    /// Analyzer with default counter tuning at the default frame rate
    #[must_use]
    pub fn new(registry: &'a CategoryRegistry) -> Self {
        Self {
            registry,
            counter_config: CounterConfig::default(),
            frame_interval: Duration::from_secs_f64(1.0 / DEFAULT_FPS),
        }
    }

    /// Use `config` for the counter pass and the visibility gate
    #[must_use]
    pub fn with_counter_config(mut self, config: CounterConfig) -> Self {
        self.counter_config = config;
        self
    }

    /// Frame rate used for frames without a timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if `fps` is not a positive finite number
    pub fn with_fps(mut self, fps: f64) -> AppResult<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Frame rate must be a positive number, got {fps}"
            )));
        }
        self.frame_interval = Duration::try_from_secs_f64(1.0 / fps).map_err(|e| {
            AppError::invalid_input(format!("Frame rate {fps} is too low")).with_source(e)
        })?;
        Ok(self)
    }

    /// Analyze `frames` against `category_key`
    ///
    /// # Errors
    ///
    /// Returns an error if the category is unknown or `frames` is empty
    #[instrument(skip(self, frames), fields(frames = frames.len()))]
    pub fn analyze(&self, category_key: &str, frames: &[TimedFrame]) -> AppResult<SequenceReport> {
        let category = self
            .registry
            .get(category_key)
            .ok_or_else(|| AppError::not_found(format!("Category '{category_key}'")))?;
        if frames.is_empty() {
            return Err(AppError::invalid_input("Frame sequence is empty"));
        }

        let classifier = StateClassifier::new(self.registry)
            .with_visibility_threshold(self.counter_config.visibility_threshold);
        let results: Vec<ClassificationResult> = frames
            .par_iter()
            .map(|frame| classifier.classify(category_key, &frame.landmarks))
            .collect();

        let mut phase_counts = PhaseCounts::default();
        let mut unclassified = 0;
        let mut min_signal: Option<f64> = None;
        let mut max_signal: Option<f64> = None;
        for result in &results {
            if let Some(phase) = result.phase {
                phase_counts.record(phase);
                let value = result.signal_value;
                min_signal = Some(min_signal.map_or(value, |min| min.min(value)));
                max_signal = Some(max_signal.map_or(value, |max| max.max(value)));
            } else {
                unclassified += 1;
            }
        }

        let mut counter = RepetitionCounter::new(category, self.counter_config.clone());
        let mut repetition_frames = Vec::new();
        let mut last_timestamp = Duration::ZERO;
        for (index, frame) in frames.iter().enumerate() {
            let timestamp = self.timestamp_of(index, frame)?;
            last_timestamp = timestamp;
            if counter
                .observe(&frame.landmarks, timestamp)
                .is_some_and(|update| update.repetition_completed)
            {
                repetition_frames.push(index);
            }
        }

        let report = SequenceReport {
            category: category_key.to_owned(),
            frame_count: frames.len(),
            phase_counts,
            unclassified,
            repetitions: counter.count(),
            repetition_frames,
            min_signal,
            max_signal,
            duration_ms: u64::try_from(last_timestamp.as_millis()).unwrap_or(u64::MAX),
            results,
        };

        info!(
            category = category_key,
            frames = report.frame_count,
            repetitions = report.repetitions,
            unclassified = report.unclassified,
            "Sequence analyzed"
        );
        Ok(report)
    }

    fn timestamp_of(&self, index: usize, frame: &TimedFrame) -> AppResult<Duration> {
        match frame.timestamp_ms {
            Some(millis) => Ok(Duration::from_millis(millis)),
            None => Duration::try_from_secs_f64(self.frame_interval.as_secs_f64() * index as f64)
                .map_err(|e| {
                    AppError::invalid_input(format!(
                        "Timestamp of frame {index} overflows at this frame rate"
                    ))
                    .with_source(e)
                }),
        }
    }
}
