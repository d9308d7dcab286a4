// ABOUTME: Repetition phase labels and the per-frame classification result
// ABOUTME: Absent phase plus a failure kind encodes every non-fatal detection outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{DetectionError, FailureKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Contracted or deep position (start condition met)
    Down,
    /// Extended or ready position (end condition met)
    Up,
    /// Between the two thresholds
    Transition,
    /// Stream has not produced a classification yet
    Unknown,
}

impl Phase {
    /// Upper-case label used in feedback and serialized output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "DOWN",
            Self::Up => "UP",
            Self::Transition => "TRANSITION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one frame against one motion category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Detected phase, `None` when classification could not proceed
    pub phase: Option<Phase>,
    /// Computed signal (degrees or vertical offset), 0 when phase is absent
    pub signal_value: f64,
    /// Human-readable status message
    pub message: String,
    /// Why the phase is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl ClassificationResult {
    /// Successful classification
    #[must_use]
    pub fn classified(phase: Phase, signal_value: f64, message: impl Into<String>) -> Self {
        Self {
            phase: Some(phase),
            signal_value,
            message: message.into(),
            failure: None,
        }
    }

    /// Result carrying a detection failure
    #[must_use]
    pub fn from_failure(error: &DetectionError) -> Self {
        Self {
            phase: None,
            signal_value: 0.0,
            message: error.user_message(),
            failure: Some(error.kind()),
        }
    }

    /// Whether a phase was determined
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        self.phase.is_some()
    }
}
