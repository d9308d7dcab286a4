// ABOUTME: Detection failure taxonomy for the exercise state classifier
// ABOUTME: Failures are rendered into classification results, never thrown to callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Detection Error Types
//!
//! Provides the structured failure taxonomy for one classification call:
//! - `DetectionError` - what went wrong while classifying a frame
//! - `FailureKind` - the coarse category surfaced alongside an absent phase
//! - Conversion to `AppError` for layers that do propagate errors

use super::{AppError, ErrorCode};
use crate::models::Joint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse failure category attached to a classification result with no phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Requested category key is not in the registry
    ConfigurationMiss,
    /// One or more required joints fell below the visibility threshold
    InsufficientConfidence,
    /// Lookup or arithmetic failure while computing the signal
    ComputationFault,
}

/// Errors produced while classifying a single frame.
///
/// The classifier converts every variant into a result value; callers only
/// see this type through `ClassificationResult::failure` or when they ask for
/// an `AppError`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectionError {
    /// Category key was not found in the registry
    #[error("unknown category '{key}'")]
    UnknownCategory {
        /// Key requested by the caller
        key: String,
    },
    /// Required joints are below the visibility threshold
    #[error("landmarks not visible: {}", joint_names(joints))]
    LandmarksNotVisible {
        /// Joints that failed the visibility gate
        joints: Vec<Joint>,
    },
    /// A required joint is absent from the frame
    #[error("landmark {} missing from frame", joint.name())]
    MissingLandmark {
        /// The joint that could not be resolved
        joint: Joint,
    },
    /// Signal computation produced a non-finite value
    #[error("non-finite signal: {details}")]
    NonFiniteSignal {
        /// Description of the offending computation
        details: String,
    },
}

impl DetectionError {
    /// Create an "unknown category" error
    #[must_use]
    pub fn unknown_category(key: impl Into<String>) -> Self {
        Self::UnknownCategory { key: key.into() }
    }

    /// Create a "not visible" error
    #[must_use]
    pub fn not_visible(joints: Vec<Joint>) -> Self {
        Self::LandmarksNotVisible { joints }
    }

    /// Create a "missing landmark" error
    #[must_use]
    pub const fn missing_landmark(joint: Joint) -> Self {
        Self::MissingLandmark { joint }
    }

    /// Create a "non-finite signal" error
    #[must_use]
    pub fn non_finite(details: impl Into<String>) -> Self {
        Self::NonFiniteSignal {
            details: details.into(),
        }
    }

    /// Coarse category of this failure
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::UnknownCategory { .. } => FailureKind::ConfigurationMiss,
            Self::LandmarksNotVisible { .. } => FailureKind::InsufficientConfidence,
            Self::MissingLandmark { .. } | Self::NonFiniteSignal { .. } => {
                FailureKind::ComputationFault
            }
        }
    }

    /// Status message shown to the user for this failure
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind() {
            FailureKind::ConfigurationMiss => "unknown category".to_owned(),
            FailureKind::InsufficientConfidence => "landmark(s) not visible".to_owned(),
            FailureKind::ComputationFault => format!("detection error: {self}"),
        }
    }
}

fn joint_names(joints: &[Joint]) -> String {
    joints
        .iter()
        .map(|joint| joint.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<DetectionError> for AppError {
    fn from(error: DetectionError) -> Self {
        let code = match error.kind() {
            FailureKind::ConfigurationMiss => ErrorCode::ResourceNotFound,
            FailureKind::InsufficientConfidence => ErrorCode::InvalidInput,
            FailureKind::ComputationFault => ErrorCode::InternalError,
        };
        Self::new(code, error.to_string())
    }
}
