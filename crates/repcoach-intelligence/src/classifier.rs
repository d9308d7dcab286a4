// ABOUTME: Stateless repetition phase classifier over per-frame joint landmarks
// ABOUTME: Resolves the category, gates on visibility, computes the signal, applies thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # State Classifier
//!
//! `classify` is a pure function of (registry, category key, frame). It never
//! panics and never returns an error: unknown categories, occluded joints and
//! arithmetic faults all come back as a result with no phase and a status
//! message.
//!
//! The start condition is evaluated strictly before the end condition, so a
//! signal satisfying both (overlapping thresholds) is reported as `DOWN`.

use crate::registry::{CategoryRegistry, MotionCategory};
use rayon::prelude::*;
use repcoach_core::constants::VISIBILITY_THRESHOLD;
use repcoach_core::errors::DetectionError;
use repcoach_core::models::{BodySide, ClassificationResult, Frame, Joint, Landmark, Phase};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Phase and signal of a successful classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Detected phase
    pub phase: Phase,
    /// Computed signal value
    pub signal_value: f64,
}

/// Left and right side classification of the same frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilateralClassification {
    /// Classification on the subject's left side
    pub left: ClassificationResult,
    /// Classification on the subject's right side
    pub right: ClassificationResult,
}

/// Per-frame repetition phase classifier bound to a category registry
#[derive(Debug, Clone, Copy)]
pub struct StateClassifier<'a> {
    registry: &'a CategoryRegistry,
    visibility_threshold: f64,
}

impl StateClassifier<'static> {
    /// Classifier over the built-in registry
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(CategoryRegistry::builtin())
    }
}

impl<'a> StateClassifier<'a> {
    /// Create a classifier over `registry` with the default visibility gate
    #[must_use]
    pub const fn new(registry: &'a CategoryRegistry) -> Self {
        Self {
            registry,
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }

    /// Override the minimum landmark visibility
    #[must_use]
    pub fn with_visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Registry this classifier reads from
    #[must_use]
    pub const fn registry(&self) -> &'a CategoryRegistry {
        self.registry
    }

    /// Minimum landmark visibility in effect
    #[must_use]
    pub fn visibility_threshold(&self) -> f64 {
        self.visibility_threshold
    }

    /// Classify one frame using the category's joints as defined
    #[must_use]
    pub fn classify(&self, category_key: &str, frame: &Frame) -> ClassificationResult {
        self.render(category_key, |category| {
            self.evaluate(category, category.joint_refs(), frame)
        })
    }

    /// Classify one frame with the category's joints mapped onto `side`
    #[must_use]
    pub fn classify_side(
        &self,
        category_key: &str,
        frame: &Frame,
        side: BodySide,
    ) -> ClassificationResult {
        self.render(category_key, |category| {
            self.evaluate(category, &category.joints_on(side), frame)
        })
    }

    /// Classify both sides of the body in one frame
    #[must_use]
    pub fn classify_bilateral(&self, category_key: &str, frame: &Frame) -> BilateralClassification {
        BilateralClassification {
            left: self.classify_side(category_key, frame, BodySide::Left),
            right: self.classify_side(category_key, frame, BodySide::Right),
        }
    }

    /// Classify a batch of frames in parallel, preserving input order
    #[must_use]
    pub fn classify_batch(&self, category_key: &str, frames: &[Frame]) -> Vec<ClassificationResult> {
        frames
            .par_iter()
            .map(|frame| self.classify(category_key, frame))
            .collect()
    }

    /// Typed variant of `classify` for callers that branch on the failure
    ///
    /// # Errors
    ///
    /// Returns the detection failure when no phase can be determined
    pub fn try_classify(&self, category_key: &str, frame: &Frame) -> Result<Reading, DetectionError> {
        let category = self.lookup(category_key)?;
        self.evaluate(category, category.joint_refs(), frame)
    }

    fn lookup(&self, category_key: &str) -> Result<&'a MotionCategory, DetectionError> {
        self.registry
            .get(category_key)
            .ok_or_else(|| DetectionError::unknown_category(category_key))
    }

    fn render<F>(&self, category_key: &str, evaluate: F) -> ClassificationResult
    where
        F: FnOnce(&MotionCategory) -> Result<Reading, DetectionError>,
    {
        let outcome = self
            .lookup(category_key)
            .and_then(|category| evaluate(category).map(|reading| (category, reading)));

        match outcome {
            Ok((category, reading)) => {
                debug!(
                    category = category_key,
                    phase = %reading.phase,
                    signal = reading.signal_value,
                    "Frame classified"
                );
                ClassificationResult::classified(
                    reading.phase,
                    reading.signal_value,
                    status_message(category, reading.phase),
                )
            }
            Err(error) => {
                match &error {
                    DetectionError::MissingLandmark { .. } | DetectionError::NonFiniteSignal { .. } => {
                        warn!(category = category_key, error = %error, "Frame classification failed");
                    }
                    DetectionError::UnknownCategory { .. }
                    | DetectionError::LandmarksNotVisible { .. } => {
                        debug!(category = category_key, error = %error, "Frame not classified");
                    }
                }
                ClassificationResult::from_failure(&error)
            }
        }
    }

    fn evaluate(
        &self,
        category: &MotionCategory,
        joints: &[Joint],
        frame: &Frame,
    ) -> Result<Reading, DetectionError> {
        let points = resolve_landmarks(joints, frame)?;

        let hidden: Vec<Joint> = joints
            .iter()
            .zip(&points)
            .filter(|(_, landmark)| !landmark.is_visible(self.visibility_threshold))
            .map(|(joint, _)| *joint)
            .collect();
        if !hidden.is_empty() {
            return Err(DetectionError::not_visible(hidden));
        }

        // atan2 can return a finite angle for infinite inputs
        if let Some((joint, _)) = joints
            .iter()
            .zip(&points)
            .find(|(_, landmark)| !(landmark.x.is_finite() && landmark.y.is_finite()))
        {
            return Err(DetectionError::non_finite(format!(
                "{} has non-finite coordinates",
                joint.name()
            )));
        }

        let signal_value = category
            .signal_kind()
            .compute(&points)
            .ok_or_else(|| {
                DetectionError::non_finite(format!(
                    "{} signal received {} landmarks",
                    category.signal_kind(),
                    points.len()
                ))
            })?;
        if !signal_value.is_finite() {
            return Err(DetectionError::non_finite(format!(
                "{} signal evaluated to {signal_value}",
                category.signal_kind()
            )));
        }

        Ok(Reading {
            phase: phase_for(category, signal_value),
            signal_value,
        })
    }
}

/// Resolve joints against the frame in reference order
fn resolve_landmarks(joints: &[Joint], frame: &Frame) -> Result<Vec<Landmark>, DetectionError> {
    joints
        .iter()
        .map(|joint| {
            frame
                .get(*joint)
                .copied()
                .ok_or(DetectionError::missing_landmark(*joint))
        })
        .collect()
}

/// Start condition wins over end condition
fn phase_for(category: &MotionCategory, signal_value: f64) -> Phase {
    if category.start_condition().holds(signal_value) {
        Phase::Down
    } else if category.end_condition().holds(signal_value) {
        Phase::Up
    } else {
        Phase::Transition
    }
}

fn status_message(category: &MotionCategory, phase: Phase) -> String {
    let name = category.display_name();
    match phase {
        Phase::Down => format!("{name} position reached."),
        Phase::Up => format!("{name} ready/starting position."),
        Phase::Transition | Phase::Unknown => format!("{name} in motion."),
    }
}
