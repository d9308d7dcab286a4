// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Detection tuning values and built-in motion category identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by concern: the visibility gate used by the
//! classifier, the repetition-counter tuning defaults, and the keys of the
//! built-in motion categories.

/// Repetition counter tuning defaults
pub mod counter;

/// Minimum landmark visibility for a joint to take part in classification
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Number of landmarks emitted per frame by the 33-point pose model
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Built-in motion category keys
pub mod categories {
    /// Curls, triceps extensions, push-ups (elbow angle)
    pub const ELBOW_DOMINANT: &str = "elbow_dominant";
    /// Presses and raises (wrist height relative to shoulder)
    pub const SHOULDER_DOMINANT: &str = "shoulder_dominant";
    /// Squats and lunges (knee angle)
    pub const KNEE_DOMINANT: &str = "knee_dominant";
    /// Hinges and deadlifts (hip angle)
    pub const HIP_DOMINANT: &str = "hip_dominant";
    /// Crunches and sit-ups (trunk-to-thigh angle)
    pub const CORE_DOMINANT: &str = "core_dominant";

    /// All built-in keys in definition order
    pub const ALL: [&str; 5] = [
        ELBOW_DOMINANT,
        SHOULDER_DOMINANT,
        KNEE_DOMINANT,
        HIP_DOMINANT,
        CORE_DOMINANT,
    ];
}
