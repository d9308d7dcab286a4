// ABOUTME: Exercise state-detection engine for repetition phase classification
// ABOUTME: Category registry, joint geometry, state classifier, and repetition counter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Repcoach Intelligence
//!
//! Rule-driven classification of exercise repetitions from pose landmarks.
//!
//! - **registry**: immutable table of motion categories (joints, signal kind, thresholds)
//! - **geometry**: joint angle and vertical offset signals
//! - **classifier**: stateless per-frame phase classification
//! - **counter**: per-stream repetition counting on top of the classifier's rules

/// Stateless per-frame repetition phase classifier
pub mod classifier;
/// Per-stream repetition counter with smoothing and glitch gating
pub mod counter;
/// Signal geometry (vertex angle, vertical offset)
pub mod geometry;
/// Motion category definitions and lookup
pub mod registry;

pub use classifier::{BilateralClassification, Reading, StateClassifier};
pub use counter::{CounterConfig, CounterUpdate, RepState, RepetitionCounter, SideReading};
pub use registry::{
    CategoryRegistry, Comparison, MotionCategory, RegistryBuilder, RegistryError, SignalKind,
    ThresholdCondition,
};
