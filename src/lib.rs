// ABOUTME: Main library entry point for the repcoach exercise state-detection engine
// ABOUTME: Ties together registry, classifier, counter, sequence analysis, and live sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Repcoach
//!
//! Classifies each video frame of a person exercising into a repetition phase
//! (`DOWN`, `UP`, `TRANSITION`) from 2-D pose landmarks, and counts
//! repetitions over a stream of frames.
//!
//! ## Architecture
//!
//! - **models / errors / constants**: shared types from `repcoach-core`
//! - **intelligence**: registry, geometry, classifier, counter from `repcoach-intelligence`
//! - **config**: environment-driven tuning
//! - **analysis**: offline analysis of a recorded frame sequence
//! - **sessions**: concurrent table of live streams, one counter each
//! - **logging**: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```rust
//! use repcoach::intelligence::StateClassifier;
//! use repcoach::models::{Frame, Joint, Landmark, Phase};
//!
//! let frame: Frame = [
//!     (Joint::LeftShoulder, Landmark::new(0.5, 0.2, 0.99)),
//!     (Joint::LeftElbow, Landmark::new(0.5, 0.4, 0.99)),
//!     (Joint::LeftWrist, Landmark::new(0.5, 0.6, 0.99)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let result = StateClassifier::builtin().classify("elbow_dominant", &frame);
//! assert_eq!(result.phase, Some(Phase::Up));
//! ```

/// Shared error types re-exported from `repcoach-core`
pub use repcoach_core::errors;

/// Detection constants re-exported from `repcoach-core`
pub use repcoach_core::constants;

/// Landmark and classification models re-exported from `repcoach-core`
pub use repcoach_core::models;

/// Registry, classifier, and counter re-exported from `repcoach-intelligence`
pub mod intelligence {
    pub use repcoach_intelligence::*;
}

/// Offline analysis of recorded frame sequences
pub mod analysis;

/// Environment-driven configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Concurrent table of live counting sessions
pub mod sessions;
