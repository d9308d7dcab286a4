// ABOUTME: Core data models for pose frames and classification output
// ABOUTME: Re-exports landmark vocabulary, frame container, phases, and results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Phase labels and the per-frame classification result
pub mod classification;
/// Joint vocabulary, landmarks, and per-frame landmark container
pub mod landmark;

pub use classification::{ClassificationResult, Phase};
pub use landmark::{BodySide, Frame, Joint, Landmark};
