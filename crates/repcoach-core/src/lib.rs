// ABOUTME: Core types and constants for the repcoach exercise state-detection engine
// ABOUTME: Foundation crate with error handling, landmark models, and tuning constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Repcoach Core
//!
//! Foundation crate providing shared types and constants for the repcoach
//! exercise state-detection engine. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DetectionError`
//! - **constants**: Detection tuning values and built-in category keys
//! - **models**: Pose landmarks, frames, phases, and classification results

/// Unified error handling system with standard error codes
pub mod errors;

/// Detection constants organized by concern
pub mod constants;

/// Core data models (`Joint`, `Frame`, `Phase`, `ClassificationResult`)
pub mod models;
