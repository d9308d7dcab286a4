// ABOUTME: Configuration management module for detection and counting parameters
// ABOUTME: Re-exports the environment-driven motion configuration and its error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for repcoach
//!
//! All settings come from environment variables layered over compiled-in
//! defaults. See [`environment::MotionConfig`] for the variable list.

/// Environment-driven motion configuration
pub mod environment;

pub use environment::{ConfigError, CounterSettings, MotionConfig};
