// ABOUTME: Environment-based configuration for classification and repetition counting
// ABOUTME: Layers REPCOACH_* variables over compiled defaults and validates the result
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Motion configuration
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export REPCOACH_CATEGORIES_PATH=/etc/repcoach/categories.json
//!    export REPCOACH_VISIBILITY_THRESHOLD=0.6
//!    export REPCOACH_REP_COOLDOWN_MS=800
//!    ```
//!
//! 2. Default values (if env vars not set)

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::intelligence::{CategoryRegistry, CounterConfig};
use repcoach_core::constants::{counter, VISIBILITY_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Window or count setting below its minimum
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric setting outside its allowed interval
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match &error {
            ConfigError::ValueOutOfRange(_) => ErrorCode::ValueOutOfRange,
            ConfigError::InvalidRange(_) | ConfigError::Parse(_) => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Repetition counter tuning, in plain units suitable for env vars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSettings {
    /// Moving-average length
    pub smoothing_window: usize,
    /// Maximum samples in the velocity window
    pub velocity_window_samples: usize,
    /// Velocity window span in milliseconds
    pub velocity_window_ms: u64,
    /// Angle velocity limit in degrees per second
    pub max_angle_velocity: f64,
    /// Vertical offset velocity limit in units per second
    pub max_offset_velocity: f64,
    /// Minimum milliseconds between counted repetitions
    pub rep_cooldown_ms: u64,
    /// Warm-up period at the start of a stream in milliseconds
    pub startup_delay_ms: u64,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            smoothing_window: counter::SMOOTHING_WINDOW,
            velocity_window_samples: counter::VELOCITY_WINDOW_SAMPLES,
            velocity_window_ms: counter::VELOCITY_WINDOW_MS,
            max_angle_velocity: counter::MAX_ANGLE_VELOCITY,
            max_offset_velocity: counter::MAX_OFFSET_VELOCITY,
            rep_cooldown_ms: counter::REP_COOLDOWN_MS,
            startup_delay_ms: counter::STARTUP_DELAY_MS,
        }
    }
}

/// Detection and counting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Category file replacing the built-in table, if any
    pub categories_path: Option<PathBuf>,
    /// Minimum landmark visibility for a joint to count as visible
    pub visibility_threshold: f64,
    /// Repetition counter tuning
    pub counter: CounterSettings,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            categories_path: None,
            visibility_threshold: VISIBILITY_THRESHOLD,
            counter: CounterSettings::default(),
        }
    }
}

impl MotionConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result is out of range
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "visibility_threshold must be between 0.0 and 1.0",
            ));
        }
        if self.counter.smoothing_window == 0 {
            return Err(ConfigError::InvalidRange("smoothing_window must be >= 1"));
        }
        if self.counter.velocity_window_samples == 0 {
            return Err(ConfigError::InvalidRange(
                "velocity_window_samples must be >= 1",
            ));
        }
        if self.counter.velocity_window_ms == 0 {
            return Err(ConfigError::InvalidRange("velocity_window_ms must be >= 1"));
        }
        if !(self.counter.max_angle_velocity > 0.0 && self.counter.max_angle_velocity.is_finite())
        {
            return Err(ConfigError::ValueOutOfRange(
                "max_angle_velocity must be a positive number",
            ));
        }
        if !(self.counter.max_offset_velocity > 0.0
            && self.counter.max_offset_velocity.is_finite())
        {
            return Err(ConfigError::ValueOutOfRange(
                "max_offset_velocity must be a positive number",
            ));
        }
        Ok(())
    }

    /// Counter configuration derived from these settings
    #[must_use]
    pub fn counter_config(&self) -> CounterConfig {
        CounterConfig {
            smoothing_window: self.counter.smoothing_window,
            velocity_window_samples: self.counter.velocity_window_samples,
            velocity_window: Duration::from_millis(self.counter.velocity_window_ms),
            max_angle_velocity: self.counter.max_angle_velocity,
            max_offset_velocity: self.counter.max_offset_velocity,
            rep_cooldown: Duration::from_millis(self.counter.rep_cooldown_ms),
            startup_delay: Duration::from_millis(self.counter.startup_delay_ms),
            visibility_threshold: self.visibility_threshold,
            ..CounterConfig::default()
        }
    }

    /// Build the category registry this configuration points at
    ///
    /// # Errors
    ///
    /// Returns an error if the configured category file cannot be loaded
    pub fn load_registry(&self) -> AppResult<CategoryRegistry> {
        match &self.categories_path {
            Some(path) => Ok(CategoryRegistry::from_path(path)?),
            None => Ok(CategoryRegistry::with_builtin()),
        }
    }

    /// One-line summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "categories={}, visibility>={}, smoothing={}, cooldown={}ms, warmup={}ms",
            self.categories_path
                .as_ref()
                .map_or_else(|| "builtin".to_owned(), |p| p.display().to_string()),
            self.visibility_threshold,
            self.counter.smoothing_window,
            self.counter.rep_cooldown_ms,
            self.counter.startup_delay_ms,
        )
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(val) = env::var("REPCOACH_CATEGORIES_PATH") {
            if !val.trim().is_empty() {
                self.categories_path = Some(PathBuf::from(val));
            }
        }

        apply_env_var("REPCOACH_VISIBILITY_THRESHOLD", &mut self.visibility_threshold)?;
        apply_env_var("REPCOACH_SMOOTHING_WINDOW", &mut self.counter.smoothing_window)?;
        apply_env_var(
            "REPCOACH_VELOCITY_WINDOW_SAMPLES",
            &mut self.counter.velocity_window_samples,
        )?;
        apply_env_var(
            "REPCOACH_VELOCITY_WINDOW_MS",
            &mut self.counter.velocity_window_ms,
        )?;
        apply_env_var(
            "REPCOACH_MAX_ANGLE_VELOCITY",
            &mut self.counter.max_angle_velocity,
        )?;
        apply_env_var(
            "REPCOACH_MAX_OFFSET_VELOCITY",
            &mut self.counter.max_offset_velocity,
        )?;
        apply_env_var("REPCOACH_REP_COOLDOWN_MS", &mut self.counter.rep_cooldown_ms)?;
        apply_env_var("REPCOACH_STARTUP_DELAY_MS", &mut self.counter.startup_delay_ms)?;

        info!("Motion configuration loaded: {}", self.summary());
        Ok(self)
    }
}

/// Overwrite `target` with the parsed value of `key` when the variable is set
fn apply_env_var<T: FromStr>(key: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(val) = env::var(key) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {key}: '{val}'")))?;
    }
    Ok(())
}
