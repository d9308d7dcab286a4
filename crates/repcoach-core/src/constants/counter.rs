// ABOUTME: Repetition counter constants for smoothing, velocity gating, and debounce
// ABOUTME: Defaults tuned for 30 fps webcam streams with normalized landmark coordinates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Moving-average window length for per-side signal smoothing
pub const SMOOTHING_WINDOW: usize = 5;

/// Maximum samples kept in the velocity window
pub const VELOCITY_WINDOW_SAMPLES: usize = 10;

/// Velocity window time span in milliseconds
pub const VELOCITY_WINDOW_MS: u64 = 400;

/// Minimum window span before velocity is evaluated, in milliseconds
pub const MIN_VELOCITY_SPAN_MS: u64 = 50;

/// Maximum plausible angular velocity (degrees per second)
pub const MAX_ANGLE_VELOCITY: f64 = 500.0;

/// Maximum plausible vertical-offset velocity (normalized units per second)
pub const MAX_OFFSET_VELOCITY: f64 = 5.0;

/// Minimum time between two counted repetitions, in milliseconds
pub const REP_COOLDOWN_MS: u64 = 1_000;

/// Frames inside this initial period of a stream are ignored, in milliseconds
pub const STARTUP_DELAY_MS: u64 = 3_000;

/// Default frame rate used to derive timestamps for recorded sequences
pub const DEFAULT_FPS: f64 = 30.0;
