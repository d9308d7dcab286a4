// ABOUTME: Shared test utilities and frame builders for integration tests
// ABOUTME: Provides landmark constructors for angle and vertical-offset poses on either side
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `repcoach`

use repcoach::intelligence::{CounterConfig, MotionCategory, SignalKind, ThresholdCondition};
use repcoach::models::{Frame, Joint, Landmark};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fully visible landmark
pub const fn visible(x: f64, y: f64) -> Landmark {
    Landmark::new(x, y, 0.99)
}

/// Three landmarks whose included angle at the middle point is `degrees`
///
/// The vertex sits at `(cx, 0.5)`, the proximal point straight above it.
pub fn angle_points(cx: f64, degrees: f64) -> [Landmark; 3] {
    let vertex = visible(cx, 0.5);
    let proximal = visible(cx, 0.3);
    let direction = (-90.0_f64 + degrees).to_radians();
    let distal = visible(
        0.2_f64.mul_add(direction.cos(), cx),
        0.2_f64.mul_add(direction.sin(), 0.5),
    );
    [proximal, vertex, distal]
}

/// Frame holding the given joints at an included angle of `degrees`
pub fn angle_frame(joints: [Joint; 3], degrees: f64) -> Frame {
    add_angle(Frame::new(), joints, degrees)
}

/// Add three joints at an included angle of `degrees` to `frame`
pub fn add_angle(frame: Frame, joints: [Joint; 3], degrees: f64) -> Frame {
    let cx = if joints[1].name().starts_with("RIGHT") {
        0.35
    } else {
        0.65
    };
    let points = angle_points(cx, degrees);
    joints
        .into_iter()
        .zip(points)
        .fold(frame, |frame, (joint, landmark)| frame.with_joint(joint, landmark))
}

/// Left elbow at `degrees`
pub fn elbow_frame(degrees: f64) -> Frame {
    angle_frame(LEFT_ARM, degrees)
}

/// Left and right elbow at independent angles
pub fn bilateral_elbow_frame(left_degrees: f64, right_degrees: f64) -> Frame {
    add_angle(elbow_frame(left_degrees), RIGHT_ARM, right_degrees)
}

/// Left shoulder and wrist at the given heights
pub fn shoulder_frame(shoulder_y: f64, wrist_y: f64) -> Frame {
    Frame::new()
        .with_joint(Joint::LeftShoulder, visible(0.6, shoulder_y))
        .with_joint(Joint::LeftWrist, visible(0.6, wrist_y))
}

/// Left shoulder, elbow, wrist
pub const LEFT_ARM: [Joint; 3] = [Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist];

/// Right shoulder, elbow, wrist
pub const RIGHT_ARM: [Joint; 3] = [Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist];

/// A complete 33-landmark frame with every joint visible
pub fn full_frame() -> Frame {
    Joint::ALL
        .iter()
        .enumerate()
        .map(|(index, joint)| (*joint, visible(0.5, index as f64 / 40.0)))
        .collect()
}

/// Category whose start and end conditions overlap between 60 and 100 degrees
pub fn overlapping_category() -> MotionCategory {
    MotionCategory::new(
        "overlap",
        "Overlap",
        SignalKind::Angle,
        LEFT_ARM.to_vec(),
        ThresholdCondition::less_than(100.0),
        ThresholdCondition::greater_than(60.0),
    )
    .unwrap()
}

/// Counter tuning without warm-up or smoothing, for exact step-by-step tests
pub fn immediate_counter_config() -> CounterConfig {
    CounterConfig {
        smoothing_window: 1,
        startup_delay: Duration::ZERO,
        ..CounterConfig::default()
    }
}

/// Milliseconds as a `Duration`
pub const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
