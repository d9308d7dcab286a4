// ABOUTME: Integration tests for the per-stream repetition counter
// ABOUTME: Covers cycle counting, warm-up, debounce, velocity gating, smoothing, and reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    bilateral_elbow_frame, elbow_frame, immediate_counter_config, init_test_logging, ms,
    shoulder_frame,
};
use repcoach::intelligence::{
    CategoryRegistry, CounterConfig, CounterUpdate, RepState, RepetitionCounter,
};
use repcoach::models::{BodySide, Frame};
use std::time::Duration;

fn elbow_counter(config: CounterConfig) -> RepetitionCounter {
    init_test_logging();
    let category = CategoryRegistry::builtin().get("elbow_dominant").unwrap();
    RepetitionCounter::new(category, config)
}

/// Feed `angles` one second apart starting at `start_ms`
fn feed(counter: &mut RepetitionCounter, start_ms: u64, angles: &[f64]) -> Vec<CounterUpdate> {
    angles
        .iter()
        .zip(0_u64..)
        .filter_map(|(angle, i)| counter.observe(&elbow_frame(*angle), ms(start_ms + i * 1_000)))
        .collect()
}

#[test]
fn test_counts_one_repetition_per_cycle() {
    let mut counter = elbow_counter(immediate_counter_config());
    let updates = feed(&mut counter, 0, &[45.0, 170.0, 45.0, 170.0, 45.0, 170.0]);

    assert_eq!(counter.count(), 3);
    let completed: Vec<bool> = updates.iter().map(|u| u.repetition_completed).collect();
    assert_eq!(completed, vec![false, true, false, true, false, true]);
}

#[test]
fn test_transition_frames_do_not_count() {
    let mut counter = elbow_counter(immediate_counter_config());
    feed(&mut counter, 0, &[45.0, 90.0, 100.0, 120.0, 130.0, 90.0, 45.0]);
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_first_extension_after_warmup_counts() {
    // Sides start in the Start state, so the first end-condition frame completes a repetition
    let mut counter = elbow_counter(immediate_counter_config());
    let update = counter.observe(&elbow_frame(170.0), ms(0)).unwrap();
    assert!(update.repetition_completed);
    assert_eq!(update.count, 1);
}

#[test]
fn test_warmup_ignores_early_frames() {
    let config = CounterConfig {
        startup_delay: ms(3_000),
        ..immediate_counter_config()
    };
    let mut counter = elbow_counter(config);

    assert!(counter.observe(&elbow_frame(45.0), ms(500)).is_none());
    assert!(counter.observe(&elbow_frame(170.0), ms(1_500)).is_none());
    assert!(counter.observe(&elbow_frame(45.0), ms(3_499)).is_none());
    assert_eq!(counter.count(), 0);

    // Warm-up is anchored at the first observed frame (500 ms)
    let update = counter.observe(&elbow_frame(45.0), ms(3_500)).unwrap();
    assert_eq!(update.count, 0);
    let update = counter.observe(&elbow_frame(170.0), ms(4_500)).unwrap();
    assert_eq!(update.count, 1);
}

#[test]
fn test_cooldown_drops_rapid_repetitions() {
    let config = CounterConfig {
        max_angle_velocity: 1.0e9,
        ..immediate_counter_config()
    };
    let mut counter = elbow_counter(config);

    counter.observe(&elbow_frame(45.0), ms(0));
    assert!(counter.observe(&elbow_frame(170.0), ms(100)).unwrap().repetition_completed);
    counter.observe(&elbow_frame(45.0), ms(200));
    let rapid = counter.observe(&elbow_frame(170.0), ms(300)).unwrap();
    assert!(!rapid.repetition_completed);
    assert_eq!(rapid.count, 1);

    counter.observe(&elbow_frame(45.0), ms(1_000));
    let later = counter.observe(&elbow_frame(170.0), ms(1_100)).unwrap();
    assert!(later.repetition_completed);
    assert_eq!(counter.count(), 2);
}

#[test]
fn test_both_sides_together_count_once() {
    let mut counter = elbow_counter(immediate_counter_config());
    counter.observe(&bilateral_elbow_frame(45.0, 45.0), ms(0));
    let update = counter
        .observe(&bilateral_elbow_frame(170.0, 170.0), ms(1_000))
        .unwrap();

    assert!(update.repetition_completed);
    assert_eq!(update.count, 1);
    assert_eq!(update.left.unwrap().state, RepState::End);
    assert_eq!(update.right.unwrap().state, RepState::End);
    assert!((update.value - 170.0).abs() < 1e-6);
}

#[test]
fn test_sides_are_tracked_independently() {
    let mut counter = elbow_counter(immediate_counter_config());
    counter.observe(&bilateral_elbow_frame(45.0, 100.0), ms(0));
    let update = counter
        .observe(&bilateral_elbow_frame(100.0, 45.0), ms(1_000))
        .unwrap();

    let left = update.left.unwrap();
    let right = update.right.unwrap();
    assert_eq!(left.side, BodySide::Left);
    assert_eq!(right.side, BodySide::Right);
    assert_eq!(left.state, RepState::Start);
    assert_eq!(right.state, RepState::Start);
    assert!((update.value - 72.5).abs() < 1e-6);
}

#[test]
fn test_velocity_gate_rejects_tracking_glitch() {
    let mut counter = elbow_counter(immediate_counter_config());

    counter.observe(&elbow_frame(45.0), ms(0));
    // 125 degrees in 100 ms is far beyond 500 degrees per second
    let glitch = counter.observe(&elbow_frame(170.0), ms(100)).unwrap();
    let left = glitch.left.unwrap();
    assert!(!left.accepted);
    assert_eq!(left.state, RepState::Start);
    assert_eq!(glitch.count, 0);

    // Once the window has moved past the jump the sample is plausible again
    let settled = counter.observe(&elbow_frame(170.0), ms(1_100)).unwrap();
    assert!(settled.left.unwrap().accepted);
    assert_eq!(settled.count, 1);
}

#[test]
fn test_velocity_not_evaluated_over_short_span() {
    let mut counter = elbow_counter(immediate_counter_config());
    counter.observe(&elbow_frame(45.0), ms(0));
    let update = counter.observe(&elbow_frame(170.0), ms(30)).unwrap();
    assert!(update.left.unwrap().accepted);
}

#[test]
fn test_smoothing_delays_transition() {
    let config = CounterConfig {
        startup_delay: Duration::ZERO,
        ..CounterConfig::default()
    };
    let mut counter = elbow_counter(config);
    let updates = feed(
        &mut counter,
        0,
        &[45.0, 45.0, 45.0, 45.0, 45.0, 170.0, 170.0, 170.0, 170.0],
    );

    let smoothed: Vec<f64> = updates[5..]
        .iter()
        .map(|u| u.left.unwrap().value)
        .collect();
    let expected = [70.0, 95.0, 120.0, 145.0];
    for (value, want) in smoothed.iter().zip(expected) {
        assert!((value - want).abs() < 1e-6, "{value} != {want}");
    }

    let completed: Vec<usize> = updates
        .iter()
        .enumerate()
        .filter(|(_, u)| u.repetition_completed)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(completed, vec![8]);
}

#[test]
fn test_hidden_side_is_skipped() {
    let mut counter = elbow_counter(immediate_counter_config());
    let update = counter.observe(&elbow_frame(45.0), ms(0)).unwrap();
    assert!(update.left.is_some());
    assert!(update.right.is_none());

    let empty = counter.observe(&Frame::new(), ms(1_000)).unwrap();
    assert!(empty.left.is_none());
    assert!(empty.right.is_none());
    assert!(empty.value.abs() < f64::EPSILON);
    assert!(!empty.repetition_completed);
}

#[test]
fn test_vertical_offset_category_counts() {
    init_test_logging();
    let category = CategoryRegistry::builtin().get("shoulder_dominant").unwrap();
    let mut counter = RepetitionCounter::new(category, immediate_counter_config());

    counter.observe(&shoulder_frame(0.30, 0.55), ms(0));
    let update = counter.observe(&shoulder_frame(0.30, 0.25), ms(1_000)).unwrap();
    assert!(update.repetition_completed);
    assert_eq!(counter.category().key(), "shoulder_dominant");
}

#[test]
fn test_reset_restarts_count_and_warmup() {
    let config = CounterConfig {
        startup_delay: ms(2_000),
        ..immediate_counter_config()
    };
    let mut counter = elbow_counter(config);
    feed(&mut counter, 0, &[45.0, 45.0, 45.0, 170.0]);
    assert_eq!(counter.count(), 1);

    counter.reset();
    assert_eq!(counter.count(), 0);
    assert!(counter.observe(&elbow_frame(45.0), ms(10_000)).is_none());
    assert!(counter.observe(&elbow_frame(170.0), ms(11_000)).is_none());
    assert!(counter.observe(&elbow_frame(45.0), ms(12_000)).is_some());
}
