// ABOUTME: Per-stream repetition counter built on the motion category threshold rules
// ABOUTME: Tracks both body sides with smoothing, velocity glitch gating, debounce, and warm-up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repetition Counter
//!
//! Turns a stream of frames into a repetition count. Unlike the classifier this
//! type is stateful: one instance belongs to exactly one stream and must see
//! that stream's frames in submission order.
//!
//! Each side of the body runs a two-state machine (`Start` ↔ `End`). A
//! repetition is attempted on every `Start → End` edge; attempts inside the
//! cooldown window are dropped so that both sides moving together count once.
//! Timestamps are supplied by the caller, which keeps counting deterministic
//! for recorded video.

use crate::registry::{MotionCategory, SignalKind};
use repcoach_core::constants::{counter, VISIBILITY_THRESHOLD};
use repcoach_core::models::{BodySide, Frame, Landmark};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{info, warn};

/// Tuning values for the repetition counter
#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    /// Moving-average length applied to each side's signal
    pub smoothing_window: usize,
    /// Maximum samples kept for velocity estimation
    pub velocity_window_samples: usize,
    /// Time span of the velocity window
    pub velocity_window: Duration,
    /// Minimum window span before velocity is evaluated
    pub min_velocity_span: Duration,
    /// Velocity limit for angle signals (degrees per second)
    pub max_angle_velocity: f64,
    /// Velocity limit for vertical-offset signals (units per second)
    pub max_offset_velocity: f64,
    /// Minimum time between counted repetitions
    pub rep_cooldown: Duration,
    /// Initial period of a stream during which frames are ignored
    pub startup_delay: Duration,
    /// Minimum landmark visibility for a side to be evaluated
    pub visibility_threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            smoothing_window: counter::SMOOTHING_WINDOW,
            velocity_window_samples: counter::VELOCITY_WINDOW_SAMPLES,
            velocity_window: Duration::from_millis(counter::VELOCITY_WINDOW_MS),
            min_velocity_span: Duration::from_millis(counter::MIN_VELOCITY_SPAN_MS),
            max_angle_velocity: counter::MAX_ANGLE_VELOCITY,
            max_offset_velocity: counter::MAX_OFFSET_VELOCITY,
            rep_cooldown: Duration::from_millis(counter::REP_COOLDOWN_MS),
            startup_delay: Duration::from_millis(counter::STARTUP_DELAY_MS),
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }
}

impl CounterConfig {
    /// Velocity limit for a signal kind
    #[must_use]
    pub const fn max_velocity(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Angle => self.max_angle_velocity,
            SignalKind::VerticalOffset => self.max_offset_velocity,
        }
    }
}

/// Per-side repetition state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepState {
    /// Waiting for the end condition
    Start,
    /// End condition reached, waiting for the start condition
    End,
}

/// One side's contribution to a counter update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideReading {
    /// Which side
    pub side: BodySide,
    /// Smoothed signal value
    pub value: f64,
    /// State after this frame
    pub state: RepState,
    /// False when the velocity gate rejected the sample
    pub accepted: bool,
}

/// Result of feeding one frame to the counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterUpdate {
    /// Total repetitions so far
    pub count: u32,
    /// Whether this frame completed a repetition
    pub repetition_completed: bool,
    /// Left side reading, `None` when its joints were not usable
    pub left: Option<SideReading>,
    /// Right side reading, `None` when its joints were not usable
    pub right: Option<SideReading>,
    /// Mean of the available smoothed side values, 0 when none
    pub value: f64,
}

#[derive(Debug, Clone)]
struct SideTracker {
    side: BodySide,
    state: RepState,
    history: VecDeque<f64>,
    window: VecDeque<(Duration, f64)>,
}

impl SideTracker {
    fn new(side: BodySide) -> Self {
        Self {
            side,
            state: RepState::Start,
            history: VecDeque::new(),
            window: VecDeque::new(),
        }
    }

    fn smooth(&mut self, value: f64, window: usize) -> f64 {
        self.history.push_back(value);
        while self.history.len() > window.max(1) {
            self.history.pop_front();
        }
        self.history.iter().sum::<f64>() / self.history.len() as f64
    }

    /// Record a sample and report whether its velocity is plausible
    fn velocity_ok(
        &mut self,
        timestamp: Duration,
        value: f64,
        config: &CounterConfig,
        max_velocity: f64,
    ) -> bool {
        self.window.push_back((timestamp, value));
        while self.window.len() > config.velocity_window_samples.max(1) {
            self.window.pop_front();
        }
        while self.window.len() > 1
            && self
                .window
                .front()
                .is_some_and(|(t, _)| timestamp.saturating_sub(*t) > config.velocity_window)
        {
            self.window.pop_front();
        }

        let (Some(&(first_t, first_v)), Some(&(last_t, last_v))) =
            (self.window.front(), self.window.back())
        else {
            return true;
        };
        if self.window.len() < 2 {
            return true;
        }

        let span = last_t.saturating_sub(first_t);
        if span < config.min_velocity_span {
            return true;
        }

        (last_v - first_v).abs() / span.as_secs_f64() <= max_velocity
    }

    fn reset(&mut self) {
        self.state = RepState::Start;
        self.history.clear();
        self.window.clear();
    }
}

/// Stateful repetition counter for one stream
#[derive(Debug, Clone)]
pub struct RepetitionCounter {
    category: MotionCategory,
    config: CounterConfig,
    count: u32,
    origin: Option<Duration>,
    last_count_at: Option<Duration>,
    left: SideTracker,
    right: SideTracker,
}

impl RepetitionCounter {
    /// Create a counter for `category`
    #[must_use]
    pub fn new(category: &MotionCategory, config: CounterConfig) -> Self {
        Self {
            category: category.clone(),
            config,
            count: 0,
            origin: None,
            last_count_at: None,
            left: SideTracker::new(BodySide::Left),
            right: SideTracker::new(BodySide::Right),
        }
    }

    /// Category this counter tracks
    #[must_use]
    pub const fn category(&self) -> &MotionCategory {
        &self.category
    }

    /// Repetitions counted so far
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Feed one frame observed `timestamp` after the stream started.
    ///
    /// The first frame after construction or `reset` anchors the warm-up
    /// period; returns `None` while warming up.
    pub fn observe(&mut self, frame: &Frame, timestamp: Duration) -> Option<CounterUpdate> {
        let origin = *self.origin.get_or_insert(timestamp);
        if timestamp.saturating_sub(origin) < self.config.startup_delay {
            return None;
        }

        let (left, left_completed) =
            Self::observe_side(&mut self.left, &self.category, &self.config, frame, timestamp);
        let (right, right_completed) =
            Self::observe_side(&mut self.right, &self.category, &self.config, frame, timestamp);

        let repetition_completed =
            (left_completed || right_completed) && self.try_increment(timestamp);

        let values: Vec<f64> = [left, right].iter().flatten().map(|r| r.value).collect();
        let value = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };

        Some(CounterUpdate {
            count: self.count,
            repetition_completed,
            left,
            right,
            value,
        })
    }

    /// Clear the count and all per-side history; warm-up restarts on the next frame
    pub fn reset(&mut self) {
        self.count = 0;
        self.origin = None;
        self.last_count_at = None;
        self.left.reset();
        self.right.reset();
    }

    fn observe_side(
        tracker: &mut SideTracker,
        category: &MotionCategory,
        config: &CounterConfig,
        frame: &Frame,
        timestamp: Duration,
    ) -> (Option<SideReading>, bool) {
        let points: Option<Vec<Landmark>> = category
            .joints_on(tracker.side)
            .into_iter()
            .map(|joint| {
                frame
                    .get(joint)
                    .filter(|landmark| landmark.is_visible(config.visibility_threshold))
                    .copied()
            })
            .collect();
        let Some(raw) = points
            .and_then(|points| category.signal_kind().compute(&points))
            .filter(|value| value.is_finite())
        else {
            return (None, false);
        };

        let value = tracker.smooth(raw, config.smoothing_window);
        let accepted = tracker.velocity_ok(
            timestamp,
            value,
            config,
            config.max_velocity(category.signal_kind()),
        );

        let mut completed = false;
        if accepted {
            if category.start_condition().holds(value) && tracker.state == RepState::End {
                tracker.state = RepState::Start;
            } else if category.end_condition().holds(value) && tracker.state == RepState::Start {
                tracker.state = RepState::End;
                completed = true;
            }
        } else {
            warn!(
                side = %tracker.side,
                value,
                "Sample rejected by velocity gate"
            );
        }

        (
            Some(SideReading {
                side: tracker.side,
                value,
                state: tracker.state,
                accepted,
            }),
            completed,
        )
    }

    fn try_increment(&mut self, timestamp: Duration) -> bool {
        let cooled_down = match self.last_count_at {
            Some(last) => timestamp.saturating_sub(last) >= self.config.rep_cooldown,
            None => true,
        };
        if cooled_down {
            self.count += 1;
            self.last_count_at = Some(timestamp);
            info!(
                category = self.category.key(),
                count = self.count,
                "Repetition counted"
            );
        }
        cooled_down
    }
}
