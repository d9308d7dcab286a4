// ABOUTME: Motion category definition: joints, signal kind, and start/end threshold conditions
// ABOUTME: Enforces that joint count matches the signal kind's arity at construction time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::RegistryError;
use crate::geometry::{angle_at_vertex, vertical_offset};
use repcoach_core::models::{BodySide, Joint, Landmark};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the scalar signal is derived from a category's joints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Included angle at the middle joint of (proximal, vertex, distal), in degrees
    Angle,
    /// `first.y - second.y` in normalized image coordinates
    VerticalOffset,
}

impl SignalKind {
    /// Number of joints the signal is computed from
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Angle => 3,
            Self::VerticalOffset => 2,
        }
    }

    /// Compute the signal from landmarks given in joint-reference order.
    ///
    /// Returns `None` when the landmark count does not match the arity.
    #[must_use]
    pub fn compute(self, points: &[Landmark]) -> Option<f64> {
        match (self, points) {
            (Self::Angle, [proximal, vertex, distal]) => {
                Some(angle_at_vertex(proximal, vertex, distal))
            }
            (Self::VerticalOffset, [anchor, tracked]) => Some(vertical_offset(anchor, tracked)),
            _ => None,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Angle => f.write_str("angle"),
            Self::VerticalOffset => f.write_str("vertical_offset"),
        }
    }
}

/// Strict comparison operator of a threshold condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// `signal < threshold`
    #[serde(rename = "<")]
    LessThan,
    /// `signal > threshold`
    #[serde(rename = ">")]
    GreaterThan,
}

impl Comparison {
    /// Operator symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One threshold condition: `signal <op> value`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCondition {
    /// Comparison operator
    pub operator: Comparison,
    /// Threshold the signal is compared against
    #[serde(rename = "value")]
    pub threshold: f64,
}

impl ThresholdCondition {
    /// `signal < threshold`
    #[must_use]
    pub const fn less_than(threshold: f64) -> Self {
        Self {
            operator: Comparison::LessThan,
            threshold,
        }
    }

    /// `signal > threshold`
    #[must_use]
    pub const fn greater_than(threshold: f64) -> Self {
        Self {
            operator: Comparison::GreaterThan,
            threshold,
        }
    }

    /// Whether `signal` satisfies this condition
    #[must_use]
    pub fn holds(&self, signal: f64) -> bool {
        match self.operator {
            Comparison::LessThan => signal < self.threshold,
            Comparison::GreaterThan => signal > self.threshold,
        }
    }
}

impl fmt::Display for ThresholdCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.threshold)
    }
}

/// A named exercise-motion pattern.
///
/// Fields are private: a category is validated once at construction and is
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionCategory {
    key: String,
    display_name: String,
    signal_kind: SignalKind,
    joint_refs: Vec<Joint>,
    start_condition: ThresholdCondition,
    end_condition: ThresholdCondition,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    muscle_groups: Vec<String>,
}

impl MotionCategory {
    /// Create a category, validating joint arity against the signal kind
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or `joint_refs` does not hold
    /// exactly `signal_kind.arity()` joints
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        signal_kind: SignalKind,
        joint_refs: Vec<Joint>,
        start_condition: ThresholdCondition,
        end_condition: ThresholdCondition,
    ) -> Result<Self, RegistryError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        if joint_refs.len() != signal_kind.arity() {
            return Err(RegistryError::ArityMismatch {
                key,
                kind: signal_kind,
                expected: signal_kind.arity(),
                actual: joint_refs.len(),
            });
        }
        if !start_condition.threshold.is_finite() || !end_condition.threshold.is_finite() {
            return Err(RegistryError::InvalidThreshold { key });
        }

        Ok(Self {
            key,
            display_name: display_name.into(),
            signal_kind,
            joint_refs,
            start_condition,
            end_condition,
            muscle_groups: Vec::new(),
        })
    }

    /// Angle category over (proximal, vertex, distal) for trusted built-in values
    pub(crate) fn angle(
        key: &str,
        display_name: &str,
        joints: [Joint; 3],
        start_condition: ThresholdCondition,
        end_condition: ThresholdCondition,
    ) -> Self {
        Self {
            key: key.to_owned(),
            display_name: display_name.to_owned(),
            signal_kind: SignalKind::Angle,
            joint_refs: joints.to_vec(),
            start_condition,
            end_condition,
            muscle_groups: Vec::new(),
        }
    }

    /// Vertical-offset category over (anchor, tracked) for trusted built-in values
    pub(crate) fn vertical_offset(
        key: &str,
        display_name: &str,
        joints: [Joint; 2],
        start_condition: ThresholdCondition,
        end_condition: ThresholdCondition,
    ) -> Self {
        Self {
            key: key.to_owned(),
            display_name: display_name.to_owned(),
            signal_kind: SignalKind::VerticalOffset,
            joint_refs: joints.to_vec(),
            start_condition,
            end_condition,
            muscle_groups: Vec::new(),
        }
    }

    /// Attach muscle-group labels (caller-side metadata)
    #[must_use]
    pub fn with_muscle_groups(mut self, muscle_groups: Vec<String>) -> Self {
        self.muscle_groups = muscle_groups;
        self
    }

    /// Unique registry key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human label used in status messages
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Signal kind
    #[must_use]
    pub const fn signal_kind(&self) -> SignalKind {
        self.signal_kind
    }

    /// Joint references in signal order
    #[must_use]
    pub fn joint_refs(&self) -> &[Joint] {
        &self.joint_refs
    }

    /// Joint references mapped onto one side of the body
    #[must_use]
    pub fn joints_on(&self, side: BodySide) -> Vec<Joint> {
        self.joint_refs
            .iter()
            .map(|joint| joint.on_side(side))
            .collect()
    }

    /// Condition marking the contracted/deep position
    #[must_use]
    pub const fn start_condition(&self) -> ThresholdCondition {
        self.start_condition
    }

    /// Condition marking the extended/ready position
    #[must_use]
    pub const fn end_condition(&self) -> ThresholdCondition {
        self.end_condition
    }

    /// Muscle-group labels, empty for built-in categories
    #[must_use]
    pub fn muscle_groups(&self) -> &[String] {
        &self.muscle_groups
    }
}
