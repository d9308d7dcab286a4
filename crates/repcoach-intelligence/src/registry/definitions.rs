// ABOUTME: Built-in motion category table with tuned joint sets and thresholds
// ABOUTME: Elbow, shoulder, knee, hip, and core dominant movement patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::category::{MotionCategory, ThresholdCondition};
use repcoach_core::constants::categories;
use repcoach_core::models::Joint;

/// The built-in categories in definition order
pub(super) fn builtin_categories() -> Vec<MotionCategory> {
    vec![
        MotionCategory::angle(
            categories::ELBOW_DOMINANT,
            "Elbow Dominant",
            [Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist],
            ThresholdCondition::less_than(60.0),
            ThresholdCondition::greater_than(140.0),
        ),
        MotionCategory::vertical_offset(
            categories::SHOULDER_DOMINANT,
            "Shoulder Dominant",
            [Joint::LeftShoulder, Joint::LeftWrist],
            ThresholdCondition::less_than(-0.2),
            ThresholdCondition::greater_than(0.02),
        ),
        MotionCategory::angle(
            categories::KNEE_DOMINANT,
            "Knee Dominant",
            [Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle],
            ThresholdCondition::less_than(90.0),
            ThresholdCondition::greater_than(160.0),
        ),
        MotionCategory::angle(
            categories::HIP_DOMINANT,
            "Hip Dominant",
            [Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee],
            ThresholdCondition::less_than(120.0),
            ThresholdCondition::greater_than(170.0),
        ),
        // Same joints as hip dominant, deeper flexion range
        MotionCategory::angle(
            categories::CORE_DOMINANT,
            "Core Dominant",
            [Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee],
            ThresholdCondition::less_than(100.0),
            ThresholdCondition::greater_than(160.0),
        ),
    ]
}
