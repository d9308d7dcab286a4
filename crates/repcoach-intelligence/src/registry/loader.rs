// ABOUTME: JSON category file format for externally maintained motion categories
// ABOUTME: Parses and renders the keyed category document including muscle-group metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Category file format.
//!
//! ```json
//! {
//!   "elbow_dominant": {
//!     "name": "Elbow Dominant",
//!     "detection_type": "angle",
//!     "landmarks": { "point1": "LEFT_SHOULDER", "point2": "LEFT_ELBOW", "point3": "LEFT_WRIST" },
//!     "thresholds": {
//!       "start_condition": { "operator": "<", "value": 60 },
//!       "end_condition": { "operator": ">", "value": 140 }
//!     },
//!     "muscle_groups": ["biceps"]
//!   }
//! }
//! ```
//!
//! `detection_type` is `angle` or `height` (`vertical_offset` is accepted as an alias).

use super::category::{MotionCategory, SignalKind, ThresholdCondition};
use super::RegistryError;
use repcoach_core::models::Joint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DetectionType {
    Angle,
    #[serde(alias = "vertical_offset")]
    Height,
}

impl From<DetectionType> for SignalKind {
    fn from(detection_type: DetectionType) -> Self {
        match detection_type {
            DetectionType::Angle => Self::Angle,
            DetectionType::Height => Self::VerticalOffset,
        }
    }
}

impl From<SignalKind> for DetectionType {
    fn from(kind: SignalKind) -> Self {
        match kind {
            SignalKind::Angle => Self::Angle,
            SignalKind::VerticalOffset => Self::Height,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LandmarkRefs {
    point1: String,
    point2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    point3: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Thresholds {
    start_condition: ThresholdCondition,
    end_condition: ThresholdCondition,
}

#[derive(Debug, Serialize, Deserialize)]
struct CategoryEntry {
    name: String,
    detection_type: DetectionType,
    landmarks: LandmarkRefs,
    thresholds: Thresholds,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    muscle_groups: Vec<String>,
}

/// Parse a category document into validated categories (key order)
pub(super) fn parse(json: &str) -> Result<Vec<MotionCategory>, RegistryError> {
    let entries: BTreeMap<String, CategoryEntry> = serde_json::from_str(json)?;

    entries
        .into_iter()
        .map(|(key, entry)| entry_to_category(key, entry))
        .collect()
}

fn entry_to_category(key: String, entry: CategoryEntry) -> Result<MotionCategory, RegistryError> {
    let LandmarkRefs {
        point1,
        point2,
        point3,
    } = entry.landmarks;

    let joint_refs = [Some(point1), Some(point2), point3]
        .into_iter()
        .flatten()
        .map(|name| {
            name.parse::<Joint>()
                .map_err(|_| RegistryError::UnknownJoint {
                    key: key.clone(),
                    name,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let category = MotionCategory::new(
        key,
        entry.name,
        entry.detection_type.into(),
        joint_refs,
        entry.thresholds.start_condition,
        entry.thresholds.end_condition,
    )?;

    Ok(category.with_muscle_groups(entry.muscle_groups))
}

/// Render categories back into the category document format
pub(super) fn render<'a>(
    categories: impl Iterator<Item = &'a MotionCategory>,
) -> Result<String, RegistryError> {
    let entries: BTreeMap<&str, CategoryEntry> = categories
        .map(|category| {
            let mut points = category.joint_refs().iter().map(|joint| joint.name().to_owned());
            let landmarks = LandmarkRefs {
                point1: points.next().unwrap_or_default(),
                point2: points.next().unwrap_or_default(),
                point3: points.next(),
            };
            (
                category.key(),
                CategoryEntry {
                    name: category.display_name().to_owned(),
                    detection_type: category.signal_kind().into(),
                    landmarks,
                    thresholds: Thresholds {
                        start_condition: category.start_condition(),
                        end_condition: category.end_condition(),
                    },
                    muscle_groups: category.muscle_groups().to_vec(),
                },
            )
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}
