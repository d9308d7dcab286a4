// ABOUTME: Pose landmark vocabulary (33-point model) and per-frame landmark container
// ABOUTME: Supports name-keyed and index-ordered frames plus left/right joint mirroring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::POSE_LANDMARK_COUNT;
use crate::errors::{AppError, AppResult};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Side of the body a joint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    /// Subject's left side
    Left,
    /// Subject's right side
    Right,
}

impl BodySide {
    /// Both sides, left first
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];
}

impl fmt::Display for BodySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Named anatomical landmark of the 33-point pose model.
///
/// Variant order matches the landmark index emitted by the pose estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Joint {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl Joint {
    /// Every joint in landmark-index order
    pub const ALL: [Self; POSE_LANDMARK_COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Landmark index in the pose estimator output
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Joint at a landmark index, if the index is in range
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical upper-case name (e.g. `LEFT_SHOULDER`)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "NOSE",
            Self::LeftEyeInner => "LEFT_EYE_INNER",
            Self::LeftEye => "LEFT_EYE",
            Self::LeftEyeOuter => "LEFT_EYE_OUTER",
            Self::RightEyeInner => "RIGHT_EYE_INNER",
            Self::RightEye => "RIGHT_EYE",
            Self::RightEyeOuter => "RIGHT_EYE_OUTER",
            Self::LeftEar => "LEFT_EAR",
            Self::RightEar => "RIGHT_EAR",
            Self::MouthLeft => "MOUTH_LEFT",
            Self::MouthRight => "MOUTH_RIGHT",
            Self::LeftShoulder => "LEFT_SHOULDER",
            Self::RightShoulder => "RIGHT_SHOULDER",
            Self::LeftElbow => "LEFT_ELBOW",
            Self::RightElbow => "RIGHT_ELBOW",
            Self::LeftWrist => "LEFT_WRIST",
            Self::RightWrist => "RIGHT_WRIST",
            Self::LeftPinky => "LEFT_PINKY",
            Self::RightPinky => "RIGHT_PINKY",
            Self::LeftIndex => "LEFT_INDEX",
            Self::RightIndex => "RIGHT_INDEX",
            Self::LeftThumb => "LEFT_THUMB",
            Self::RightThumb => "RIGHT_THUMB",
            Self::LeftHip => "LEFT_HIP",
            Self::RightHip => "RIGHT_HIP",
            Self::LeftKnee => "LEFT_KNEE",
            Self::RightKnee => "RIGHT_KNEE",
            Self::LeftAnkle => "LEFT_ANKLE",
            Self::RightAnkle => "RIGHT_ANKLE",
            Self::LeftHeel => "LEFT_HEEL",
            Self::RightHeel => "RIGHT_HEEL",
            Self::LeftFootIndex => "LEFT_FOOT_INDEX",
            Self::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }

    /// Side of the body, `None` for the nose
    #[must_use]
    pub const fn side(self) -> Option<BodySide> {
        match self {
            Self::Nose => None,
            Self::LeftEyeInner
            | Self::LeftEye
            | Self::LeftEyeOuter
            | Self::LeftEar
            | Self::MouthLeft
            | Self::LeftShoulder
            | Self::LeftElbow
            | Self::LeftWrist
            | Self::LeftPinky
            | Self::LeftIndex
            | Self::LeftThumb
            | Self::LeftHip
            | Self::LeftKnee
            | Self::LeftAnkle
            | Self::LeftHeel
            | Self::LeftFootIndex => Some(BodySide::Left),
            _ => Some(BodySide::Right),
        }
    }

    /// Mirror-image joint on the opposite side (the nose maps to itself)
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Nose => Self::Nose,
            Self::LeftEyeInner => Self::RightEyeInner,
            Self::LeftEye => Self::RightEye,
            Self::LeftEyeOuter => Self::RightEyeOuter,
            Self::RightEyeInner => Self::LeftEyeInner,
            Self::RightEye => Self::LeftEye,
            Self::RightEyeOuter => Self::LeftEyeOuter,
            Self::LeftEar => Self::RightEar,
            Self::RightEar => Self::LeftEar,
            Self::MouthLeft => Self::MouthRight,
            Self::MouthRight => Self::MouthLeft,
            Self::LeftShoulder => Self::RightShoulder,
            Self::RightShoulder => Self::LeftShoulder,
            Self::LeftElbow => Self::RightElbow,
            Self::RightElbow => Self::LeftElbow,
            Self::LeftWrist => Self::RightWrist,
            Self::RightWrist => Self::LeftWrist,
            Self::LeftPinky => Self::RightPinky,
            Self::RightPinky => Self::LeftPinky,
            Self::LeftIndex => Self::RightIndex,
            Self::RightIndex => Self::LeftIndex,
            Self::LeftThumb => Self::RightThumb,
            Self::RightThumb => Self::LeftThumb,
            Self::LeftHip => Self::RightHip,
            Self::RightHip => Self::LeftHip,
            Self::LeftKnee => Self::RightKnee,
            Self::RightKnee => Self::LeftKnee,
            Self::LeftAnkle => Self::RightAnkle,
            Self::RightAnkle => Self::LeftAnkle,
            Self::LeftHeel => Self::RightHeel,
            Self::RightHeel => Self::LeftHeel,
            Self::LeftFootIndex => Self::RightFootIndex,
            Self::RightFootIndex => Self::LeftFootIndex,
        }
    }

    /// This joint as seen on `side`: left-side joints are returned unchanged for
    /// `Left` and mirrored for `Right`, and vice versa.
    #[must_use]
    pub fn on_side(self, side: BodySide) -> Self {
        match self.side() {
            Some(own) if own != side => self.mirrored(),
            _ => self,
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Joint {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|joint| joint.name() == normalized)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown joint name: {s}")))
    }
}

/// One detected landmark: normalized image coordinates and detection confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position (0 = left edge, 1 = right edge)
    pub x: f64,
    /// Vertical position (0 = top edge, 1 = bottom edge)
    pub y: f64,
    /// Detection confidence in [0, 1]
    pub visibility: f64,
}

impl Landmark {
    /// Create a landmark
    #[must_use]
    pub const fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }

    /// Whether this landmark passes a visibility gate.
    ///
    /// NaN visibility never passes.
    #[must_use]
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility >= threshold
    }
}

/// Joint landmarks of one video frame or image.
///
/// Deserializes from either an object keyed by joint name or the
/// 33-entry landmark list in estimator order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "FrameRepr")]
pub struct Frame {
    joints: BTreeMap<Joint, Landmark>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameRepr {
    Named(BTreeMap<Joint, Landmark>),
    Indexed(Vec<Landmark>),
}

impl TryFrom<FrameRepr> for Frame {
    type Error = AppError;

    fn try_from(repr: FrameRepr) -> AppResult<Self> {
        match repr {
            FrameRepr::Named(joints) => Ok(Self { joints }),
            FrameRepr::Indexed(landmarks) => Self::from_landmarks(&landmarks),
        }
    }
}

impl Frame {
    /// Create an empty frame
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from the estimator's index-ordered landmark list
    ///
    /// # Errors
    ///
    /// Returns an error if the list does not hold exactly 33 landmarks
    pub fn from_landmarks(landmarks: &[Landmark]) -> AppResult<Self> {
        if landmarks.len() != POSE_LANDMARK_COUNT {
            return Err(AppError::invalid_input(format!(
                "Expected {POSE_LANDMARK_COUNT} landmarks, got {}",
                landmarks.len()
            )));
        }
        Ok(Self {
            joints: Joint::ALL.iter().copied().zip(landmarks.iter().copied()).collect(),
        })
    }

    /// Add or replace a joint landmark, builder style
    #[must_use]
    pub fn with_joint(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.joints.insert(joint, landmark);
        self
    }

    /// Add or replace a joint landmark
    pub fn insert(&mut self, joint: Joint, landmark: Landmark) {
        self.joints.insert(joint, landmark);
    }

    /// Landmark for `joint`, if present
    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.joints.get(&joint)
    }

    /// Number of joints present
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Whether the frame holds no joints
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Iterate joints in landmark-index order
    pub fn iter(&self) -> impl Iterator<Item = (Joint, &Landmark)> {
        self.joints.iter().map(|(joint, landmark)| (*joint, landmark))
    }
}

impl FromIterator<(Joint, Landmark)> for Frame {
    fn from_iter<I: IntoIterator<Item = (Joint, Landmark)>>(iter: I) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.joints.len()))?;
        for (joint, landmark) in &self.joints {
            map.serialize_entry(joint.name(), landmark)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_index_round_trip() {
        for (index, joint) in Joint::ALL.iter().enumerate() {
            assert_eq!(joint.index(), index);
            assert_eq!(Joint::from_index(index), Some(*joint));
        }
        assert_eq!(Joint::from_index(POSE_LANDMARK_COUNT), None);
    }

    #[test]
    fn test_joint_parsing_is_case_insensitive() {
        assert_eq!(" left_elbow ".parse::<Joint>().ok(), Some(Joint::LeftElbow));
        assert!("LEFT_ELBOWS".parse::<Joint>().is_err());
    }

    #[test]
    fn test_mirroring() {
        assert_eq!(Joint::LeftKnee.mirrored(), Joint::RightKnee);
        assert_eq!(Joint::RightPinky.mirrored(), Joint::LeftPinky);
        assert_eq!(Joint::Nose.mirrored(), Joint::Nose);
        assert_eq!(Joint::LeftHip.on_side(BodySide::Left), Joint::LeftHip);
        assert_eq!(Joint::LeftHip.on_side(BodySide::Right), Joint::RightHip);
        assert_eq!(Joint::Nose.on_side(BodySide::Right), Joint::Nose);
    }

    #[test]
    fn test_nan_visibility_never_passes() {
        assert!(!Landmark::new(0.5, 0.5, f64::NAN).is_visible(0.5));
        assert!(Landmark::new(0.5, 0.5, 0.5).is_visible(0.5));
    }

    #[test]
    fn test_frame_from_named_json() {
        let frame: Frame = serde_json::from_str(
            r#"{"LEFT_ELBOW": {"x": 0.4, "y": 0.5, "visibility": 0.9}}"#,
        )
        .unwrap();
        assert_eq!(frame.len(), 1);
        assert!(frame.get(Joint::LeftElbow).is_some());

        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"LEFT_ELBOW\""));
    }

    #[test]
    fn test_frame_from_indexed_json() {
        let landmarks = vec![Landmark::new(0.1, 0.2, 0.9); POSE_LANDMARK_COUNT];
        let json = serde_json::to_string(&landmarks).unwrap();
        let frame: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame.len(), POSE_LANDMARK_COUNT);

        let short = serde_json::to_string(&landmarks[..10]).unwrap();
        assert!(serde_json::from_str::<Frame>(&short).is_err());
    }
}
