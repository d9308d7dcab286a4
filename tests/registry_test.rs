// ABOUTME: Integration tests for the motion category registry
// ABOUTME: Covers built-in table contents, JSON category files, and construction errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use repcoach::errors::{AppError, ErrorCode};
use repcoach::intelligence::{
    CategoryRegistry, Comparison, MotionCategory, RegistryBuilder, RegistryError, SignalKind,
    ThresholdCondition,
};
use repcoach::models::{BodySide, Joint};
use std::io::Write;
use tempfile::NamedTempFile;

const CURL_DOCUMENT: &str = r#"{
  "curl": {
    "name": "Curl",
    "detection_type": "angle",
    "landmarks": { "point1": "RIGHT_SHOULDER", "point2": "RIGHT_ELBOW", "point3": "RIGHT_WRIST" },
    "thresholds": {
      "start_condition": { "operator": "<", "value": 50 },
      "end_condition": { "operator": ">", "value": 150 }
    },
    "muscle_groups": ["biceps", "forearms"]
  },
  "lateral_raise": {
    "name": "Lateral Raise",
    "detection_type": "height",
    "landmarks": { "point1": "LEFT_SHOULDER", "point2": "LEFT_WRIST" },
    "thresholds": {
      "start_condition": { "operator": "<", "value": -0.3 },
      "end_condition": { "operator": ">", "value": 0.0 }
    }
  }
}"#;

#[test]
fn test_builtin_registry_has_five_categories() {
    let registry = CategoryRegistry::builtin();
    let keys: Vec<&str> = registry.keys().collect();
    assert_eq!(
        keys,
        vec![
            "core_dominant",
            "elbow_dominant",
            "hip_dominant",
            "knee_dominant",
            "shoulder_dominant"
        ]
    );
}

#[test]
fn test_builtin_elbow_definition() {
    let elbow = CategoryRegistry::builtin().get("elbow_dominant").unwrap();
    assert_eq!(elbow.display_name(), "Elbow Dominant");
    assert_eq!(elbow.signal_kind(), SignalKind::Angle);
    assert_eq!(
        elbow.joint_refs(),
        &[Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist]
    );
    assert_eq!(elbow.start_condition(), ThresholdCondition::less_than(60.0));
    assert_eq!(elbow.end_condition(), ThresholdCondition::greater_than(140.0));
}

#[test]
fn test_builtin_thresholds() {
    let registry = CategoryRegistry::builtin();
    let expected = [
        ("shoulder_dominant", -0.2, 0.02),
        ("knee_dominant", 90.0, 160.0),
        ("hip_dominant", 120.0, 170.0),
        ("core_dominant", 100.0, 160.0),
    ];
    for (key, start, end) in expected {
        let category = registry.get(key).unwrap();
        assert_eq!(category.start_condition().operator, Comparison::LessThan, "{key}");
        assert!((category.start_condition().threshold - start).abs() < f64::EPSILON);
        assert_eq!(category.end_condition().operator, Comparison::GreaterThan, "{key}");
        assert!((category.end_condition().threshold - end).abs() < f64::EPSILON);
    }
}

#[test]
fn test_builtin_arity_matches_signal_kind() {
    for category in CategoryRegistry::builtin().iter() {
        assert_eq!(
            category.joint_refs().len(),
            category.signal_kind().arity(),
            "{}",
            category.key()
        );
    }
}

#[test]
fn test_builtin_is_a_singleton() {
    let first: *const CategoryRegistry = CategoryRegistry::builtin();
    let second: *const CategoryRegistry = CategoryRegistry::builtin();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_key_is_none() {
    let registry = CategoryRegistry::builtin();
    assert!(registry.get("deadlift").is_none());
    assert!(!registry.contains("deadlift"));
    assert!(registry.contains("knee_dominant"));
}

#[test]
fn test_joints_on_mirrors_lateral_joints() {
    let knee = CategoryRegistry::builtin().get("knee_dominant").unwrap();
    assert_eq!(knee.joints_on(BodySide::Left), knee.joint_refs());
    assert_eq!(
        knee.joints_on(BodySide::Right),
        vec![Joint::RightHip, Joint::RightKnee, Joint::RightAnkle]
    );
}

#[test]
fn test_threshold_conditions_are_strict() {
    let below = ThresholdCondition::less_than(60.0);
    assert!(below.holds(59.9));
    assert!(!below.holds(60.0));

    let above = ThresholdCondition::greater_than(140.0);
    assert!(above.holds(140.1));
    assert!(!above.holds(140.0));
    assert!(!above.holds(f64::NAN));
}

#[test]
fn test_from_json_parses_categories() {
    let registry = CategoryRegistry::from_json(CURL_DOCUMENT).unwrap();
    assert_eq!(registry.len(), 2);

    let curl = registry.get("curl").unwrap();
    assert_eq!(curl.signal_kind(), SignalKind::Angle);
    assert_eq!(curl.joint_refs()[1], Joint::RightElbow);
    assert_eq!(curl.muscle_groups(), ["biceps", "forearms"]);

    let raise = registry.get("lateral_raise").unwrap();
    assert_eq!(raise.signal_kind(), SignalKind::VerticalOffset);
    assert_eq!(raise.joint_refs().len(), 2);
    assert!(raise.muscle_groups().is_empty());
}

#[test]
fn test_builtin_json_round_trip() {
    let builtin = CategoryRegistry::builtin();
    let json = builtin.to_json().unwrap();
    let reloaded = CategoryRegistry::from_json(&json).unwrap();

    assert_eq!(reloaded.len(), builtin.len());
    for category in builtin.iter() {
        assert_eq!(reloaded.get(category.key()), Some(category));
    }
}

#[test]
fn test_from_path_loads_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CURL_DOCUMENT.as_bytes()).unwrap();

    let registry = CategoryRegistry::from_path(file.path()).unwrap();
    assert!(registry.contains("curl"));
    assert!(!registry.contains("elbow_dominant"));
}

#[test]
fn test_from_path_missing_file() {
    let error = CategoryRegistry::from_path("/nonexistent/categories.json").unwrap_err();
    assert!(matches!(error, RegistryError::Io { .. }));
    assert_eq!(AppError::from(error).code, ErrorCode::StorageError);
}

#[test]
fn test_angle_with_two_joints_is_rejected() {
    let json = r#"{
      "broken": {
        "name": "Broken",
        "detection_type": "angle",
        "landmarks": { "point1": "LEFT_HIP", "point2": "LEFT_KNEE" },
        "thresholds": {
          "start_condition": { "operator": "<", "value": 90 },
          "end_condition": { "operator": ">", "value": 160 }
        }
      }
    }"#;

    let error = CategoryRegistry::from_json(json).unwrap_err();
    match error {
        RegistryError::ArityMismatch {
            key,
            expected,
            actual,
            ..
        } => {
            assert_eq!(key, "broken");
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("expected arity mismatch, got {other:?}"),
    }
}

#[test]
fn test_height_with_three_joints_is_rejected() {
    let result = MotionCategory::new(
        "raise",
        "Raise",
        SignalKind::VerticalOffset,
        vec![Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist],
        ThresholdCondition::less_than(-0.2),
        ThresholdCondition::greater_than(0.0),
    );
    assert!(matches!(result, Err(RegistryError::ArityMismatch { .. })));
}

#[test]
fn test_unknown_joint_name_is_rejected() {
    let json = CURL_DOCUMENT.replace("RIGHT_ELBOW", "RIGHT_ELBOWW");
    let error = CategoryRegistry::from_json(&json).unwrap_err();
    assert!(
        matches!(&error, RegistryError::UnknownJoint { name, .. } if name == "RIGHT_ELBOWW"),
        "{error}"
    );
    assert_eq!(AppError::from(error).code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_malformed_document_is_parse_error() {
    let error = CategoryRegistry::from_json("{ not json").unwrap_err();
    assert!(matches!(error, RegistryError::Parse(_)));
    assert_eq!(AppError::from(error).code, ErrorCode::SerializationError);
}

#[test]
fn test_non_finite_threshold_is_rejected() {
    let result = MotionCategory::new(
        "nan",
        "NaN",
        SignalKind::Angle,
        vec![Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist],
        ThresholdCondition::less_than(f64::NAN),
        ThresholdCondition::greater_than(140.0),
    );
    assert!(matches!(result, Err(RegistryError::InvalidThreshold { .. })));
}

#[test]
fn test_empty_key_is_rejected() {
    let result = MotionCategory::new(
        "  ",
        "Blank",
        SignalKind::VerticalOffset,
        vec![Joint::LeftShoulder, Joint::LeftWrist],
        ThresholdCondition::less_than(-0.2),
        ThresholdCondition::greater_than(0.0),
    );
    assert!(matches!(result, Err(RegistryError::EmptyKey)));
}

#[test]
fn test_builder_rejects_duplicates() {
    let curl = MotionCategory::new(
        "elbow_dominant",
        "Duplicate",
        SignalKind::Angle,
        vec![Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist],
        ThresholdCondition::less_than(50.0),
        ThresholdCondition::greater_than(150.0),
    )
    .unwrap();
    let error = RegistryBuilder::from_builtin().add(curl).unwrap_err();
    assert!(matches!(&error, RegistryError::DuplicateKey(key) if key == "elbow_dominant"));
    assert_eq!(AppError::from(error).code, ErrorCode::ResourceAlreadyExists);
}

#[test]
fn test_builder_extends_builtin() {
    let pushup = MotionCategory::new(
        "pushup",
        "Push-up",
        SignalKind::Angle,
        vec![Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist],
        ThresholdCondition::less_than(90.0),
        ThresholdCondition::greater_than(160.0),
    )
    .unwrap()
    .with_muscle_groups(vec!["chest".into(), "triceps".into()]);

    let registry = RegistryBuilder::from_builtin().add(pushup).unwrap().build();
    assert_eq!(registry.len(), 6);
    assert_eq!(registry.get("pushup").unwrap().muscle_groups().len(), 2);
}

#[test]
fn test_builtin_categories_satisfy_public_validation() {
    for category in CategoryRegistry::builtin().iter() {
        let rebuilt = MotionCategory::new(
            category.key(),
            category.display_name(),
            category.signal_kind(),
            category.joint_refs().to_vec(),
            category.start_condition(),
            category.end_condition(),
        )
        .unwrap();
        assert_eq!(&rebuilt, category);
    }
}

#[test]
fn test_non_finite_end_threshold_is_rejected() {
    let nan_offset = MotionCategory::new(
        "raise",
        "Raise",
        SignalKind::VerticalOffset,
        vec![Joint::RightShoulder, Joint::RightWrist],
        ThresholdCondition::less_than(-0.2),
        ThresholdCondition::greater_than(f64::NAN),
    );
    assert!(matches!(
        nan_offset,
        Err(RegistryError::InvalidThreshold { ref key }) if key == "raise"
    ));
}
