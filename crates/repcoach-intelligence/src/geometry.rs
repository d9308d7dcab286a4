// ABOUTME: Joint geometry signals used to judge repetition phase
// ABOUTME: Included angle at a vertex joint and vertical offset between two joints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcoach_core::models::Landmark;

/// Included angle at `vertex`, in degrees, folded into [0, 180].
///
/// Formula: `|atan2(distal - vertex) - atan2(proximal - vertex)|` converted to
/// degrees, replaced by `360 - angle` when above 180.
#[must_use]
pub fn angle_at_vertex(proximal: &Landmark, vertex: &Landmark, distal: &Landmark) -> f64 {
    let radians = (distal.y - vertex.y).atan2(distal.x - vertex.x)
        - (proximal.y - vertex.y).atan2(proximal.x - vertex.x);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Vertical offset `anchor.y - tracked.y` in normalized image coordinates.
///
/// Image y grows downwards, so a negative result means `anchor` sits above `tracked`.
#[must_use]
pub fn vertical_offset(anchor: &Landmark, tracked: &Landmark) -> f64 {
    anchor.y - tracked.y
}
