// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for repcoach-cli
// ABOUTME: Provides consistent display functions for categories and sequence reports

use repcoach::analysis::SequenceReport;
use repcoach::intelligence::MotionCategory;

/// Display one category as a short block
pub fn display_category(category: &MotionCategory) {
    let joints: Vec<&str> = category.joint_refs().iter().map(|j| j.name()).collect();
    println!("{} ({})", category.key(), category.display_name());
    println!("   Signal: {}", category.signal_kind());
    println!("   Joints: {}", joints.join(" -> "));
    println!(
        "   Start (DOWN): signal {}   End (UP): signal {}",
        category.start_condition(),
        category.end_condition()
    );
    if !category.muscle_groups().is_empty() {
        println!("   Muscles: {}", category.muscle_groups().join(", "));
    }
    println!();
}

/// Display the summary of an analyzed sequence
pub fn display_report(report: &SequenceReport) {
    println!("\nSequence analysis: {}", report.category);
    println!("{}", "=".repeat(50));
    println!("   Frames: {}", report.frame_count);
    println!("   Duration: {:.1}s", report.duration_ms as f64 / 1000.0);
    println!("   Repetitions: {}", report.repetitions);
    println!(
        "   Phases: DOWN {} / UP {} / TRANSITION {}",
        report.phase_counts.down, report.phase_counts.up, report.phase_counts.transition
    );
    println!("   Unclassified frames: {}", report.unclassified);

    if let (Some(min), Some(max)) = (report.min_signal, report.max_signal) {
        println!("   Signal range: {min:.3} .. {max:.3}");
    }
    if !report.repetition_frames.is_empty() {
        let frames: Vec<String> = report
            .repetition_frames
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("   Repetitions completed at frames: {}", frames.join(", "));
    }
}
