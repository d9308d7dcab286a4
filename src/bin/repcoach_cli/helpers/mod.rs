// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Helper modules for repcoach-cli
// ABOUTME: Input reading and terminal output formatting

pub mod display;
pub mod input;
