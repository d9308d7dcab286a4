// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for repcoach-cli
// ABOUTME: Provides the categories, classify, and analyze subcommands

pub mod analyze;
pub mod categories;
pub mod classify;
