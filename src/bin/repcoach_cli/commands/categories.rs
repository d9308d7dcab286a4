// ABOUTME: Category listing command for repcoach-cli
// ABOUTME: Prints the registry as a table or in the category file format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::display_category;
use repcoach::errors::AppResult;
use repcoach::intelligence::CategoryRegistry;

/// List categories
pub fn list(registry: &CategoryRegistry, json: bool) -> AppResult<()> {
    if json {
        println!("{}", registry.to_json()?);
        return Ok(());
    }

    println!("{} motion categories", registry.len());
    println!("{}", "=".repeat(60));
    for category in registry.iter() {
        display_category(category);
    }
    Ok(())
}
