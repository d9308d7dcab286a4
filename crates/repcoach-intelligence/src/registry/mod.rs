// ABOUTME: Category registry mapping category keys to immutable motion definitions
// ABOUTME: Provides the built-in singleton, JSON file loading, and a builder for custom tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Category Registry
//!
//! Holds the fixed definitions of motion categories and exposes lookup by key.
//! A registry is read-only once built; lookups never fail fatally, a missing
//! key is simply `None`.

mod category;
mod definitions;
mod loader;

pub use category::{Comparison, MotionCategory, SignalKind, ThresholdCondition};

use repcoach_core::errors::{AppError, ErrorCode};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{fs, io};
use thiserror::Error;
use tracing::{debug, info};

/// Built-in registry singleton
static BUILTIN_REGISTRY: OnceLock<CategoryRegistry> = OnceLock::new();

/// Errors raised while building or loading a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Category key is empty or whitespace
    #[error("Category key must not be empty")]
    EmptyKey,

    /// Joint count does not match the signal kind
    #[error("Category '{key}': {kind} signal needs {expected} joints, got {actual}")]
    ArityMismatch {
        /// Offending category
        key: String,
        /// Declared signal kind
        kind: SignalKind,
        /// Joints required by the signal kind
        expected: usize,
        /// Joints supplied
        actual: usize,
    },

    /// Threshold is NaN or infinite
    #[error("Category '{key}': thresholds must be finite")]
    InvalidThreshold {
        /// Offending category
        key: String,
    },

    /// Joint name is not part of the landmark vocabulary
    #[error("Category '{key}': unknown joint '{name}'")]
    UnknownJoint {
        /// Offending category
        key: String,
        /// Unrecognized joint name
        name: String,
    },

    /// The same key was registered twice
    #[error("Category '{0}' is already registered")]
    DuplicateKey(String),

    /// Category document is not valid JSON for the expected format
    #[error("Invalid category document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Category file could not be read
    #[error("Failed to read category file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl From<RegistryError> for AppError {
    fn from(error: RegistryError) -> Self {
        let code = match &error {
            RegistryError::DuplicateKey(_) => ErrorCode::ResourceAlreadyExists,
            RegistryError::Parse(_) => ErrorCode::SerializationError,
            RegistryError::Io { .. } => ErrorCode::StorageError,
            RegistryError::EmptyKey
            | RegistryError::ArityMismatch { .. }
            | RegistryError::InvalidThreshold { .. }
            | RegistryError::UnknownJoint { .. } => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Immutable mapping from category key to motion definition
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: BTreeMap<String, MotionCategory>,
}

impl CategoryRegistry {
    /// Process-wide built-in registry (elbow, shoulder, knee, hip, core dominant)
    pub fn builtin() -> &'static Self {
        BUILTIN_REGISTRY.get_or_init(Self::with_builtin)
    }

    /// Fresh copy of the built-in table
    #[must_use]
    pub fn with_builtin() -> Self {
        Self {
            categories: definitions::builtin_categories()
                .into_iter()
                .map(|category| (category.key().to_owned(), category))
                .collect(),
        }
    }

    /// Load a registry from a category document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or any category is invalid
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let mut builder = RegistryBuilder::new();
        for category in loader::parse(json)? {
            builder = builder.add(category)?;
        }
        let registry = builder.build();
        debug!(categories = registry.len(), "Parsed category document");
        Ok(registry)
    }

    /// Load a registry from a category file on disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            categories = registry.len(),
            "Loaded motion categories from file"
        );
        Ok(registry)
    }

    /// Render this registry in the category document format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, RegistryError> {
        loader::render(self.categories.values())
    }

    /// Look up a category by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MotionCategory> {
        self.categories.get(key)
    }

    /// Whether `key` is registered
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.categories.contains_key(key)
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Categories in key order
    pub fn iter(&self) -> impl Iterator<Item = &MotionCategory> {
        self.categories.values()
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Assembles a custom registry; the result is immutable
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    categories: BTreeMap<String, MotionCategory>,
}

impl RegistryBuilder {
    /// Start an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the built-in categories
    #[must_use]
    pub fn from_builtin() -> Self {
        Self {
            categories: CategoryRegistry::with_builtin().categories,
        }
    }

    /// Add a category
    ///
    /// # Errors
    ///
    /// Returns an error if a category with the same key was already added
    pub fn add(mut self, category: MotionCategory) -> Result<Self, RegistryError> {
        if self.categories.contains_key(category.key()) {
            return Err(RegistryError::DuplicateKey(category.key().to_owned()));
        }
        self.categories.insert(category.key().to_owned(), category);
        Ok(self)
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> CategoryRegistry {
        CategoryRegistry {
            categories: self.categories,
        }
    }
}
