//! Common types used throughout item-pager
//!
//! This module contains the record model, page key aliases,
//! and small enums shared across multiple modules.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Page Keys
// ============================================================================

/// Continuation key: a 1-based page index
pub type PageKey = u32;

/// Key used when a load carries no explicit key (initial load / refresh)
pub const FIRST_PAGE_KEY: PageKey = 1;

// ============================================================================
// Record
// ============================================================================

/// A single item returned by the remote collection
///
/// Unknown fields are ignored. `name`, `description` and `image_url` are
/// coerced to empty strings when missing or `null`; `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, assumed unique but not enforced
    pub id: i64,
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-form description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Image reference
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

impl Record {
    /// Create a record
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Load Direction
// ============================================================================

/// Which end of the loaded sequence a load targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadDirection {
    /// Initial load or refresh after invalidation
    Refresh,
    /// Load the page after the last loaded page
    Append,
    /// Load the page before the first loaded page
    Prepend,
}

impl std::fmt::Display for LoadDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoadDirection::Refresh => "refresh",
            LoadDirection::Append => "append",
            LoadDirection::Prepend => "prepend",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level accepted on the command line and in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
