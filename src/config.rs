// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Configuration types for the logging core.
//!
//! JSON5 configuration format supporting comments and trailing commas.
//! The manager also accepts an already-built [`LoggingConfig`] value;
//! file parsing is a convenience for hosts that keep logging settings in
//! a config file.

use crate::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the fallback sink writes when no backend is active
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "target", content = "path", rename_all = "lowercase")]
pub enum FallbackTarget {
    /// Write to the process's stderr
    Console,
    /// Append to a file; degrades to console if the file cannot be opened
    File(PathBuf),
}

impl Default for FallbackTarget {
    fn default() -> Self {
        FallbackTarget::Console
    }
}

/// Logging core configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback output target
    pub fallback: FallbackTarget,

    /// Threshold applied by the fallback sink
    pub fallback_threshold: LevelFilter,

    /// Buffer size of the diagnostic broadcast channel
    pub diagnostic_buffer: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackTarget::default(),
            fallback_threshold: LevelFilter::default(),
            diagnostic_buffer: 256,
        }
    }
}

impl LoggingConfig {
    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            json5::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration (pretty JSON; valid JSON5 input)
    pub fn to_json5(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.diagnostic_buffer == 0 {
            return Err(ConfigError::InvalidDiagnosticBuffer);
        }
        if let FallbackTarget::File(path) = &self.fallback {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyFallbackPath);
            }
        }
        Ok(())
    }
}

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    Io(PathBuf, String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("diagnostic_buffer must be greater than zero")]
    InvalidDiagnosticBuffer,

    #[error("fallback file target has an empty path")]
    EmptyFallbackPath,
}
