// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placement of constructed nodes.
///
/// Columns grow right to left from `base_x`, so output roots sit at column 0
/// on the right and their dependencies fan out to the left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// X coordinate of column 0
    pub base_x: f32,
    /// Horizontal distance between columns
    pub column_spacing: f32,
    /// Vertical distance between rows
    pub row_spacing: f32,
}

impl LayoutConfig {
    /// Graph-space position of a column/row cell
    pub fn position(&self, column: usize, row: usize) -> [f32; 2] {
        [
            self.base_x - self.column_spacing * column as f32,
            self.row_spacing * row as f32,
        ]
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_x: 1600.0,
            column_spacing: 300.0,
            row_spacing: 200.0,
        }
    }
}

/// Editor settings, stored as RON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Node placement
    pub layout: LayoutConfig,
    /// Maximum number of entries kept in the editor log
    pub log_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            log_capacity: 1000,
        }
    }
}

impl EditorConfig {
    /// Parse from a RON string; missing fields take their defaults
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save to a RON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Error loading or saving the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid RON for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}
