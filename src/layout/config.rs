//! Configuration for the layout engine
//!
//! Every layout constant lives here and is passed explicitly to the engine.
//! A config can be loaded from a TOML file; missing keys keep their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::types::{Point, Size};
use crate::model::Zone;

/// Errors that can occur when loading a layout configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Display labels for the two zones
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoneLabels {
    pub public: String,
    pub private: String,
}

impl ZoneLabels {
    pub fn new(public: impl Into<String>, private: impl Into<String>) -> Self {
        Self {
            public: public.into(),
            private: private.into(),
        }
    }

    pub fn label(&self, zone: Zone) -> &str {
        match zone {
            Zone::Public => &self.public,
            Zone::Private => &self.private,
        }
    }
}

impl Default for ZoneLabels {
    fn default() -> Self {
        Self::new("Internet / Public", "Private Network")
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Size of every component card (width, height)
    pub component_size: (f64, f64),

    /// Minimum gap between two cards in the same group
    pub min_spacing: f64,

    /// Grid pitch for snapping
    pub grid_size: f64,

    /// Column count used when arranging inside a boundary
    pub grid_columns: usize,

    /// Horizontal distance between grid columns
    pub col_spacing: f64,

    /// Vertical distance between grid rows
    pub row_spacing: f64,

    /// Top-left cell of an arrangement, relative to its frame
    pub arrange_origin: (f64, f64),

    /// X-coordinate separating the public and private zones
    pub zone_split_x: f64,

    /// Padding for boundaries that do not declare their own
    pub boundary_padding: f64,

    /// Iteration budget for a plain overlap pass
    pub overlap_iterations: usize,

    /// Iteration budget when auto-fixing a freshly loaded preset
    pub auto_fix_iterations: usize,

    /// Base push distance applied to an overlapping pair per iteration
    pub overlap_force: f64,

    /// Also require private components and boundaries to sit right of the split
    pub check_private_zone: bool,

    /// Fallback zone labels for presets that do not name their zones
    pub zone_labels: ZoneLabels,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            component_size: (180.0, 110.0),
            min_spacing: 40.0,
            grid_size: 20.0,
            grid_columns: 2,
            col_spacing: 220.0,
            row_spacing: 160.0,
            arrange_origin: (40.0, 40.0),
            zone_split_x: 550.0,
            boundary_padding: 30.0,
            overlap_iterations: 50,
            auto_fix_iterations: 100,
            overlap_force: 25.0,
            check_private_zone: true,
            zone_labels: ZoneLabels::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn component_size(&self) -> Size {
        Size::new(self.component_size.0, self.component_size.1)
    }

    pub fn arrange_origin(&self) -> Point {
        Point::new(self.arrange_origin.0, self.arrange_origin.1)
    }

    /// Left edge of a zone's half-plane
    pub fn zone_left(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Public => 0.0,
            Zone::Private => self.zone_split_x,
        }
    }

    /// Set the component card size
    pub fn with_component_size(mut self, width: f64, height: f64) -> Self {
        self.component_size = (width, height);
        self
    }

    /// Set the minimum spacing between cards
    pub fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Set the snapping grid pitch
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the zone split x-coordinate
    pub fn with_zone_split(mut self, x: f64) -> Self {
        self.zone_split_x = x;
        self
    }

    /// Set the default boundary padding
    pub fn with_boundary_padding(mut self, padding: f64) -> Self {
        self.boundary_padding = padding;
        self
    }

    /// Set the iteration budgets for plain passes and auto-fix
    pub fn with_iterations(mut self, overlap: usize, auto_fix: usize) -> Self {
        self.overlap_iterations = overlap;
        self.auto_fix_iterations = auto_fix;
        self
    }

    /// Enable or disable the private-zone checks
    pub fn with_private_zone_check(mut self, enabled: bool) -> Self {
        self.check_private_zone = enabled;
        self
    }

    pub fn with_zone_labels(mut self, labels: ZoneLabels) -> Self {
        self.zone_labels = labels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.component_size, (180.0, 110.0));
        assert_eq!(config.min_spacing, 40.0);
        assert_eq!(config.grid_size, 20.0);
        assert_eq!(config.grid_columns, 2);
        assert_eq!(config.col_spacing, 220.0);
        assert_eq!(config.row_spacing, 160.0);
        assert_eq!(config.zone_split_x, 550.0);
        assert_eq!(config.boundary_padding, 30.0);
        assert_eq!(config.overlap_iterations, 50);
        assert_eq!(config.auto_fix_iterations, 100);
        assert!(config.check_private_zone);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_component_size(200.0, 100.0)
            .with_zone_split(600.0)
            .with_iterations(10, 20);

        assert_eq!(config.component_size(), Size::new(200.0, 100.0));
        assert_eq!(config.zone_split_x, 600.0);
        assert_eq!(config.overlap_iterations, 10);
        assert_eq!(config.auto_fix_iterations, 20);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LayoutConfig::from_str(
            r#"
grid_size = 10.0
zone_split_x = 600.0
check_private_zone = false

[zone_labels]
public = "Internet"
"#,
        )
        .unwrap();

        assert_eq!(config.grid_size, 10.0);
        assert_eq!(config.zone_split_x, 600.0);
        assert!(!config.check_private_zone);
        assert_eq!(config.zone_labels.public, "Internet");
        assert_eq!(config.zone_labels.private, "Private Network");
        assert_eq!(config.min_spacing, 40.0);
    }

    #[test]
    fn test_component_size_from_toml_array() {
        let config = LayoutConfig::from_str("component_size = [160.0, 90.0]").unwrap();
        assert_eq!(config.component_size(), Size::new(160.0, 90.0));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = LayoutConfig::from_str("grid_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("parse layout config"));
    }

    #[test]
    fn test_zone_left_edges() {
        let config = LayoutConfig::default();
        assert_eq!(config.zone_left(Zone::Public), 0.0);
        assert_eq!(config.zone_left(Zone::Private), 550.0);
        assert_eq!(config.zone_labels.label(Zone::Private), "Private Network");
    }
}
