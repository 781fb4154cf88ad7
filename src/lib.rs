//! Deployment Diagram - layout and validation core for reference cloud
//! deployment diagrams
//!
//! Presets describe components, boundary boxes and connections for a
//! deployment scenario. This library positions them, keeps boundaries sized
//! to their visible children, pushes overlapping cards apart, checks zone and
//! containment rules, and computes which connections to highlight for a
//! selected component.
//!
//! # Example
//!
//! ```rust
//! use deployment_diagram::{DiagramState, LayoutConfig};
//!
//! let mut state = DiagramState::new(LayoutConfig::default());
//! state.load_preset("shared-saas").unwrap();
//!
//! state.toggle_visibility("platform-eu");
//! assert!(state.validate().is_valid());
//!
//! state.select_node(Some("cdn"));
//! assert!(state.highlighted().contains("platform-na"));
//! ```

pub mod error;
pub mod highlight;
pub mod layout;
pub mod model;
pub mod preset;
pub mod state;

pub use error::{Error, PresetError};
pub use highlight::{active_connections, reachable_from};
pub use layout::{ConfigError, LayoutConfig, Scene, ValidationReport, ZoneLabels};
pub use model::{Boundary, Component, Connection, ContainmentRules, Placement, Positioning, Zone};
pub use preset::{ComponentSet, Preset, PresetDefinition, ZoneSection};
pub use state::{DiagramState, DiagramView};

/// Load a built-in preset and validate it exactly as authored
///
/// # Example
///
/// ```rust
/// use deployment_diagram::{validate_preset, LayoutConfig};
///
/// let report = validate_preset("customer-hosted", &LayoutConfig::default()).unwrap();
/// assert!(report.is_valid());
/// ```
pub fn validate_preset(id: &str, config: &LayoutConfig) -> Result<ValidationReport, PresetError> {
    let preset = preset::load(id, config)?;
    Ok(layout::validate(&preset.scene(config)))
}
