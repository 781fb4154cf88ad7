//! Layout engine for deployment diagrams
//!
//! Geometry, grid snapping and arrangement, boundary auto-sizing, the
//! force-directed overlap resolver and the validator. All of it works on a
//! [`Scene`], which is the single place coordinate frames are resolved.

pub mod config;
pub mod grid;
pub mod overlap;
pub mod position;
pub mod sizing;
pub mod types;
pub mod validate;

pub use config::{ConfigError, LayoutConfig, ZoneLabels};
pub use grid::{arrange_globally, arrange_in_boundary, snap_point, snap_to_grid};
pub use overlap::{
    auto_fix_overlaps, detect_overlaps, has_overlaps, resolve, resolve_component_overlaps,
    OverlapGroup, OverlapItem, OverlapPair, Resolution, ResolvedComponents,
};
pub use position::{snap_local, Frame, Scene};
pub use sizing::{effective_box, effective_size};
pub use types::*;
pub use validate::{
    sweep_toggles, validate, Rule, Severity, ToggleCheck, ValidationReport, Violation,
};
