//! Error types for preset handling

use thiserror::Error;

use crate::layout::ConfigError;
use crate::model::Zone;

/// Errors that can occur when looking up or normalizing a preset
#[derive(Debug, Error)]
pub enum PresetError {
    /// No built-in preset has this id
    #[error("unknown preset '{id}'")]
    UnknownPreset { id: String, suggestions: Vec<String> },

    /// A component sits in a zone section that disagrees with its own zone
    #[error("component '{component}' is declared {declared} but listed in the {section} section")]
    ZoneConflict {
        component: String,
        declared: Zone,
        section: Zone,
    },

    #[error("duplicate component id '{id}'")]
    DuplicateComponent { id: String },

    #[error("duplicate boundary id '{id}'")]
    DuplicateBoundary { id: String },

    #[error("duplicate connection id '{id}'")]
    DuplicateConnection { id: String },
}

impl PresetError {
    /// Create an unknown preset error with suggestions
    pub fn unknown(id: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownPreset {
            id: id.into(),
            suggestions,
        }
    }

    pub fn zone_conflict(component: impl Into<String>, declared: Zone, section: Zone) -> Self {
        Self::ZoneConflict {
            component: component.into(),
            declared,
            section,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownPreset { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

/// Top-level error for the command-line front end
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_preset_display() {
        let err = PresetError::unknown("shared-sas", vec!["shared-saas".to_string()]);
        assert_eq!(err.to_string(), "unknown preset 'shared-sas'");
        assert_eq!(err.suggestions(), Some(&["shared-saas".to_string()][..]));
    }

    #[test]
    fn test_zone_conflict_display() {
        let err = PresetError::zone_conflict("cdn", Zone::Private, Zone::Public);
        assert_eq!(
            err.to_string(),
            "component 'cdn' is declared private but listed in the public section"
        );
        assert_eq!(err.suggestions(), None);
    }

    #[test]
    fn test_crate_error_wraps_preset_error() {
        let err: Error = PresetError::DuplicateBoundary { id: "vpc".into() }.into();
        assert_eq!(err.to_string(), "duplicate boundary id 'vpc'");
    }
}
