//! Preset schema and lookup
//!
//! A [`PresetDefinition`] is what authors write: components either as one
//! flat list or grouped into zone sections. [`PresetDefinition::normalize`]
//! turns it into a [`Preset`], the only form the rest of the crate accepts.

pub mod builtin;

use std::collections::HashSet;

use log::debug;

use crate::error::PresetError;
use crate::layout::{LayoutConfig, Scene, ZoneLabels};
use crate::model::{Boundary, Component, Connection, ContainmentRules, Zone};

/// Components grouped under one zone
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSection {
    pub zone: Zone,
    /// Display label for the zone; falls back to the configured label
    pub label: Option<String>,
    pub components: Vec<Component>,
}

impl ZoneSection {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            label: None,
            components: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a component; its own zone must match the section's
    pub fn with(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }
}

/// How a definition lists its components
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentSet {
    Flat(Vec<Component>),
    Zoned(Vec<ZoneSection>),
}

/// A preset as authored, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub components: ComponentSet,
    pub boundaries: Vec<Boundary>,
    pub connections: Vec<Connection>,
}

impl PresetDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, components: ComponentSet) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            components,
            boundaries: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundaries.push(boundary);
        self
    }

    pub fn with_connections(mut self, connections: impl IntoIterator<Item = Connection>) -> Self {
        self.connections.extend(connections);
        self
    }

    /// Flatten zone sections and check ids.
    ///
    /// Fails on a component whose zone disagrees with its section, and on
    /// duplicate component, boundary or connection ids.
    pub fn normalize(self, config: &LayoutConfig) -> Result<Preset, PresetError> {
        let mut zone_labels = config.zone_labels.clone();

        let components = match self.components {
            ComponentSet::Flat(components) => components,
            ComponentSet::Zoned(sections) => {
                let mut flat = Vec::new();
                for section in sections {
                    if let Some(label) = section.label {
                        match section.zone {
                            Zone::Public => zone_labels.public = label,
                            Zone::Private => zone_labels.private = label,
                        }
                    }
                    for component in section.components {
                        if component.zone != section.zone {
                            return Err(PresetError::zone_conflict(
                                component.id,
                                component.zone,
                                section.zone,
                            ));
                        }
                        flat.push(component);
                    }
                }
                flat
            }
        };

        let mut seen = HashSet::new();
        for c in &components {
            if !seen.insert(c.id.as_str()) {
                return Err(PresetError::DuplicateComponent { id: c.id.clone() });
            }
        }
        let mut seen = HashSet::new();
        for b in &self.boundaries {
            if !seen.insert(b.id.as_str()) {
                return Err(PresetError::DuplicateBoundary { id: b.id.clone() });
            }
        }
        let mut seen = HashSet::new();
        for conn in &self.connections {
            if !seen.insert(conn.id.as_str()) {
                return Err(PresetError::DuplicateConnection { id: conn.id.clone() });
            }
        }

        debug!(preset = self.id, components = components.len(); "Normalized preset");
        Ok(Preset {
            id: self.id,
            name: self.name,
            description: self.description,
            components,
            boundaries: self.boundaries,
            connections: self.connections,
            zone_labels,
        })
    }
}

/// A normalized, immutable preset
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub components: Vec<Component>,
    pub boundaries: Vec<Boundary>,
    pub connections: Vec<Connection>,
    pub zone_labels: ZoneLabels,
}

impl Preset {
    /// The same preset with every component switched on
    pub fn with_all_visible(&self) -> Preset {
        let mut preset = self.clone();
        for c in &mut preset.components {
            c.visible = true;
        }
        preset
    }

    pub fn boundary_rules(&self, boundary_id: &str) -> Option<&ContainmentRules> {
        self.boundaries
            .iter()
            .find(|b| b.id == boundary_id)
            .and_then(|b| b.containment_rules.as_ref())
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn scene<'a>(&'a self, config: &'a LayoutConfig) -> Scene<'a> {
        Scene::new(&self.components, &self.boundaries, config)
    }
}

/// Look up a built-in preset definition by id
pub fn find_definition(id: &str) -> Result<PresetDefinition, PresetError> {
    let definitions = builtin::definitions();
    if let Some(found) = definitions.iter().find(|d| d.id == id) {
        return Ok(found.clone());
    }
    let known: Vec<&str> = definitions.iter().map(|d| d.id.as_str()).collect();
    Err(PresetError::unknown(id, find_similar(&known, id, 3)))
}

/// Look up and normalize a built-in preset
pub fn load(id: &str, config: &LayoutConfig) -> Result<Preset, PresetError> {
    find_definition(id)?.normalize(config)
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut row = vec![0usize; n + 1];
    for (i, ca) in a_chars.iter().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[n]
}

/// Known names within `max_distance` edits of `target`, closest first
fn find_similar(known: &[&str], target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = known
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((*name, dist))
        })
        .collect();

    candidates.sort_by_key(|(name, d)| (*d, *name));
    candidates.into_iter().map(|(name, _)| name.to_string()).collect()
}
