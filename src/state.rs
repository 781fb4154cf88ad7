//! Interactive diagram state
//!
//! [`DiagramState`] owns the current component set and applies user actions
//! to it. Every mutation builds a new component list and swaps it in; the
//! boundaries and connections of the loaded preset never change.

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::error::PresetError;
use crate::highlight::{active_connections, reachable_from};
use crate::layout::grid::{
    adaptive_columns, arrange_in_boundary, arrange_matching, fitting_columns, snap_point,
};
use crate::layout::{
    auto_fix_overlaps, snap_local, validate, BoundingBox, Frame, LayoutConfig, Point, Scene,
    ValidationReport, ZoneLabels,
};
use crate::model::{Boundary, Component, Connection, Zone};
use crate::preset::{self, Preset};

/// A visible component ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentView {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub zone: Zone,
    /// Absolute card rectangle
    pub bounds: BoundingBox,
    pub highlighted: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryView {
    pub id: String,
    pub label: String,
    pub zone: Zone,
    /// Anchor and effective size
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionView {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub highlighted: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramView {
    pub components: Vec<ComponentView>,
    pub boundaries: Vec<BoundaryView>,
    pub connections: Vec<ConnectionView>,
    pub zone_labels: ZoneLabels,
    pub zone_split_x: f64,
}

/// Mutable state behind the interactive diagram
#[derive(Debug, Clone)]
pub struct DiagramState {
    config: LayoutConfig,
    preset_id: Option<String>,
    components: Vec<Component>,
    boundaries: Vec<Boundary>,
    connections: Vec<Connection>,
    zone_labels: ZoneLabels,
    selected: Option<String>,
    report: ValidationReport,
}

impl DiagramState {
    /// Create an empty state; call [`DiagramState::load_preset`] to populate it
    pub fn new(config: LayoutConfig) -> Self {
        let zone_labels = config.zone_labels.clone();
        Self {
            config,
            preset_id: None,
            components: Vec::new(),
            boundaries: Vec::new(),
            connections: Vec::new(),
            zone_labels,
            selected: None,
            report: ValidationReport::default(),
        }
    }

    /// Create a state holding `preset`, auto-fixed and validated
    pub fn from_preset(preset: Preset, config: LayoutConfig) -> Self {
        let mut state = Self::new(config);
        state.install(preset);
        state
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn preset_id(&self) -> Option<&str> {
        self.preset_id.as_deref()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Validation result of the most recent load or visibility toggle
    pub fn last_report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene::new(&self.components, &self.boundaries, &self.config)
    }

    /// Replace all state with the built-in preset `id`
    pub fn load_preset(&mut self, id: &str) -> Result<(), PresetError> {
        let preset = preset::load(id, &self.config)?;
        self.install(preset);
        Ok(())
    }

    fn install(&mut self, preset: Preset) {
        let Preset {
            id,
            components,
            boundaries,
            connections,
            zone_labels,
            ..
        } = preset;

        let fixed = auto_fix_overlaps(&Scene::new(&components, &boundaries, &self.config));
        self.components = fixed.unwrap_or(components);
        self.boundaries = boundaries;
        self.connections = connections;
        self.zone_labels = zone_labels;
        self.selected = None;

        self.check_layout();
        if self.report.is_valid() {
            info!(
                preset = id,
                components = self.report.stats.total,
                visible = self.report.stats.visible;
                "Loaded preset"
            );
        }
        self.preset_id = Some(id);
    }

    /// Validate the current layout, keep the report and log its errors
    fn check_layout(&mut self) {
        let report = self.validate();
        if !report.is_valid() {
            warn!(errors = report.error_count(); "Layout has errors");
            for violation in report.errors() {
                warn!(rule:% = violation.rule; "{}", violation.message);
            }
        }
        self.report = report;
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        let index = self.components.iter().position(|c| c.id == id);
        if index.is_none() {
            warn!(component = id; "Unknown component id");
        }
        index
    }

    /// Flip a component's visibility and revalidate; false for an unknown id
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut components = self.components.clone();
        components[index].visible = !components[index].visible;
        debug!(component = id, visible = components[index].visible; "Toggled visibility");
        self.components = components;
        self.check_layout();
        true
    }

    /// Move a component so its top-left corner is at the absolute `point`.
    ///
    /// The position is stored in the component's own frame and snapped to
    /// the grid only when `is_final_drop` is set.
    pub fn move_component(&mut self, id: &str, point: Point, is_final_drop: bool) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut moved = self.scene().localize(&self.components[index], point);
        if is_final_drop {
            moved = snap_local(&moved, self.config.grid_size);
        }
        let mut components = self.components.clone();
        components[index] = moved;
        self.components = components;
        true
    }

    /// Select a component for highlighting, or clear the selection
    pub fn select_node(&mut self, id: Option<&str>) {
        match id {
            Some(id) if self.component(id).is_none() => {
                warn!(component = id; "Cannot select unknown component");
            }
            Some(id) => self.selected = Some(id.to_string()),
            None => self.selected = None,
        }
    }

    /// Lay out every boundary's children and every zone's free components on grids
    pub fn auto_arrange(&mut self) {
        let config = &self.config;
        let origin = config.arrange_origin();
        let mut components = self.components.clone();

        for boundary in &self.boundaries {
            let padding = boundary.padding.unwrap_or(config.boundary_padding);
            let columns = config
                .grid_columns
                .min(fitting_columns(boundary.width - origin.x - padding, config))
                .max(1);
            components = arrange_in_boundary(&components, &boundary.id, origin, columns, config);
        }

        for zone in [Zone::Public, Zone::Private] {
            let scene = Scene::new(&components, &self.boundaries, config);
            let is_free = |c: &Component| {
                c.zone == zone && c.parent_boundary.is_none() && scene.frame(c) == Frame::Canvas
            };
            let count = components.iter().filter(|c| c.visible && is_free(c)).count();
            if count == 0 {
                continue;
            }

            let zone_origin = snap_point(
                Point::new(config.zone_left(zone) + origin.x, origin.y),
                config.grid_size,
            );
            let lane_right = self.free_lane_right(zone, zone_origin.x);
            let columns =
                adaptive_columns(count).min(fitting_columns(lane_right - zone_origin.x, config));
            debug!(zone:% = zone, count = count, columns = columns; "Arranging free components");

            let arranged = arrange_matching(&components, zone_origin, columns, config, is_free);
            components = arranged;
        }

        self.components = components;
    }

    /// Right edge of the strip free components of `zone` may occupy
    ///
    /// Public components stop at the zone split; both zones stop short of
    /// the first boundary to the right of the strip's start.
    fn free_lane_right(&self, zone: Zone, start_x: f64) -> f64 {
        let zone_right = match zone {
            Zone::Public => self.config.zone_split_x,
            Zone::Private => f64::INFINITY,
        };
        self.boundaries
            .iter()
            .filter(|b| b.zone == zone && b.x > start_x)
            .map(|b| b.x - self.config.min_spacing)
            .fold(zone_right, f64::min)
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.scene())
    }

    /// Ids reachable from the selected component over active connections
    pub fn highlighted(&self) -> BTreeSet<String> {
        match &self.selected {
            Some(selected) => reachable_from(
                selected,
                active_connections(&self.connections, &self.components),
            ),
            None => BTreeSet::new(),
        }
    }

    pub fn view(&self) -> DiagramView {
        let scene = self.scene();
        let highlighted = self.highlighted();

        let components = self
            .components
            .iter()
            .filter(|c| c.visible)
            .map(|c| ComponentView {
                id: c.id.clone(),
                label: c.label.clone(),
                icon: c.icon.clone(),
                description: c.description.clone(),
                zone: c.zone,
                bounds: scene.absolute_bounds(c),
                highlighted: highlighted.contains(&c.id),
                selected: self.selected.as_deref() == Some(c.id.as_str()),
            })
            .collect();

        let boundaries = self
            .boundaries
            .iter()
            .map(|b| BoundaryView {
                id: b.id.clone(),
                label: b.label.clone(),
                zone: b.zone,
                bounds: scene.effective_box(b),
            })
            .collect();

        let connections = active_connections(&self.connections, &self.components)
            .into_iter()
            .map(|conn| ConnectionView {
                id: conn.id.clone(),
                source: conn.source.clone(),
                target: conn.target.clone(),
                label: conn.label.clone(),
                highlighted: highlighted.contains(&conn.source),
            })
            .collect();

        DiagramView {
            components,
            boundaries,
            connections,
            zone_labels: self.zone_labels.clone(),
            zone_split_x: self.config.zone_split_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{ComponentSet, PresetDefinition};
    use pretty_assertions::assert_eq;

    fn small_state() -> DiagramState {
        let config = LayoutConfig::default();
        let preset = PresetDefinition::new(
            "small",
            "Small",
            ComponentSet::Flat(vec![
                Component::new("a", "A", Zone::Public, 20.0, 20.0),
                Component::new("b", "B", Zone::Public, 20.0, 170.0),
                Component::new("c", "C", Zone::Private, 600.0, 20.0).with_visible(false),
            ]),
        )
        .with_connections([Connection::new("ab", "a", "b"), Connection::new("bc", "b", "c")])
        .normalize(&config)
        .unwrap();
        DiagramState::from_preset(preset, config)
    }

    #[test]
    fn test_toggle_visibility() {
        let mut state = small_state();
        assert!(state.toggle_visibility("c"));
        assert!(state.component("c").unwrap().visible);
        assert!(state.toggle_visibility("c"));
        assert!(!state.component("c").unwrap().visible);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut state = small_state();
        let before = state.components().to_vec();

        assert!(!state.toggle_visibility("ghost"));
        assert!(!state.move_component("ghost", Point::new(1.0, 1.0), true));
        state.select_node(Some("ghost"));

        assert_eq!(state.components(), &before[..]);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_move_snaps_only_on_final_drop() {
        let mut state = small_state();

        assert!(state.move_component("a", Point::new(33.0, 47.0), false));
        assert_eq!(state.component("a").unwrap().position, Point::new(33.0, 47.0));

        assert!(state.move_component("a", Point::new(33.0, 47.0), true));
        assert_eq!(state.component("a").unwrap().position, Point::new(40.0, 40.0));
    }

    #[test]
    fn test_selection_highlights_downstream() {
        let mut state = small_state();
        state.select_node(Some("a"));

        let expected: BTreeSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(state.highlighted(), expected);

        let view = state.view();
        assert_eq!(view.components.len(), 2);
        assert!(view.components[0].selected);
        assert!(view.components[1].highlighted);
        assert_eq!(view.connections.len(), 1);
        assert!(view.connections[0].highlighted);

        state.select_node(None);
        assert!(state.highlighted().is_empty());
    }

    #[test]
    fn test_load_preset_replaces_state() {
        let mut state = small_state();
        state.select_node(Some("a"));

        state.load_preset("shared-saas").unwrap();

        assert_eq!(state.preset_id(), Some("shared-saas"));
        assert_eq!(state.selected(), None);
        assert!(state.component("a").is_none());
        assert!(state.validate().is_valid());
    }

    #[test]
    fn test_load_unknown_preset_keeps_state() {
        let mut state = small_state();
        let err = state.load_preset("nope").unwrap_err();
        assert!(matches!(err, PresetError::UnknownPreset { .. }));
        assert_eq!(state.preset_id(), Some("small"));
    }

    #[test]
    fn test_toggle_revalidates_layout() {
        let config = LayoutConfig::default();
        let preset = PresetDefinition::new(
            "stray",
            "Stray",
            ComponentSet::Flat(vec![
                Component::new("a", "A", Zone::Public, 20.0, 20.0),
                Component::new("db", "DB", Zone::Private, 100.0, 400.0).with_visible(false),
            ]),
        )
        .normalize(&config)
        .unwrap();
        let mut state = DiagramState::from_preset(preset, config);
        assert!(state.last_report().is_valid());

        assert!(state.toggle_visibility("db"));
        let report = state.last_report();
        assert_eq!(report.error_count(), 1);
        assert!(report
            .by_rule(crate::layout::Rule::ZoneBoundary)
            .all(|v| v.involves("db")));

        assert!(state.toggle_visibility("db"));
        assert!(state.last_report().is_valid());
    }

    #[test]
    fn test_auto_arrange_lane_starts_at_snapped_origin() {
        let config = LayoutConfig::default();
        // Lane ends at 1030 - 40 = 990; measured from 600 only one column fits
        let preset = PresetDefinition::new(
            "lane",
            "Lane",
            ComponentSet::Flat(vec![
                Component::new("a", "A", Zone::Private, 1100.0, 600.0),
                Component::new("b", "B", Zone::Private, 1100.0, 800.0),
                Component::new("c", "C", Zone::Private, 1100.0, 1000.0),
            ]),
        )
        .with_boundary(Boundary::new("box", "Box", Zone::Private, 1030.0, 20.0, 300.0, 200.0))
        .normalize(&config)
        .unwrap();
        let mut state = DiagramState::from_preset(preset, config);

        state.auto_arrange();

        let positions: Vec<Point> = state.components().iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(600.0, 40.0),
                Point::new(600.0, 200.0),
                Point::new(600.0, 360.0),
            ]
        );
        assert!(positions.iter().all(|p| p.x + 180.0 <= 990.0));
    }

    #[test]
    fn test_load_fixes_overlaps() {
        let config = LayoutConfig::default();
        let preset = PresetDefinition::new(
            "crowded",
            "Crowded",
            ComponentSet::Flat(vec![
                Component::new("a", "A", Zone::Private, 700.0, 200.0),
                Component::new("b", "B", Zone::Private, 710.0, 200.0),
            ]),
        )
        .normalize(&config)
        .unwrap();

        let state = DiagramState::from_preset(preset, config);

        assert!(state.validate().by_rule(crate::layout::Rule::Overlap).next().is_none());
    }
}
