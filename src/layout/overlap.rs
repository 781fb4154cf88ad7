//! Force-directed overlap resolution
//!
//! Items are compared pairwise within their group only: children of the same
//! boundary, or free components of the same zone. Each pass pushes every
//! overlapping pair apart along the line between their centers.

use std::fmt;

use log::{debug, warn};

use super::config::LayoutConfig;
use super::position::{snap_local, Scene};
use super::types::{BoundingBox, Point};
use crate::model::{Component, Zone};

/// The set of items an item is compared against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverlapGroup {
    Boundary(String),
    Zone(Zone),
}

impl OverlapGroup {
    /// Group a component belongs to: its parent boundary if any, else its zone
    pub fn of(component: &Component) -> Self {
        match &component.parent_boundary {
            Some(parent) => OverlapGroup::Boundary(parent.clone()),
            None => OverlapGroup::Zone(component.zone),
        }
    }
}

impl fmt::Display for OverlapGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapGroup::Boundary(id) => write!(f, "boundary {id}"),
            OverlapGroup::Zone(zone) => write!(f, "{zone} zone"),
        }
    }
}

/// One rectangle taking part in resolution
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapItem {
    pub id: String,
    pub bounds: BoundingBox,
    pub group: OverlapGroup,
    /// Locked items are never moved
    pub locked: bool,
}

impl OverlapItem {
    pub fn new(id: impl Into<String>, bounds: BoundingBox, group: OverlapGroup) -> Self {
        Self {
            id: id.into(),
            bounds,
            group,
            locked: false,
        }
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

/// Result of a resolver run
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Items in input order; moved items have rounded positions
    pub items: Vec<OverlapItem>,
    /// Passes that found at least one overlap
    pub iterations: usize,
    /// No same-group pair overlaps any more
    pub converged: bool,
}

impl Resolution {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.items.iter().find(|i| i.id == id).map(|i| i.bounds.origin())
    }
}

/// Two visible components that are too close
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapPair {
    pub first: String,
    pub second: String,
    pub context: OverlapGroup,
}

fn pair_overlaps(a: &OverlapItem, b: &OverlapItem, spacing: f64) -> bool {
    a.group == b.group && a.bounds.overlaps_with_spacing(&b.bounds, spacing)
}

fn count_overlapping_pairs(items: &[OverlapItem], spacing: f64) -> usize {
    let mut count = 0;
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if pair_overlaps(&items[i], &items[j], spacing) {
                count += 1;
            }
        }
    }
    count
}

/// Run the resolver for at most `max_iterations` passes
pub fn resolve(
    mut items: Vec<OverlapItem>,
    config: &LayoutConfig,
    max_iterations: usize,
) -> Resolution {
    let spacing = config.min_spacing;
    let mut moved = vec![false; items.len()];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..max_iterations {
        let mut found = false;

        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if !pair_overlaps(&items[i], &items[j], spacing) {
                    continue;
                }
                found = true;
                if items[i].locked && items[j].locked {
                    continue;
                }

                let (a, b) = (items[i].bounds, items[j].bounds);
                let (ca, cb) = (a.center(), b.center());
                let (dx, dy) = (cb.x - ca.x, cb.y - ca.y);
                let dist = dx.hypot(dy);
                let (ux, uy, dist) = if dist == 0.0 {
                    (1.0, 0.0, 1.0)
                } else {
                    (dx / dist, dy / dist, dist)
                };

                let required = ((a.width + b.width) / 2.0 + spacing)
                    .hypot((a.height + b.height) / 2.0 + spacing);
                let ratio = ((required - dist) / required).max(0.0);
                let force = config.overlap_force * (1.0 + 2.0 * ratio);

                if !items[i].locked {
                    items[i].bounds.x -= ux * force;
                    items[i].bounds.y -= uy * force;
                    moved[i] = true;
                }
                if !items[j].locked {
                    items[j].bounds.x += ux * force;
                    items[j].bounds.y += uy * force;
                    moved[j] = true;
                }
            }
        }

        if !found {
            converged = true;
            break;
        }
        iterations += 1;
    }

    if !converged {
        converged = count_overlapping_pairs(&items, spacing) == 0;
    }

    for (item, moved) in items.iter_mut().zip(moved) {
        if moved {
            item.bounds = item.bounds.moved_to(item.bounds.origin().rounded());
        }
    }

    debug!(iterations = iterations, converged = converged; "Overlap resolution finished");
    Resolution {
        items,
        iterations,
        converged,
    }
}

/// Components after a resolver pass, with the run's statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedComponents {
    pub components: Vec<Component>,
    pub iterations: usize,
    pub converged: bool,
}

/// Resolve overlaps among the visible components of `scene`.
///
/// With `respect_boundaries` set, boundary children are locked in place.
/// Hidden components pass through unchanged.
pub fn resolve_component_overlaps(
    scene: &Scene,
    iterations: usize,
    respect_boundaries: bool,
) -> ResolvedComponents {
    let items: Vec<OverlapItem> = scene
        .components
        .iter()
        .filter(|c| c.visible)
        .map(|c| {
            OverlapItem::new(c.id.clone(), scene.local_bounds(c), OverlapGroup::of(c))
                .locked(respect_boundaries && c.parent_boundary.is_some())
        })
        .collect();

    let resolution = resolve(items, scene.config, iterations);

    let components = scene
        .components
        .iter()
        .map(|c| {
            let before = scene.local_bounds(c).origin();
            match resolution.position(&c.id) {
                Some(after) if c.visible && after != before => {
                    if c.parent_boundary.is_some() {
                        let mut placed = c.clone();
                        placed.position = after;
                        placed
                    } else {
                        scene.localize(c, after)
                    }
                }
                _ => c.clone(),
            }
        })
        .collect();

    ResolvedComponents {
        components,
        iterations: resolution.iterations,
        converged: resolution.converged,
    }
}

/// Every same-group pair of visible components closer than the minimum spacing
pub fn detect_overlaps(scene: &Scene) -> Vec<OverlapPair> {
    let visible: Vec<(&Component, BoundingBox)> = scene
        .components
        .iter()
        .filter(|c| c.visible)
        .map(|c| (c, scene.absolute_bounds(c)))
        .collect();

    let mut pairs = Vec::new();
    for (i, (a, a_box)) in visible.iter().enumerate() {
        for (b, b_box) in &visible[i + 1..] {
            let group = OverlapGroup::of(a);
            if group != OverlapGroup::of(b) {
                continue;
            }
            if a_box.overlaps_with_spacing(b_box, scene.config.min_spacing) {
                pairs.push(OverlapPair {
                    first: a.id.clone(),
                    second: b.id.clone(),
                    context: group,
                });
            }
        }
    }
    pairs
}

pub fn has_overlaps(scene: &Scene) -> bool {
    !detect_overlaps(scene).is_empty()
}

/// Fix overlaps in a freshly loaded component set.
///
/// Returns `None` when nothing overlaps. Otherwise boundary children stay put,
/// free components are pushed apart with the auto-fix budget and every visible
/// stored position is snapped to the grid.
pub fn auto_fix_overlaps(scene: &Scene) -> Option<Vec<Component>> {
    let overlaps = detect_overlaps(scene);
    if overlaps.is_empty() {
        return None;
    }

    warn!(count = overlaps.len(); "Overlaps detected, auto-fixing");
    for pair in &overlaps {
        debug!(
            first = pair.first,
            second = pair.second,
            context:% = pair.context;
            "Overlapping pair"
        );
    }

    let resolved = resolve_component_overlaps(scene, scene.config.auto_fix_iterations, true);
    let grid = scene.config.grid_size;
    Some(
        resolved
            .components
            .iter()
            .map(|c| if c.visible { snap_local(c, grid) } else { c.clone() })
            .collect(),
    )
}
