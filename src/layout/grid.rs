//! Grid snapping and deterministic grid arrangement

use log::debug;

use super::config::LayoutConfig;
use super::types::{round_half_up, Point};
use crate::model::Component;

/// Snap a coordinate to the nearest multiple of `grid_size` (halves round up)
///
/// A non-positive grid size disables snapping.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    round_half_up(value / grid_size) * grid_size
}

/// Snap both coordinates of a point
pub fn snap_point(point: Point, grid_size: f64) -> Point {
    Point::new(
        snap_to_grid(point.x, grid_size),
        snap_to_grid(point.y, grid_size),
    )
}

/// Column count for a global arrangement of `count` components
pub fn adaptive_columns(count: usize) -> usize {
    if count <= 4 {
        2
    } else {
        let root = (count as f64).sqrt().ceil() as usize;
        root.min(3)
    }
}

/// How many grid columns fit in a lane `width` wide (at least one)
pub fn fitting_columns(width: f64, config: &LayoutConfig) -> usize {
    let room = width - config.component_size().width;
    if room < 0.0 || config.col_spacing <= 0.0 {
        return 1;
    }
    ((room / config.col_spacing).floor() as usize).saturating_add(1)
}

/// Snapped position of the `index`-th cell in a grid starting at `origin`
///
/// The origin is snapped first so that spacings that are multiples of the
/// grid give evenly spaced cells.
pub fn grid_cell(index: usize, columns: usize, origin: Point, config: &LayoutConfig) -> Point {
    let columns = columns.max(1);
    let row = index / columns;
    let col = index % columns;
    let origin = snap_point(origin, config.grid_size);
    snap_point(
        Point::new(
            origin.x + col as f64 * config.col_spacing,
            origin.y + row as f64 * config.row_spacing,
        ),
        config.grid_size,
    )
}

/// Place every visible component matching `filter` on a grid, in input order
///
/// Components that are hidden or do not match pass through unchanged.
pub fn arrange_matching<F>(
    components: &[Component],
    origin: Point,
    columns: usize,
    config: &LayoutConfig,
    filter: F,
) -> Vec<Component>
where
    F: Fn(&Component) -> bool,
{
    let mut index = 0;
    components
        .iter()
        .map(|c| {
            if !c.visible || !filter(c) {
                return c.clone();
            }
            let mut placed = c.clone();
            placed.position = grid_cell(index, columns, origin, config);
            index += 1;
            placed
        })
        .collect()
}

/// Arrange the visible children of `boundary_id` on a grid
///
/// `origin` is relative to the boundary's top-left corner, like the
/// children's positions.
pub fn arrange_in_boundary(
    components: &[Component],
    boundary_id: &str,
    origin: Point,
    columns: usize,
    config: &LayoutConfig,
) -> Vec<Component> {
    debug!(boundary = boundary_id, columns = columns; "Arranging boundary children");
    arrange_matching(components, origin, columns, config, |c| c.has_parent(boundary_id))
}

/// Arrange every visible component on one grid with an adaptive column count
pub fn arrange_globally(
    components: &[Component],
    origin: Point,
    config: &LayoutConfig,
) -> Vec<Component> {
    let visible = components.iter().filter(|c| c.visible).count();
    let columns = adaptive_columns(visible);
    debug!(visible = visible, columns = columns; "Arranging all components");
    arrange_matching(components, origin, columns, config, |_| true)
}
