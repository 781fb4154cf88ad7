//! Position resolution across coordinate frames
//!
//! A component's stored position lives in one of three frames: the canvas,
//! its parent boundary, or an edge of a boundary it is anchored to. Every
//! other module exchanges absolute canvas coordinates and goes through
//! [`Scene`] to convert.

use super::config::LayoutConfig;
use super::grid::snap_to_grid;
use super::sizing;
use super::types::{BoundingBox, Point};
use crate::model::{Boundary, Component, Placement};

/// The frame a component's stored position is expressed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame<'a> {
    /// Absolute canvas coordinates
    Canvas,
    /// Relative to the parent boundary's top-left corner
    Boundary(&'a Boundary),
    /// Derived from an edge of a boundary's effective box plus offsets
    Anchored {
        bounds: BoundingBox,
        placement: Placement,
    },
}

/// Borrowed view over a component set that answers position and size questions
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub components: &'a [Component],
    pub boundaries: &'a [Boundary],
    pub config: &'a LayoutConfig,
}

impl<'a> Scene<'a> {
    pub fn new(
        components: &'a [Component],
        boundaries: &'a [Boundary],
        config: &'a LayoutConfig,
    ) -> Self {
        Self {
            components,
            boundaries,
            config,
        }
    }

    pub fn boundary(&self, id: &str) -> Option<&'a Boundary> {
        self.boundaries.iter().find(|b| b.id == id)
    }

    pub fn component(&self, id: &str) -> Option<&'a Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Absolute box of a boundary at its effective size
    pub fn effective_box(&self, boundary: &Boundary) -> BoundingBox {
        sizing::effective_box(boundary, self.components, self.config)
    }

    /// Resolve the frame of `component`'s stored position.
    ///
    /// A parent boundary takes precedence over a positioning directive. A
    /// reference to a boundary that does not exist falls back to the canvas.
    pub fn frame(&self, component: &Component) -> Frame<'a> {
        if let Some(parent) = &component.parent_boundary {
            return match self.boundary(parent) {
                Some(boundary) => Frame::Boundary(boundary),
                None => Frame::Canvas,
            };
        }

        match &component.positioning {
            Some(positioning) => match self.boundary(&positioning.relative_to) {
                Some(boundary) => Frame::Anchored {
                    bounds: self.effective_box(boundary),
                    placement: positioning.placement,
                },
                None => Frame::Canvas,
            },
            None => Frame::Canvas,
        }
    }

    /// Absolute top-left corner of `component`
    pub fn absolute_position(&self, component: &Component) -> Point {
        match self.frame(component) {
            Frame::Canvas => component.position,
            Frame::Boundary(boundary) => component.position.translate(boundary.anchor()),
            Frame::Anchored { bounds, placement } => {
                let (ox, oy) = component
                    .positioning
                    .as_ref()
                    .map(|p| (p.offset_x, p.offset_y))
                    .unwrap_or_default();
                match placement {
                    Placement::Below => Point::new(bounds.x + ox, bounds.bottom() + oy),
                    Placement::Right => Point::new(bounds.right() + ox, bounds.y + oy),
                    Placement::Above => Point::new(bounds.x + ox, bounds.y - oy),
                    Placement::Left => Point::new(bounds.x - ox, bounds.y + oy),
                }
            }
        }
    }

    /// Absolute card rectangle of `component`
    pub fn absolute_bounds(&self, component: &Component) -> BoundingBox {
        BoundingBox::from_origin(self.absolute_position(component), self.config.component_size())
    }

    /// Card rectangle in the frame the overlap resolver works in
    ///
    /// Children of a boundary keep their stored (relative) position; every
    /// other component is placed on the canvas.
    pub fn local_bounds(&self, component: &Component) -> BoundingBox {
        let origin = if component.parent_boundary.is_some() {
            component.position
        } else {
            self.absolute_position(component)
        };
        BoundingBox::from_origin(origin, self.config.component_size())
    }

    /// Store the absolute point `absolute` back into `component`'s own frame.
    ///
    /// Anchored components get their offsets recomputed; their fallback
    /// position is set to the absolute point.
    pub fn localize(&self, component: &Component, absolute: Point) -> Component {
        let mut placed = component.clone();
        match self.frame(component) {
            Frame::Canvas => placed.position = absolute,
            Frame::Boundary(boundary) => placed.position = absolute.relative_to(boundary.anchor()),
            Frame::Anchored { bounds, placement } => {
                let (ox, oy) = match placement {
                    Placement::Below => (absolute.x - bounds.x, absolute.y - bounds.bottom()),
                    Placement::Right => (absolute.x - bounds.right(), absolute.y - bounds.y),
                    Placement::Above => (absolute.x - bounds.x, bounds.y - absolute.y),
                    Placement::Left => (bounds.x - absolute.x, absolute.y - bounds.y),
                };
                if let Some(positioning) = placed.positioning.as_mut() {
                    positioning.offset_x = ox;
                    positioning.offset_y = oy;
                }
                placed.position = absolute;
            }
        }
        placed
    }
}

/// Snap the stored position of `component` to the grid in its own frame
///
/// Anchor offsets are snapped as well.
pub fn snap_local(component: &Component, grid_size: f64) -> Component {
    let mut snapped = component.clone();
    snapped.position = Point::new(
        snap_to_grid(component.position.x, grid_size),
        snap_to_grid(component.position.y, grid_size),
    );
    if let Some(positioning) = snapped.positioning.as_mut() {
        positioning.offset_x = snap_to_grid(positioning.offset_x, grid_size);
        positioning.offset_y = snap_to_grid(positioning.offset_y, grid_size);
    }
    snapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Positioning, Zone};
    use pretty_assertions::assert_eq;

    fn platform() -> Boundary {
        Boundary::new("platform", "Platform", Zone::Public, 260.0, 20.0, 270.0, 470.0)
            .with_padding(30.0)
    }

    fn anchored(placement: Placement, ox: f64, oy: f64) -> Component {
        Component::new("llm", "LLM", Zone::Public, 1.0, 2.0)
            .with_positioning(Positioning::new("platform", placement, ox, oy))
    }

    #[test]
    fn test_canvas_component_is_absolute() {
        let config = LayoutConfig::default();
        let components = vec![Component::new("cdn", "CDN", Zone::Public, 20.0, 170.0)];
        let boundaries = vec![platform()];
        let scene = Scene::new(&components, &boundaries, &config);

        assert_eq!(scene.frame(&components[0]), Frame::Canvas);
        assert_eq!(scene.absolute_position(&components[0]), Point::new(20.0, 170.0));
    }

    #[test]
    fn test_child_is_offset_by_anchor() {
        let config = LayoutConfig::default();
        let components =
            vec![Component::new("na", "NA", Zone::Public, 30.0, 30.0).in_boundary("platform")];
        let boundaries = vec![platform()];
        let scene = Scene::new(&components, &boundaries, &config);

        assert_eq!(scene.absolute_position(&components[0]), Point::new(290.0, 50.0));
        assert_eq!(
            scene.absolute_bounds(&components[0]),
            BoundingBox::new(290.0, 50.0, 180.0, 110.0)
        );
        assert_eq!(scene.local_bounds(&components[0]).origin(), Point::new(30.0, 30.0));
    }

    #[test]
    fn test_missing_parent_falls_back_to_canvas() {
        let config = LayoutConfig::default();
        let components =
            vec![Component::new("na", "NA", Zone::Public, 30.0, 30.0).in_boundary("gone")];
        let scene = Scene::new(&components, &[], &config);

        assert_eq!(scene.frame(&components[0]), Frame::Canvas);
        assert_eq!(scene.absolute_position(&components[0]), Point::new(30.0, 30.0));
    }

    #[test]
    fn test_anchored_placements() {
        let config = LayoutConfig::default();
        let boundaries = vec![platform()];
        let cases = [
            (Placement::Below, Point::new(290.0, 530.0)),
            (Placement::Right, Point::new(560.0, 60.0)),
            (Placement::Above, Point::new(290.0, -20.0)),
            (Placement::Left, Point::new(230.0, 60.0)),
        ];
        for (placement, expected) in cases {
            let components = vec![anchored(placement, 30.0, 40.0)];
            let scene = Scene::new(&components, &boundaries, &config);
            assert_eq!(scene.absolute_position(&components[0]), expected, "{placement}");
        }
    }

    #[test]
    fn test_anchor_tracks_effective_size() {
        let config = LayoutConfig::default();
        let boundaries = vec![platform()];
        let components = vec![
            anchored(Placement::Below, 30.0, 40.0),
            Component::new("eu", "EU", Zone::Public, 30.0, 780.0).in_boundary("platform"),
        ];
        let scene = Scene::new(&components, &boundaries, &config);

        // Effective height grows to 920, so the anchor moves down
        assert_eq!(scene.absolute_position(&components[0]), Point::new(290.0, 980.0));
    }

    #[test]
    fn test_anchored_to_missing_boundary_uses_fallback() {
        let config = LayoutConfig::default();
        let components = vec![anchored(Placement::Below, 30.0, 40.0)];
        let scene = Scene::new(&components, &[], &config);
        assert_eq!(scene.absolute_position(&components[0]), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_localize_inverts_absolute_position() {
        let config = LayoutConfig::default();
        let boundaries = vec![platform()];
        let components = vec![
            Component::new("cdn", "CDN", Zone::Public, 20.0, 170.0),
            Component::new("na", "NA", Zone::Public, 30.0, 30.0).in_boundary("platform"),
            anchored(Placement::Below, 30.0, 40.0),
            anchored(Placement::Above, 10.0, 60.0),
            anchored(Placement::Left, 200.0, 20.0),
            anchored(Placement::Right, 20.0, 0.0),
        ];
        let scene = Scene::new(&components, &boundaries, &config);

        let target = Point::new(300.0, 600.0);
        for component in &components {
            let moved = scene.localize(component, target);
            assert_eq!(scene.absolute_position(&moved), target, "{}", component.id);
        }
    }

    #[test]
    fn test_localize_child_stores_relative() {
        let config = LayoutConfig::default();
        let boundaries = vec![platform()];
        let components =
            vec![Component::new("na", "NA", Zone::Public, 30.0, 30.0).in_boundary("platform")];
        let scene = Scene::new(&components, &boundaries, &config);

        let moved = scene.localize(&components[0], Point::new(300.0, 200.0));
        assert_eq!(moved.position, Point::new(40.0, 180.0));
    }

    #[test]
    fn test_snap_local_snaps_offsets() {
        let snapped = snap_local(&anchored(Placement::Below, 33.0, 47.0), 20.0);
        let positioning = snapped.positioning.unwrap();
        assert_eq!((positioning.offset_x, positioning.offset_y), (40.0, 40.0));
        assert_eq!(snapped.position, Point::new(0.0, 0.0));
    }
}
