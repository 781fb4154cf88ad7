//! Boundary auto-sizing
//!
//! A boundary's effective size is derived from its currently visible children
//! every time it is asked for; it is never stored.

use super::config::LayoutConfig;
use super::types::{BoundingBox, Size};
use crate::model::{Boundary, Component};

/// Effective size of `boundary` given the current component set.
///
/// With no visible children this is the declared minimum. Otherwise each axis
/// grows to the furthest child edge plus padding, but never below the
/// declared minimum.
pub fn effective_size(
    boundary: &Boundary,
    components: &[Component],
    config: &LayoutConfig,
) -> Size {
    let card = config.component_size();
    let padding = boundary.padding.unwrap_or(config.boundary_padding);

    let mut children = components
        .iter()
        .filter(|c| c.visible && c.has_parent(&boundary.id))
        .peekable();

    if children.peek().is_none() {
        return Size::new(boundary.width, boundary.height);
    }

    let (max_right, max_bottom) = children.fold(
        (f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(right, bottom), c| {
            (
                right.max(c.position.x + card.width),
                bottom.max(c.position.y + card.height),
            )
        },
    );

    Size::new(
        (max_right + padding).max(boundary.width),
        (max_bottom + padding).max(boundary.height),
    )
}

/// Absolute box of `boundary` at its effective size
pub fn effective_box(
    boundary: &Boundary,
    components: &[Component],
    config: &LayoutConfig,
) -> BoundingBox {
    BoundingBox::from_origin(boundary.anchor(), effective_size(boundary, components, config))
}
