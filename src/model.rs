//! Data model for deployment diagrams
//!
//! Components, boundary boxes and connections as supplied by a preset.
//! Everything here is plain data; positions are interpreted by
//! [`crate::layout::Scene`].

use std::fmt;

use crate::layout::types::Point;

/// One of the two canvas half-planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Zone {
    /// Internet-facing side, left of the zone split
    Public,
    /// Private network side, right of the zone split
    Private,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Public => write!(f, "public"),
            Zone::Private => write!(f, "private"),
        }
    }
}

/// Which edge of a boundary an anchored component tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Below,
    Above,
    Left,
    Right,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Below => write!(f, "below"),
            Placement::Above => write!(f, "above"),
            Placement::Left => write!(f, "left"),
            Placement::Right => write!(f, "right"),
        }
    }
}

/// Places a component relative to a boundary edge without making it a child
#[derive(Debug, Clone, PartialEq)]
pub struct Positioning {
    pub relative_to: String,
    pub placement: Placement,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Positioning {
    pub fn new(
        relative_to: impl Into<String>,
        placement: Placement,
        offset_x: f64,
        offset_y: f64,
    ) -> Self {
        Self {
            relative_to: relative_to.into(),
            placement,
            offset_x,
            offset_y,
        }
    }
}

/// A card on the diagram
///
/// `position` is absolute when `parent_boundary` is `None`, and relative to
/// the parent's top-left corner otherwise. When `positioning` applies, the
/// stored position is only a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub position: Point,
    pub visible: bool,
    pub zone: Zone,
    pub parent_boundary: Option<String>,
    pub positioning: Option<Positioning>,
}

impl Component {
    /// Create a visible component with no parent
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        zone: Zone,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: String::new(),
            description: String::new(),
            position: Point::new(x, y),
            visible: true,
            zone,
            parent_boundary: None,
            positioning: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Make this component a child of `boundary`; `position` becomes relative
    pub fn in_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.parent_boundary = Some(boundary.into());
        self
    }

    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = Some(positioning);
        self
    }

    pub fn has_parent(&self, boundary_id: &str) -> bool {
        self.parent_boundary.as_deref() == Some(boundary_id)
    }
}

/// Declarative must-contain / must-exclude constraints on a boundary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContainmentRules {
    pub must_contain: Vec<String>,
    pub must_exclude: Vec<String>,
    pub description: Option<String>,
}

impl ContainmentRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must_contain<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must_contain.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn must_exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must_exclude.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether `component_id` is required to live inside the boundary
    pub fn requires(&self, component_id: &str) -> bool {
        self.must_contain.iter().any(|id| id == component_id)
    }

    /// Whether `component_id` is forbidden from living inside the boundary
    pub fn excludes(&self, component_id: &str) -> bool {
        self.must_exclude.iter().any(|id| id == component_id)
    }
}

/// A labeled box grouping components
///
/// `x`/`y` are absolute and never moved by layout. `width`/`height` are the
/// declared minimum; see [`crate::layout::sizing::effective_size`].
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Inner padding; `None` uses [`crate::LayoutConfig::boundary_padding`]
    pub padding: Option<f64>,
    pub zone: Zone,
    pub containment_rules: Option<ContainmentRules>,
}

impl Boundary {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        zone: Zone,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x,
            y,
            width,
            height,
            padding: None,
            zone,
            containment_rules: None,
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_rules(mut self, rules: ContainmentRules) -> Self {
        self.containment_rules = Some(rules);
        self
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A directed edge between two components
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
