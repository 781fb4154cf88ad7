//! Core geometric types for the layout engine

/// A 2D point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by another point treated as a vector
    pub fn translate(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }

    /// Vector from `origin` to this point
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    /// Round both coordinates half-up to whole pixels
    pub fn rounded(self) -> Point {
        Point::new(round_half_up(self.x), round_half_up(self.y))
    }
}

/// Width and height of a box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Move the box so its top-left corner is at `origin`
    pub fn moved_to(&self, origin: Point) -> BoundingBox {
        BoundingBox::new(origin.x, origin.y, self.width, self.height)
    }

    /// Grow the box by `margin` on every side
    pub fn inflate(&self, margin: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Check if `other` lies entirely inside this box (edges may touch)
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this bounding box intersects another; touching edges do not count
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlap test with a spacing buffer.
    ///
    /// Both boxes are inflated by half of `spacing`, so two boxes closer than
    /// `spacing` on both axes count as overlapping even when their raw
    /// extents are disjoint.
    pub fn overlaps_with_spacing(&self, other: &BoundingBox, spacing: f64) -> bool {
        let half = spacing / 2.0;
        self.inflate(half).intersects(&other.inflate(half))
    }
}

/// Round to the nearest integer, halves toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
