//! Plane geometry shared by layouts and the scene

use serde::{Deserialize, Serialize};

/// A point in graph space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Host element (canvas) dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Positive, finite dimensions
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Size {
    /// The fallback used when the host reports no size
    fn default() -> Self {
        Self::new(900.0, 600.0)
    }
}

/// Shape of a drawn edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgePath {
    /// Straight segment
    Line { from: Point, to: Point },
    /// Cubic Bézier curve
    Cubic {
        from: Point,
        c1: Point,
        c2: Point,
        to: Point,
    },
}

impl EdgePath {
    /// Horizontal link curve: both control points sit on the horizontal
    /// midpoint, so the curve leaves and enters horizontally
    pub fn horizontal_link(from: Point, to: Point) -> Self {
        let mid_x = (from.x + to.x) / 2.0;
        EdgePath::Cubic {
            from,
            c1: Point::new(mid_x, from.y),
            c2: Point::new(mid_x, to.y),
            to,
        }
    }

    pub fn from(&self) -> Point {
        match *self {
            EdgePath::Line { from, .. } | EdgePath::Cubic { from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            EdgePath::Line { to, .. } | EdgePath::Cubic { to, .. } => to,
        }
    }

    /// Move both endpoints, keeping the path kind
    pub fn with_endpoints(&self, from: Point, to: Point) -> Self {
        match self {
            EdgePath::Line { .. } => EdgePath::Line { from, to },
            EdgePath::Cubic { .. } => EdgePath::horizontal_link(from, to),
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match *self {
            EdgePath::Line { from, to } => vec![from, to],
            EdgePath::Cubic { from, c1, c2, to } => vec![from, c1, c2, to],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.points().iter().all(Point::is_finite)
    }

    /// SVG path data (`d` attribute)
    pub fn to_svg_path(&self) -> String {
        match *self {
            EdgePath::Line { from, to } => {
                format!("M {:.2} {:.2} L {:.2} {:.2}", from.x, from.y, to.x, to.y)
            }
            EdgePath::Cubic { from, c1, c2, to } => format!(
                "M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
                from.x, from.y, c1.x, c1.y, c2.x, c2.y, to.x, to.y
            ),
        }
    }
}
