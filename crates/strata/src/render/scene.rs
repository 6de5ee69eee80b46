//! Retained-mode scene
//!
//! A scene is everything one render pass draws: the background, one
//! top-level zoom transform and three layers in draw order (edges, nodes,
//! labels), plus an optional overlay message drawn outside the transform.

use crate::core::{EdgePath, Point, Size};

/// Minimum hit radius for small circles, in graph units
const MIN_HIT_RADIUS: f64 = 8.0;

/// Pan and zoom of the top-level group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            k: 1.0,
        }
    }
}

impl ZoomTransform {
    /// Graph space to screen space
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Screen space to graph space
    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// SVG `transform` attribute value
    pub fn to_svg_attr(&self) -> String {
        format!("translate({:.2},{:.2}) scale({})", self.x, self.y, self.k)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeShape {
    pub source: usize,
    pub target: usize,
    pub path: EdgePath,
    pub stroke: String,
    pub stroke_width: f64,
}

/// Paint shared by both node shapes
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeShape {
    Rect {
        index: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        style: NodeStyle,
    },
    Circle {
        index: usize,
        cx: f64,
        cy: f64,
        r: f64,
        style: NodeStyle,
    },
}

impl NodeShape {
    /// Model node index
    pub fn index(&self) -> usize {
        match self {
            NodeShape::Rect { index, .. } | NodeShape::Circle { index, .. } => *index,
        }
    }

    pub fn style(&self) -> &NodeStyle {
        match self {
            NodeShape::Rect { style, .. } | NodeShape::Circle { style, .. } => style,
        }
    }

    pub fn style_mut(&mut self) -> &mut NodeStyle {
        match self {
            NodeShape::Rect { style, .. } | NodeShape::Circle { style, .. } => style,
        }
    }

    pub fn center(&self) -> Point {
        match *self {
            NodeShape::Rect {
                x, y, width, height, ..
            } => Point::new(x + width / 2.0, y + height / 2.0),
            NodeShape::Circle { cx, cy, .. } => Point::new(cx, cy),
        }
    }

    /// Move the shape so its center lands on `to`
    pub fn set_center(&mut self, to: Point) {
        match self {
            NodeShape::Rect {
                x, y, width, height, ..
            } => {
                *x = to.x - *width / 2.0;
                *y = to.y - *height / 2.0;
            }
            NodeShape::Circle { cx, cy, .. } => {
                *cx = to.x;
                *cy = to.y;
            }
        }
    }

    /// Hit test in graph space
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            NodeShape::Rect {
                x, y, width, height, ..
            } => p.x >= x && p.x <= x + width && p.y >= y && p.y <= y + height,
            NodeShape::Circle { cx, cy, r, .. } => {
                Point::new(cx, cy).distance(p) <= r.max(MIN_HIT_RADIUS)
            }
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            NodeShape::Rect {
                x, y, width, height, ..
            } => [x, y, width, height].iter().all(|v| v.is_finite()),
            NodeShape::Circle { cx, cy, r, .. } => [cx, cy, r].iter().all(|v| v.is_finite()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    /// Node the label follows, if any
    pub node: Option<usize>,
    /// Offset from the node center
    pub offset: Point,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: TextAnchor,
    pub font_size: f64,
    pub fill: String,
    /// Baseline shift in em
    pub dy: f64,
    /// Vertically centered on `y`
    pub middle_baseline: bool,
}

/// Message drawn over the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub message: String,
    pub fill: String,
}

/// Everything one pass draws
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Size,
    pub background: String,
    pub font_family: String,
    pub transform: ZoomTransform,
    pub edges: Vec<EdgeShape>,
    pub nodes: Vec<NodeShape>,
    pub labels: Vec<TextShape>,
    pub overlay: Option<Overlay>,
}

impl Scene {
    /// A blank canvas
    pub fn empty(size: Size, background: impl Into<String>) -> Self {
        Self {
            size,
            background: background.into(),
            font_family: "Arial, sans-serif".to_string(),
            transform: ZoomTransform::default(),
            edges: Vec::new(),
            nodes: Vec::new(),
            labels: Vec::new(),
            overlay: None,
        }
    }

    /// A blank canvas carrying an error message
    pub fn error(
        size: Size,
        background: impl Into<String>,
        message: impl Into<String>,
        fill: impl Into<String>,
    ) -> Self {
        let mut scene = Self::empty(size, background);
        scene.overlay = Some(Overlay {
            message: message.into(),
            fill: fill.into(),
        });
        scene
    }

    /// Drop every drawable; idempotent
    pub fn clear(&mut self) {
        self.edges.clear();
        self.nodes.clear();
        self.labels.clear();
        self.overlay = None;
        self.transform = ZoomTransform::default();
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty() && self.labels.is_empty()
    }

    /// Shape drawn for a model node
    pub fn node_shape(&self, index: usize) -> Option<&NodeShape> {
        self.nodes.iter().find(|n| n.index() == index)
    }

    /// Topmost node under a graph-space point
    pub fn node_at(&self, p: Point) -> Option<usize> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.contains(p))
            .map(NodeShape::index)
    }

    /// Labels attached to a model node
    pub fn labels_for(&self, index: usize) -> impl Iterator<Item = &TextShape> {
        self.labels.iter().filter(move |l| l.node == Some(index))
    }
}
