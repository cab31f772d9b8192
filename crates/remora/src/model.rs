//! Value types exchanged with the host editor.
//!
//! Everything here is plain data: the engine recomputes all of it from scratch
//! on every call, so none of these types carry identity or interior mutability.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn translate(&self, v: Vec2) -> Point {
        Point {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

/// A free vector (tangent, offset). Kept distinct from [`Point`] so signatures
/// say which one they mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn between(from: Point, to: Point) -> Self {
        Self {
            x: to.x - from.x,
            y: to.y - from.y,
        }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector, or `None` for a degenerate input.
    pub fn normalized(&self) -> Option<Vec2> {
        let len = self.length();
        if !len.is_finite() || len <= 1e-12 {
            return None;
        }
        Some(Vec2 {
            x: self.x / len,
            y: self.y / len,
        })
    }

    /// Counter-clockwise perpendicular (`(-y, x)` in screen coordinates).
    pub fn perpendicular(&self) -> Vec2 {
        Vec2 {
            x: -self.y,
            y: self.x,
        }
    }

    pub fn scaled(&self, k: f64) -> Vec2 {
        Vec2 {
            x: self.x * k,
            y: self.y * k,
        }
    }

    pub fn angle_degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// A rectangle side, in screen coordinates (`Top` has the smallest y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Outward unit normal of this side on an axis-aligned rectangle.
    pub fn outward(&self) -> Vec2 {
        match self {
            Side::Top => Vec2::new(0.0, -1.0),
            Side::Bottom => Vec2::new(0.0, 1.0),
            Side::Left => Vec2::new(-1.0, 0.0),
            Side::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    Bezier,
    Smoothstep,
    Step,
    Straight,
}

/// Slot of one edge among `count` parallel edges sharing the same endpoint
/// pair. The middle slot (`count / 2`) stays on the unoffset route and the
/// rest fan out symmetrically around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelEdges {
    pub index: usize,
    pub count: usize,
}

impl ParallelEdges {
    pub fn middle(&self) -> usize {
        self.count / 2
    }

    /// Signed distance of this slot from the middle slot, in slot units.
    pub fn spread(&self) -> f64 {
        self.index as f64 - self.middle() as f64
    }
}

/// Per-edge input, constructed once per render by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: Point,
    pub target: Point,
    pub source_side: Side,
    pub target_side: Side,
    pub curve: CurveKind,
    /// Target node box; without it the path is returned untrimmed.
    #[serde(default)]
    pub target_box: Option<crate::rect::NodeRect>,
    #[serde(default)]
    pub parallel: Option<ParallelEdges>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Where a path first enters the target box.
///
/// `exact_point` is the unadjusted mathematical crossing on the rectangle
/// perimeter; `point` additionally carries the per-side visual offset that
/// compensates for rendered stroke thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryIntersection {
    pub point: Point,
    pub exact_point: Point,
    pub tangent_angle_deg: f64,
    pub side: Side,
    /// Arc length along the path at the crossing, when the solver can tell.
    #[serde(default)]
    pub arc_length_at_crossing: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowheadPose {
    pub position: Point,
    pub angle_deg: f64,
}

/// Final per-edge geometry handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometryResult {
    /// SVG path data; starts at the source anchor and ends at the target box
    /// center so the stroke can be shortened via `trim_length` without
    /// re-deriving curve math.
    pub path_d: String,
    pub label_anchor: Point,
    /// Extra perpendicular label displacement for fanned-out parallel edges.
    pub label_offset: Vec2,
    pub arrowhead: ArrowheadPose,
    /// Arc length at which the stroke should stop (boundary crossing).
    #[serde(default)]
    pub trim_length: Option<f64>,
    /// Horizontal width of the path's bounding box, used by the host when
    /// sizing label elements.
    pub horizontal_extent: f64,
    pub wrap_label: bool,
}
