//! Cubic Bézier primitives.
//!
//! Straight polynomial evaluation; no division anywhere, so the endpoints
//! t = 0 and t = 1 are exact.

use crate::model::{Point, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Position at `t`. Callers clamp `t` into `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point {
            x: a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            y: a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        }
    }

    /// First derivative at `t`; points in the direction of travel.
    pub fn tangent_at(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        let a = 3.0 * mt * mt;
        let b = 6.0 * mt * t;
        let c = 3.0 * t * t;
        Vec2 {
            x: a * (self.p1.x - self.p0.x) + b * (self.p2.x - self.p1.x) + c * (self.p3.x - self.p2.x),
            y: a * (self.p1.y - self.p0.y) + b * (self.p2.y - self.p1.y) + c * (self.p3.y - self.p2.y),
        }
    }

    /// Label anchor for curved edges.
    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// Chord-sum length estimate over `samples` uniform parameter steps.
    pub fn polyline_length(&self, samples: usize) -> f64 {
        self.arc_length_to(1.0, samples)
    }

    /// Chord-sum arc length from the curve start to parameter `t_end`.
    pub(crate) fn arc_length_to(&self, t_end: f64, samples: usize) -> f64 {
        let samples = samples.max(1);
        let t_end = t_end.clamp(0.0, 1.0);
        let mut len = 0.0;
        let mut prev = self.point_at(0.0);
        for i in 1..=samples {
            let t = t_end * i as f64 / samples as f64;
            let p = self.point_at(t);
            len += prev.distance_to(p);
            prev = p;
        }
        len
    }
}
