//! Arc-length path measurement.
//!
//! Browser hosts answer boundary queries with the native
//! `getTotalLength()`/`getPointAtLength()` pair; headless hosts get the same
//! contract from [`FlattenedPathMeasurer`], which re-parses the emitted path
//! data and serves arc-length queries from a flattened polyline. Abstracting
//! the capability as a trait turns the sampler-unavailable fallback into
//! ordinary strategy selection.

use crate::curve::CubicBezier;
use crate::model::Point;
use svgtypes::{PathParser, PathSegment};

/// A path that can be sampled by arc length.
pub trait MeasuredPath {
    fn total_length(&self) -> f64;
    /// Position at arc length `s`; implementations clamp `s` into
    /// `[0, total_length]`.
    fn point_at_length(&self, s: f64) -> Point;
}

#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    #[error("path contains no drawable segments")]
    EmptyPath,
    #[error("unsupported path segment: {0}")]
    UnsupportedSegment(&'static str),
    #[error("malformed path data: {0}")]
    Parse(String),
}

/// Measurement capability injected into the planner.
pub trait PathMeasurer {
    fn measure(&self, path_d: &str) -> Result<Box<dyn MeasuredPath>, MeasureError>;
}

/// Portable measurer: flattens curve segments into chords with
/// length-proportional subdivision and answers queries from the cumulative
/// chord table.
#[derive(Debug, Clone, Default)]
pub struct FlattenedPathMeasurer {
    /// Fixed subdivision count per curve segment; 0 picks a count
    /// proportional to the control-polygon length.
    pub curve_subdivisions: usize,
}

struct FlattenedPath {
    points: Vec<Point>,
    cumulative: Vec<f64>,
}

impl MeasuredPath for FlattenedPath {
    fn total_length(&self) -> f64 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    fn point_at_length(&self, s: f64) -> Point {
        let total = self.total_length();
        let s = s.clamp(0.0, total);
        // First vertex whose cumulative length reaches `s`.
        let idx = self.cumulative.partition_point(|&c| c < s);
        if idx == 0 {
            return self.points[0];
        }
        let prev = self.cumulative[idx - 1];
        let span = self.cumulative[idx] - prev;
        let a = self.points[idx - 1];
        let b = self.points[idx];
        if span <= 1e-12 {
            return b;
        }
        let t = (s - prev) / span;
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl FlattenedPath {
    fn push(&mut self, p: Point, jump: bool) {
        if let Some(last) = self.points.last() {
            let d = if jump { 0.0 } else { last.distance_to(p) };
            let c = self.cumulative.last().copied().unwrap_or(0.0) + d;
            self.points.push(p);
            self.cumulative.push(c);
        } else {
            self.points.push(p);
            self.cumulative.push(0.0);
        }
    }

    fn push_cubic(&mut self, p0: Point, p1: Point, p2: Point, p3: Point, subdivisions: usize) {
        let c = CubicBezier::new(p0, p1, p2, p3);
        for i in 1..=subdivisions {
            let t = i as f64 / subdivisions as f64;
            self.push(c.point_at(t), false);
        }
    }
}

impl FlattenedPathMeasurer {
    fn subdivisions_for(&self, control_polygon_len: f64) -> usize {
        if self.curve_subdivisions > 0 {
            return self.curve_subdivisions;
        }
        ((control_polygon_len / 2.0).ceil() as usize).clamp(16, 256)
    }
}

impl PathMeasurer for FlattenedPathMeasurer {
    fn measure(&self, path_d: &str) -> Result<Box<dyn MeasuredPath>, MeasureError> {
        let mut flat = FlattenedPath {
            points: Vec::new(),
            cumulative: Vec::new(),
        };

        let mut current = Point::ZERO;
        let mut subpath_start = Point::ZERO;
        // Previous cubic/quadratic control point, for smooth shorthands.
        let mut prev_cubic_ctrl: Option<Point> = None;
        let mut prev_quad_ctrl: Option<Point> = None;

        for seg in PathParser::from(path_d) {
            let seg = seg.map_err(|e| MeasureError::Parse(e.to_string()))?;
            let origin = current;
            let resolve = move |x: f64, y: f64, is_abs: bool| {
                if is_abs {
                    Point::new(x, y)
                } else {
                    Point::new(origin.x + x, origin.y + y)
                }
            };
            match seg {
                PathSegment::MoveTo { abs, x, y } => {
                    let p = resolve(x, y, abs);
                    flat.push(p, true);
                    current = p;
                    subpath_start = p;
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                PathSegment::LineTo { abs, x, y } => {
                    let p = resolve(x, y, abs);
                    flat.push(p, false);
                    current = p;
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                PathSegment::HorizontalLineTo { abs, x } => {
                    let p = if abs {
                        Point::new(x, current.y)
                    } else {
                        Point::new(current.x + x, current.y)
                    };
                    flat.push(p, false);
                    current = p;
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                PathSegment::VerticalLineTo { abs, y } => {
                    let p = if abs {
                        Point::new(current.x, y)
                    } else {
                        Point::new(current.x, current.y + y)
                    };
                    flat.push(p, false);
                    current = p;
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                PathSegment::CurveTo {
                    abs,
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let c1 = resolve(x1, y1, abs);
                    let c2 = resolve(x2, y2, abs);
                    let p = resolve(x, y, abs);
                    let poly = current.distance_to(c1) + c1.distance_to(c2) + c2.distance_to(p);
                    flat.push_cubic(current, c1, c2, p, self.subdivisions_for(poly));
                    prev_cubic_ctrl = Some(c2);
                    prev_quad_ctrl = None;
                    current = p;
                }
                PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                    let c1 = match prev_cubic_ctrl {
                        Some(c) => Point::new(2.0 * current.x - c.x, 2.0 * current.y - c.y),
                        None => current,
                    };
                    let c2 = resolve(x2, y2, abs);
                    let p = resolve(x, y, abs);
                    let poly = current.distance_to(c1) + c1.distance_to(c2) + c2.distance_to(p);
                    flat.push_cubic(current, c1, c2, p, self.subdivisions_for(poly));
                    prev_cubic_ctrl = Some(c2);
                    prev_quad_ctrl = None;
                    current = p;
                }
                PathSegment::Quadratic { abs, x1, y1, x, y } => {
                    let q = resolve(x1, y1, abs);
                    let p = resolve(x, y, abs);
                    let (c1, c2) = quadratic_to_cubic(current, q, p);
                    let poly = current.distance_to(c1) + c1.distance_to(c2) + c2.distance_to(p);
                    flat.push_cubic(current, c1, c2, p, self.subdivisions_for(poly));
                    prev_quad_ctrl = Some(q);
                    prev_cubic_ctrl = None;
                    current = p;
                }
                PathSegment::SmoothQuadratic { abs, x, y } => {
                    let q = match prev_quad_ctrl {
                        Some(c) => Point::new(2.0 * current.x - c.x, 2.0 * current.y - c.y),
                        None => current,
                    };
                    let p = resolve(x, y, abs);
                    let (c1, c2) = quadratic_to_cubic(current, q, p);
                    let poly = current.distance_to(c1) + c1.distance_to(c2) + c2.distance_to(p);
                    flat.push_cubic(current, c1, c2, p, self.subdivisions_for(poly));
                    prev_quad_ctrl = Some(q);
                    prev_cubic_ctrl = None;
                    current = p;
                }
                PathSegment::EllipticalArc { .. } => {
                    return Err(MeasureError::UnsupportedSegment("elliptical arc"));
                }
                PathSegment::ClosePath { .. } => {
                    flat.push(subpath_start, false);
                    current = subpath_start;
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
            }
        }

        if flat.points.len() < 2 {
            return Err(MeasureError::EmptyPath);
        }
        Ok(Box::new(flat))
    }
}

/// Exact degree elevation of a quadratic segment.
fn quadratic_to_cubic(p0: Point, q: Point, p3: Point) -> (Point, Point) {
    (
        Point::new(p0.x + 2.0 / 3.0 * (q.x - p0.x), p0.y + 2.0 / 3.0 * (q.y - p0.y)),
        Point::new(p3.x + 2.0 / 3.0 * (q.x - p3.x), p3.y + 2.0 / 3.0 * (q.y - p3.y)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_a_straight_segment_exactly() {
        let m = FlattenedPathMeasurer::default();
        let p = m.measure("M0,0L30,40").expect("measurable");
        assert!((p.total_length() - 50.0).abs() < 1e-9);
        let mid = p.point_at_length(25.0);
        assert!((mid.x - 15.0).abs() < 1e-9);
        assert!((mid.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_queries_outside_the_path() {
        let m = FlattenedPathMeasurer::default();
        let p = m.measure("M0,0L10,0").expect("measurable");
        assert_eq!(p.point_at_length(-5.0), Point::new(0.0, 0.0));
        assert_eq!(p.point_at_length(99.0), Point::new(10.0, 0.0));
    }

    #[test]
    fn cubic_length_approaches_the_true_arc_length() {
        // Straight-line control polygon: arc length equals the chord.
        let m = FlattenedPathMeasurer::default();
        let p = m.measure("M0,0C10,10,20,20,30,30").expect("measurable");
        assert!((p.total_length() - 30.0 * std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn relative_commands_accumulate_from_the_current_point() {
        let m = FlattenedPathMeasurer::default();
        let p = m.measure("M10,10l10,0l0,10").expect("measurable");
        assert!((p.total_length() - 20.0).abs() < 1e-9);
        assert_eq!(p.point_at_length(20.0), Point::new(20.0, 20.0));
    }

    #[test]
    fn rejects_unsupported_and_empty_paths() {
        let m = FlattenedPathMeasurer::default();
        assert!(matches!(
            m.measure("M0,0A5,5 0 0 1 10,10"),
            Err(MeasureError::UnsupportedSegment(_))
        ));
        assert!(matches!(m.measure("M3,4"), Err(MeasureError::EmptyPath)));
        assert!(m.measure("garbage").is_err());
    }
}
