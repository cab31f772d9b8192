//! Edge geometry planner.
//!
//! Composes the curve builders, the boundary solvers and the label logic into
//! one result per edge. The planner is total: every input, including NaN
//! coordinates and zero-length edges, resolves to a renderable result, since
//! a diagram must never blank out on bad geometry.

use crate::PlanOptions;
use crate::boundary;
use crate::curve::CubicBezier;
use crate::fanout;
use crate::label::should_wrap_label;
use crate::measure::MeasuredPath;
use crate::model::{
    ArrowheadPose, BoundaryIntersection, CurveKind, EdgeGeometryResult, EdgeSpec, Point, Side,
    Vec2,
};
use crate::pathd;
use crate::rect::NodeRect;

enum BasePath {
    Curve(CubicBezier),
    Polyline(Vec<Point>),
}

pub(crate) fn plan(spec: &EdgeSpec, options: &PlanOptions) -> EdgeGeometryResult {
    let tuning = &options.tuning;

    let target_box = spec
        .target_box
        .filter(|b| b.is_finite() && b.width > 0.0 && b.height > 0.0);
    // The path always runs into the box center; trimming is delivered
    // separately so the stroke can be shortened without new curve math.
    let end = target_box.map_or(spec.target, |b| b.center());

    if !spec.source.is_finite() || !end.is_finite() || spec.source.distance_to(end) <= 1e-9 {
        return degenerate_result(spec);
    }

    let base = build_base_path(spec, end, tuning);
    let path_d = match &base {
        BasePath::Curve(c) => pathd::cubic_path_d(c),
        BasePath::Polyline(pts) => pathd::polyline_path_d(pts),
    };

    let measured: Option<Box<dyn MeasuredPath>> = match options.path_measurer.measure(&path_d) {
        Ok(p) => Some(p),
        Err(err) => {
            tracing::debug!(error = %err, "path measurement unavailable; using analytic fallback");
            None
        }
    };

    let crossing = target_box
        .as_ref()
        .map(|rect| find_crossing(rect, &base, measured.as_deref(), spec.source, tuning));

    let arrowhead = match &crossing {
        Some(hit) => ArrowheadPose {
            position: hit.point,
            angle_deg: hit.tangent_angle_deg,
        },
        None => ArrowheadPose {
            position: end,
            angle_deg: final_direction(&base).angle_degrees(),
        },
    };

    let (label_anchor, label_offset) = label_placement(spec, &base, end, tuning);
    let (h_extent, v_extent) = path_extents(measured.as_deref(), spec.source, end);

    let wrap_label = spec.label.as_deref().is_some_and(|label| {
        should_wrap_label(
            label,
            h_extent,
            v_extent,
            options.text_measurer.as_ref(),
            &options.text_style,
            tuning.wrap_width_ratio,
        )
    });

    EdgeGeometryResult {
        path_d,
        label_anchor,
        label_offset,
        arrowhead,
        trim_length: crossing.as_ref().and_then(|c| c.arc_length_at_crossing),
        horizontal_extent: h_extent,
        wrap_label,
    }
}

fn degenerate_result(spec: &EdgeSpec) -> EdgeGeometryResult {
    let anchor = if spec.source.is_finite() {
        spec.source
    } else if spec.target.is_finite() {
        spec.target
    } else {
        Point::ZERO
    };
    EdgeGeometryResult {
        path_d: pathd::polyline_path_d(&[anchor, anchor]),
        label_anchor: anchor,
        label_offset: Vec2::ZERO,
        arrowhead: ArrowheadPose {
            position: anchor,
            angle_deg: 0.0,
        },
        trim_length: None,
        horizontal_extent: 0.0,
        wrap_label: false,
    }
}

fn build_base_path(spec: &EdgeSpec, end: Point, tuning: &crate::Tuning) -> BasePath {
    match spec.curve {
        CurveKind::Bezier => {
            let c1 = control_point(spec.source, spec.source_side, end, tuning.min_control_distance);
            let c2 = control_point(end, spec.target_side, spec.source, tuning.min_control_distance);
            let fan = fanout::control_point_offset(
                spec.parallel.as_ref(),
                spec.source,
                end,
                tuning.bend_amount,
            );
            BasePath::Curve(CubicBezier::new(
                spec.source,
                c1.translate(fan),
                c2.translate(fan),
                end,
            ))
        }
        CurveKind::Smoothstep | CurveKind::Step => {
            BasePath::Polyline(step_route(spec.source, spec.source_side, end))
        }
        CurveKind::Straight => BasePath::Polyline(vec![spec.source, end]),
    }
}

/// Control point extended from an endpoint along its side's outward axis,
/// half the axis distance away but never less than `min_distance`, so short
/// edges still leave the node face perpendicular.
fn control_point(anchor: Point, side: Side, opposite: Point, min_distance: f64) -> Point {
    let axis_delta = if side.is_horizontal() {
        (opposite.x - anchor.x).abs()
    } else {
        (opposite.y - anchor.y).abs()
    };
    let reach = (axis_delta * 0.5).max(min_distance);
    anchor.translate(side.outward().scaled(reach))
}

/// One canonical orthogonal route through the midline on the source side's
/// axis. Step and smoothstep edges share it; parallel edges of these kinds
/// overlap on purpose and separate through their labels instead.
fn step_route(source: Point, source_side: Side, end: Point) -> Vec<Point> {
    let mut pts = if source_side.is_horizontal() {
        let mid_x = (source.x + end.x) / 2.0;
        vec![
            source,
            Point::new(mid_x, source.y),
            Point::new(mid_x, end.y),
            end,
        ]
    } else {
        let mid_y = (source.y + end.y) / 2.0;
        vec![
            source,
            Point::new(source.x, mid_y),
            Point::new(end.x, mid_y),
            end,
        ]
    };
    pts.dedup_by(|a, b| (a.x - b.x).abs() <= 1e-9 && (a.y - b.y).abs() <= 1e-9);
    pts
}

/// Strategy chain: measured arc walk, then the curve-family solver, then the
/// closed-form chord intersection, which is total.
fn find_crossing(
    rect: &NodeRect,
    base: &BasePath,
    measured: Option<&dyn MeasuredPath>,
    source: Point,
    tuning: &crate::Tuning,
) -> BoundaryIntersection {
    if let Some(path) = measured {
        if let Some(hit) = boundary::find_boundary_crossing(rect, path, tuning) {
            return hit;
        }
        tracing::trace!("arc-length walk found no crossing; trying control-point strategies");
    }

    match base {
        BasePath::Curve(c) => {
            if let Some(hit) = boundary::find_bezier_boundary_crossing(rect, c, tuning) {
                return hit;
            }
            tracing::trace!("control-point solver found no crossing; using the chord");
            let mut hit = boundary::line_rect_intersection(rect, c.p0, c.p3, tuning);
            // The chord's arc length says nothing about the curve's.
            hit.arc_length_at_crossing = None;
            hit
        }
        BasePath::Polyline(pts) => {
            let n = pts.len();
            let from = if n >= 2 { pts[n - 2] } else { source };
            let to = pts.last().copied().unwrap_or(source);
            let mut hit = boundary::line_rect_intersection(rect, from, to, tuning);
            // Shift the segment-local arc length onto the whole route.
            let prefix: f64 = pts
                .windows(2)
                .take(n.saturating_sub(2))
                .map(|w| w[0].distance_to(w[1]))
                .sum();
            hit.arc_length_at_crossing = hit.arc_length_at_crossing.map(|a| a + prefix);
            hit
        }
    }
}

fn final_direction(base: &BasePath) -> Vec2 {
    match base {
        BasePath::Curve(c) => {
            let t = c.tangent_at(1.0);
            if t.normalized().is_some() {
                t
            } else {
                Vec2::between(c.p0, c.p3)
            }
        }
        BasePath::Polyline(pts) => match pts.len() {
            0 | 1 => Vec2::ZERO,
            n => Vec2::between(pts[n - 2], pts[n - 1]),
        },
    }
}

fn label_placement(
    spec: &EdgeSpec,
    base: &BasePath,
    end: Point,
    tuning: &crate::Tuning,
) -> (Point, Vec2) {
    match base {
        // The fan-out already moved the control points, so the midpoint of
        // the offset curve fans with its edge.
        BasePath::Curve(c) => (c.midpoint(), Vec2::ZERO),
        BasePath::Polyline(pts) => {
            let anchor = polyline_half_point(pts).unwrap_or_else(|| spec.source.midpoint(end));
            let offset = fanout::label_offset(
                spec.parallel.as_ref(),
                spec.source,
                end,
                tuning.label_fan_spacing,
            );
            (anchor, offset)
        }
    }
}

fn polyline_half_point(pts: &[Point]) -> Option<Point> {
    let total: f64 = pts.windows(2).map(|w| w[0].distance_to(w[1])).sum();
    if !(total.is_finite() && total > 0.0) {
        return None;
    }
    let mut remaining = total / 2.0;
    for w in pts.windows(2) {
        let seg = w[0].distance_to(w[1]);
        if seg >= remaining {
            let t = if seg > 0.0 { remaining / seg } else { 0.0 };
            return Some(Point::new(
                w[0].x + (w[1].x - w[0].x) * t,
                w[0].y + (w[1].y - w[0].y) * t,
            ));
        }
        remaining -= seg;
    }
    pts.last().copied()
}

/// Bounding-box extents of the rendered path, from boundary sampling when a
/// measured path is available, else the endpoint deltas.
fn path_extents(measured: Option<&dyn MeasuredPath>, source: Point, end: Point) -> (f64, f64) {
    if let Some(path) = measured {
        let total = path.total_length();
        if total.is_finite() && total > 0.0 {
            let mut min_x = f64::INFINITY;
            let mut min_y = f64::INFINITY;
            let mut max_x = f64::NEG_INFINITY;
            let mut max_y = f64::NEG_INFINITY;
            const SAMPLES: usize = 32;
            for i in 0..=SAMPLES {
                let p = path.point_at_length(total * i as f64 / SAMPLES as f64);
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
            if min_x.is_finite() && max_x.is_finite() {
                return (max_x - min_x, max_y - min_y);
            }
        }
    }
    ((end.x - source.x).abs(), (end.y - source.y).abs())
}
