//! Control-point boundary search for cubic edges.
//!
//! Reproduces the arc-walk guarantees directly from the Bézier control
//! points, for hosts without path measurement. The crossing is located per
//! boundary line: bisect for the parameter where the curve meets the side's
//! coordinate, validate against the side's span, then polish with a
//! safeguarded Newton iteration on that single coordinate equation.

use super::{finish_intersection, travel_or_toward_center};
use crate::Tuning;
use crate::curve::CubicBezier;
use crate::model::{BoundaryIntersection, Point, Side};
use crate::rect::NodeRect;

const MIN_SAMPLES: usize = 500;
const MAX_SAMPLES: usize = 2000;
const SIDE_BISECT_BUDGET: usize = 50;
const SIDE_BISECT_EPS: f64 = 1e-4;
/// Span slack when collecting side candidates.
const SPAN_TOL: f64 = 1.0;
/// Tighter slack a candidate must survive to count as a real crossing.
const VALIDATE_TOL: f64 = 0.5;
const REFINE_BUDGET: usize = 100;
const REFINE_EPS: f64 = 1e-5;
/// Below this tangent magnitude Newton would divide by noise; bisect instead.
const FLAT_TANGENT: f64 = 1e-4;
const DRIFT_TOL: f64 = 1e-3;
const DRIFT_BUDGET: usize = 20;

#[derive(Debug, Clone, Copy)]
struct SideCandidate {
    t: f64,
    side: Side,
}

fn side_coord_of(p: Point, side: Side) -> f64 {
    match side {
        Side::Left | Side::Right => p.x,
        Side::Top | Side::Bottom => p.y,
    }
}

fn tangent_component(curve: &CubicBezier, t: f64, side: Side) -> f64 {
    let tangent = curve.tangent_at(t);
    match side {
        Side::Left | Side::Right => tangent.x,
        Side::Top | Side::Bottom => tangent.y,
    }
}

/// Find where `curve` first enters `rect`.
///
/// `None` means the curve never reaches the inside of the box; the caller
/// then falls through to the line intersection.
pub fn find_bezier_boundary_crossing(
    rect: &NodeRect,
    curve: &CubicBezier,
    tuning: &Tuning,
) -> Option<BoundaryIntersection> {
    if !rect.contains(curve.point_at(1.0)) {
        return None;
    }
    if rect.contains(curve.point_at(0.0)) {
        // No outside-to-inside transition exists; snap the start.
        return Some(start_snap(rect, curve, tuning));
    }

    let samples = ((curve.polyline_length(16) / 2.0) as usize).clamp(MIN_SAMPLES, MAX_SAMPLES);
    let step = 1.0 / samples as f64;

    // Coarse scan for the first outside-to-inside bracket.
    let mut bracket: Option<(f64, f64)> = None;
    let mut prev_t = 0.0;
    let mut prev_inside = false;
    for i in 1..=samples {
        let t = i as f64 * step;
        let inside = rect.contains(curve.point_at(t));
        if inside && !prev_inside {
            bracket = Some((prev_t, t));
            break;
        }
        prev_t = t;
        prev_inside = inside;
    }
    let (t_out, t_in) = bracket?;

    // Per-side parameter candidates inside the bracket.
    let mut candidates: Vec<SideCandidate> = Vec::new();
    for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
        let target = rect.side_coord(side);
        let Some(t) = bisect_to_coord(curve, t_out, t_in, side, target) else {
            continue;
        };
        let p = curve.point_at(t);
        let predecessor_outside = !rect.contains(curve.point_at((t - step).max(0.0)));
        if rect.within_side_span(side, p, SPAN_TOL) && predecessor_outside {
            candidates.push(SideCandidate { t, side });
        }
    }

    let mut validated: Vec<SideCandidate> = candidates
        .into_iter()
        .filter(|c| {
            let p = curve.point_at(c.t);
            (side_coord_of(p, c.side) - rect.side_coord(c.side)).abs() <= VALIDATE_TOL
                && rect.within_side_span(c.side, p, VALIDATE_TOL)
        })
        .collect();
    if validated.is_empty() {
        return Some(start_snap(rect, curve, tuning));
    }
    // First entry along the curve wins; later candidates belong to loops that
    // graze the box after the visual entry point.
    validated.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
    let chosen = validated[0];
    let side = chosen.side;
    let target = rect.side_coord(side);

    // Re-establish an outside/inside bracket around the candidate before the
    // Newton polish, so bisection steps stay safeguarded.
    let mut t_lo = (chosen.t - step).max(0.0);
    let mut t_hi = (chosen.t + step).min(1.0);
    let mut guard = 0usize;
    while guard < 64 && t_lo > 0.0 && rect.contains(curve.point_at(t_lo)) {
        t_lo = (t_lo - step).max(0.0);
        guard += 1;
    }
    while guard < 128 && t_hi < 1.0 && !rect.contains(curve.point_at(t_hi)) {
        t_hi = (t_hi + step).min(1.0);
        guard += 1;
    }

    let mut t_final = refine_coord_root(curve, side, target, chosen.t, t_lo, t_hi, REFINE_BUDGET);
    let mut p = curve.point_at(t_final);
    if (side_coord_of(p, side) - target).abs() > DRIFT_TOL {
        // Refinement drifted off the boundary line; re-solve the single
        // coordinate equation rather than accept the drift.
        t_final = refine_coord_root(curve, side, target, t_final, t_lo, t_hi, DRIFT_BUDGET);
        p = curve.point_at(t_final);
    }

    let exact = rect.snap_to_side(p, side);
    let travel = travel_or_toward_center(curve.tangent_at(t_final), p, rect);
    let arc = curve.arc_length_to(t_final, 64);
    Some(finish_intersection(rect, exact, side, travel, Some(arc), tuning))
}

/// Bisect `[t_lo, t_hi]` for the parameter where the curve meets `target` on
/// the given side's axis. `None` when the coordinate does not cross the side
/// line within the bracket.
fn bisect_to_coord(
    curve: &CubicBezier,
    t_lo: f64,
    t_hi: f64,
    side: Side,
    target: f64,
) -> Option<f64> {
    let mut lo = t_lo;
    let mut hi = t_hi;
    let mut g_lo = side_coord_of(curve.point_at(lo), side) - target;
    let g_hi = side_coord_of(curve.point_at(hi), side) - target;
    if g_lo == 0.0 {
        return Some(lo);
    }
    if g_hi == 0.0 {
        return Some(hi);
    }
    if g_lo * g_hi > 0.0 {
        return None;
    }
    for _ in 0..SIDE_BISECT_BUDGET {
        if hi - lo < SIDE_BISECT_EPS {
            break;
        }
        let mid = 0.5 * (lo + hi);
        let g_mid = side_coord_of(curve.point_at(mid), side) - target;
        if g_mid == 0.0 {
            return Some(mid);
        }
        if g_lo * g_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            g_lo = g_mid;
        }
    }
    Some(0.5 * (lo + hi))
}

/// Safeguarded Newton iteration on `coord(t) = target`: Newton steps while
/// the tangent component is trustworthy, bisection of the bracket otherwise.
fn refine_coord_root(
    curve: &CubicBezier,
    side: Side,
    target: f64,
    t_start: f64,
    bracket_lo: f64,
    bracket_hi: f64,
    budget: usize,
) -> f64 {
    let g = |t: f64| side_coord_of(curve.point_at(t), side) - target;
    let mut lo = bracket_lo;
    let mut hi = bracket_hi;
    let mut g_lo = g(lo);
    let bracketed = g_lo * g(hi) <= 0.0;
    let mut t = t_start.clamp(lo, hi);

    for _ in 0..budget {
        let g_t = g(t);
        if g_t.abs() <= REFINE_EPS {
            return t;
        }
        if bracketed {
            if g_lo * g_t <= 0.0 {
                hi = t;
            } else {
                lo = t;
                g_lo = g_t;
            }
            if hi - lo < REFINE_EPS {
                return 0.5 * (lo + hi);
            }
        }
        let d = tangent_component(curve, t, side);
        let mut next = if d.abs() < FLAT_TANGENT {
            0.5 * (lo + hi)
        } else {
            t - g_t / d
        };
        if !next.is_finite() || next < lo || next > hi {
            next = 0.5 * (lo + hi);
        }
        t = next;
    }
    t.clamp(0.0, 1.0)
}

/// Crossing fallback for curves that begin inside the box or whose candidates
/// fail validation: the first sample snapped to the nearest side.
fn start_snap(rect: &NodeRect, curve: &CubicBezier, tuning: &Tuning) -> BoundaryIntersection {
    let p0 = curve.point_at(0.0);
    let (exact, side) = rect.snap_to_nearest_side(p0);
    let travel = travel_or_toward_center(curve.tangent_at(0.0), p0, rect);
    finish_intersection(rect, exact, side, travel, Some(0.0), tuning)
}
