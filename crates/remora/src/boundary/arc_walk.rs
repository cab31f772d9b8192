//! Arc-length boundary search over a measured path.
//!
//! Working in arc length rather than the curve parameter keeps this method
//! agnostic to the curve family: the same walk handles cubics, step routes
//! and straight segments without per-family root-finding.

use super::{finish_intersection, travel_or_toward_center};
use crate::Tuning;
use crate::measure::MeasuredPath;
use crate::model::{BoundaryIntersection, Vec2};
use crate::rect::NodeRect;

/// Backward-walk iteration cap; geometric step growth covers any practical
/// path length well before this.
const WALK_BUDGET: usize = 256;
const BISECT_BUDGET: usize = 40;
/// Stop refining once the bracketed arc interval is below a quarter unit.
const ARC_RESOLUTION: f64 = 0.25;

/// Find where `path` first enters `rect`, walking backward from the path end.
///
/// Returns `None` when the path cannot be used for a boundary query at all
/// (non-finite or empty length, or an end point that is not inside the box);
/// callers fall back to the analytic solvers.
pub fn find_boundary_crossing(
    rect: &NodeRect,
    path: &dyn MeasuredPath,
    tuning: &Tuning,
) -> Option<BoundaryIntersection> {
    let total = path.total_length();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    let end = path.point_at_length(total);
    if !rect.contains(end) {
        return None;
    }

    // Bracket the crossing: sample backward from the end with geometrically
    // growing steps until a sample falls outside the box.
    let mut inside_s = total;
    let mut step = 1.0_f64;
    let mut bracket: Option<(f64, f64)> = None;
    for _ in 0..WALK_BUDGET {
        let s = (total - step).max(0.0);
        if !rect.contains(path.point_at_length(s)) {
            bracket = Some((s, inside_s));
            break;
        }
        inside_s = s;
        if s == 0.0 {
            break;
        }
        step *= 2.0;
    }

    let Some((mut lo, mut hi)) = bracket else {
        // Whole path inside the box (very short edges): treat the walk's end,
        // the path start, as the crossing.
        let start = path.point_at_length(0.0);
        let (exact, side) = rect.snap_to_nearest_side(start);
        let ahead = path.point_at_length(total.min(1.0));
        let travel = travel_or_toward_center(Vec2::between(start, ahead), start, rect);
        return Some(finish_intersection(rect, exact, side, travel, Some(0.0), tuning));
    };

    for _ in 0..BISECT_BUDGET {
        if hi - lo < ARC_RESOLUTION {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if rect.contains(path.point_at_length(mid)) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    // `hi` is the first arc length classified inside; snap its sample onto
    // the nearest boundary line.
    let sample = path.point_at_length(hi);
    let (side, _) = rect.nearest_side(sample);
    let exact = rect.snap_to_side(sample, side);
    let behind = path.point_at_length((hi - 1.0).max(0.0));
    let travel = travel_or_toward_center(Vec2::between(behind, sample), sample, rect);
    Some(finish_intersection(rect, exact, side, travel, Some(hi), tuning))
}
