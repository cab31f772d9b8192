//! Boundary-crossing solvers.
//!
//! Three strategies share one output shape: the arc-length walk over a
//! measured path (primary, curve-type-agnostic), the control-point solver
//! for cubics (used when measurement is unavailable or fails), and the
//! closed-form line/rectangle intersection. All of them finish through the
//! same per-side visual offset so arrowheads land identically no matter which
//! strategy produced the crossing.

use crate::Tuning;
use crate::model::{BoundaryIntersection, Point, Side, Vec2};
use crate::rect::NodeRect;

mod arc_walk;
mod bezier_solve;
mod line;

pub use arc_walk::find_boundary_crossing;
pub use bezier_solve::find_bezier_boundary_crossing;
pub use line::line_rect_intersection;

/// Build the final intersection from an exact perimeter point and the travel
/// direction at the crossing.
///
/// The visual offset backs the point off along the incoming tangent (positive
/// values retreat toward the curve's own interior). The offset point is never
/// allowed to land strictly inside the rectangle; if the tuned offset would
/// push it in, it is projected back onto the entry side.
pub(crate) fn finish_intersection(
    rect: &NodeRect,
    exact: Point,
    side: Side,
    travel: Vec2,
    arc_length_at_crossing: Option<f64>,
    tuning: &Tuning,
) -> BoundaryIntersection {
    let point = match travel.normalized() {
        Some(unit) => {
            let candidate = exact.translate(unit.scaled(-tuning.side_offset(side)));
            if rect.strictly_contains(candidate) {
                rect.snap_to_side(candidate, side)
            } else {
                candidate
            }
        }
        None => exact,
    };
    BoundaryIntersection {
        point,
        exact_point: exact,
        tangent_angle_deg: travel.angle_degrees(),
        side,
        arc_length_at_crossing,
    }
}

/// Travel direction fallback for degenerate tangents: head for the box
/// center so the offset still backs away from the node.
pub(crate) fn travel_or_toward_center(travel: Vec2, at: Point, rect: &NodeRect) -> Vec2 {
    if travel.normalized().is_some() {
        travel
    } else {
        Vec2::between(at, rect.center())
    }
}
