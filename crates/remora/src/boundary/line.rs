//! Closed-form line/rectangle intersection.
//!
//! Used directly for straight edges and as the structural fallback for step
//! routes: the final route segment always runs into the box center, so a
//! parametric test against the four side lines is exact.

use super::{finish_intersection, travel_or_toward_center};
use crate::Tuning;
use crate::model::{BoundaryIntersection, Point, Side, Vec2};
use crate::rect::NodeRect;

/// Where the segment `from .. to` first crosses `rect`'s boundary.
///
/// Total: a degenerate segment (start at the center, non-finite input)
/// resolves to the center with angle 0, and a start already inside the box
/// resolves to the nearest-side snap of the start. `arc_length_at_crossing`
/// is measured from `from` along the segment.
pub fn line_rect_intersection(
    rect: &NodeRect,
    from: Point,
    to: Point,
    tuning: &Tuning,
) -> BoundaryIntersection {
    let center = rect.center();
    if !from.is_finite() || !to.is_finite() || from.distance_to(center) <= 1e-9 {
        return BoundaryIntersection {
            point: center,
            exact_point: center,
            tangent_angle_deg: 0.0,
            side: rect.nearest_side(center).0,
            arc_length_at_crossing: None,
        };
    }

    let delta = Vec2::between(from, to);
    let mut best: Option<(f64, Side)> = None;

    for side in [Side::Left, Side::Right] {
        if delta.x.abs() > 1e-12 {
            let t = (rect.side_coord(side) - from.x) / delta.x;
            if t > 0.0 && t <= 1.0 {
                let y = from.y + t * delta.y;
                if y >= rect.top() && y <= rect.bottom() && best.is_none_or(|(bt, _)| t < bt) {
                    best = Some((t, side));
                }
            }
        }
    }
    for side in [Side::Top, Side::Bottom] {
        if delta.y.abs() > 1e-12 {
            let t = (rect.side_coord(side) - from.y) / delta.y;
            if t > 0.0 && t <= 1.0 {
                let x = from.x + t * delta.x;
                if x >= rect.left() && x <= rect.right() && best.is_none_or(|(bt, _)| t < bt) {
                    best = Some((t, side));
                }
            }
        }
    }

    match best {
        Some((t, side)) => {
            let hit = Point::new(from.x + t * delta.x, from.y + t * delta.y);
            let exact = rect.snap_to_side(hit, side);
            finish_intersection(rect, exact, side, delta, Some(t * delta.length()), tuning)
        }
        None => {
            // Start already inside (or grazing a corner): nearest-side snap.
            let (exact, side) = rect.snap_to_nearest_side(from);
            let travel = travel_or_toward_center(delta, from, rect);
            finish_intersection(rect, exact, side, travel, Some(0.0), tuning)
        }
    }
}
