//! Parallel-edge fan-out.
//!
//! Edges sharing an endpoint pair separate by pushing their control points
//! (curved edges) or just their labels (step/straight edges) along the unit
//! perpendicular of the source-to-target vector. Slots fan symmetrically around
//! the middle slot, which stays on the unoffset route.

use crate::model::{ParallelEdges, Point, Vec2};

/// Unit perpendicular of the source-to-target direction, or `None` for a
/// zero-length edge.
pub(crate) fn perpendicular_unit(source: Point, target: Point) -> Option<Vec2> {
    Vec2::between(source, target).normalized().map(|u| u.perpendicular())
}

/// Offset added to both control points of a curved edge.
pub(crate) fn control_point_offset(
    parallel: Option<&ParallelEdges>,
    source: Point,
    target: Point,
    bend_amount: f64,
) -> Vec2 {
    fan_offset(parallel, source, target, bend_amount)
}

/// Offset applied to the label only, for edge kinds that keep one canonical
/// route.
pub(crate) fn label_offset(
    parallel: Option<&ParallelEdges>,
    source: Point,
    target: Point,
    spacing: f64,
) -> Vec2 {
    fan_offset(parallel, source, target, spacing)
}

fn fan_offset(
    parallel: Option<&ParallelEdges>,
    source: Point,
    target: Point,
    amount_per_slot: f64,
) -> Vec2 {
    let Some(parallel) = parallel else {
        return Vec2::ZERO;
    };
    if parallel.count < 2 {
        return Vec2::ZERO;
    }
    let Some(perp) = perpendicular_unit(source, target) else {
        return Vec2::ZERO;
    };
    perp.scaled(parallel.spread() * amount_per_slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_fan_symmetrically_around_the_middle() {
        let s = Point::new(0.0, 0.0);
        let t = Point::new(100.0, 0.0);
        let offsets: Vec<Vec2> = (0..3)
            .map(|index| {
                control_point_offset(Some(&ParallelEdges { index, count: 3 }), s, t, 50.0)
            })
            .collect();
        assert_eq!(offsets[1], Vec2::ZERO);
        assert!((offsets[0].x + offsets[2].x).abs() < 1e-12);
        assert!((offsets[0].y + offsets[2].y).abs() < 1e-12);
        assert!((offsets[0].y.abs() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn single_edge_gets_no_offset() {
        let s = Point::new(0.0, 0.0);
        let t = Point::new(100.0, 0.0);
        assert_eq!(
            control_point_offset(Some(&ParallelEdges { index: 0, count: 1 }), s, t, 50.0),
            Vec2::ZERO
        );
        assert_eq!(control_point_offset(None, s, t, 50.0), Vec2::ZERO);
    }

    #[test]
    fn zero_length_edge_cannot_fan() {
        let p = Point::new(5.0, 5.0);
        assert_eq!(
            control_point_offset(Some(&ParallelEdges { index: 0, count: 2 }), p, p, 50.0),
            Vec2::ZERO
        );
    }
}
