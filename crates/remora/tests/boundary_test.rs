use remora::boundary::{find_bezier_boundary_crossing, find_boundary_crossing};
use remora::measure::{FlattenedPathMeasurer, PathMeasurer};
use remora::{CubicBezier, NodeRect, Point, Side, Tuning};

fn measurer() -> FlattenedPathMeasurer {
    FlattenedPathMeasurer::default()
}

fn cubic_d(c: &CubicBezier) -> String {
    format!(
        "M{},{}C{},{},{},{},{},{}",
        c.p0.x, c.p0.y, c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y
    )
}

/// Curves whose end point sits inside the box, from assorted approach
/// directions.
fn cases() -> Vec<(NodeRect, CubicBezier)> {
    vec![
        (
            NodeRect::new(100.0, 100.0, 120.0, 50.0),
            CubicBezier::new(
                Point::new(0.0, 0.0),
                Point::new(40.0, 0.0),
                Point::new(100.0, 40.0),
                Point::new(100.0, 100.0),
            ),
        ),
        (
            NodeRect::new(0.0, 0.0, 80.0, 80.0),
            CubicBezier::new(
                Point::new(200.0, 0.0),
                Point::new(120.0, -60.0),
                Point::new(60.0, 30.0),
                Point::new(0.0, 0.0),
            ),
        ),
        (
            NodeRect::new(-50.0, 200.0, 60.0, 140.0),
            CubicBezier::new(
                Point::new(100.0, -20.0),
                Point::new(100.0, 120.0),
                Point::new(-50.0, 40.0),
                Point::new(-50.0, 200.0),
            ),
        ),
        (
            NodeRect::new(10.0, 10.0, 30.0, 30.0),
            CubicBezier::new(
                Point::new(10.0, 300.0),
                Point::new(10.0, 200.0),
                Point::new(10.0, 100.0),
                Point::new(10.0, 10.0),
            ),
        ),
    ]
}

#[test]
fn arc_walk_crossing_adheres_to_the_perimeter() {
    let m = measurer();
    for (rect, curve) in cases() {
        let path = m.measure(&cubic_d(&curve)).expect("measurable");
        let hit = find_boundary_crossing(&rect, path.as_ref(), &Tuning::default())
            .expect("end point is inside the box");
        assert!(
            rect.perimeter_distance(hit.exact_point) <= 0.5,
            "exact point {:?} drifted off the perimeter of {rect:?}",
            hit.exact_point
        );
    }
}

#[test]
fn offset_point_never_penetrates_the_box() {
    let m = measurer();
    for (rect, curve) in cases() {
        let path = m.measure(&cubic_d(&curve)).expect("measurable");
        let hit = find_boundary_crossing(&rect, path.as_ref(), &Tuning::default())
            .expect("end point is inside the box");
        assert!(
            !rect.strictly_contains(hit.point),
            "offset point {:?} fell inside {rect:?}",
            hit.point
        );
        let analytic = find_bezier_boundary_crossing(&rect, &curve, &Tuning::default())
            .expect("end point is inside the box");
        assert!(!rect.strictly_contains(analytic.point));
    }
}

#[test]
fn analytic_solver_agrees_with_the_arc_walk() {
    let m = measurer();
    for (rect, curve) in cases() {
        let path = m.measure(&cubic_d(&curve)).expect("measurable");
        let native = find_boundary_crossing(&rect, path.as_ref(), &Tuning::default())
            .expect("end point is inside the box");
        let analytic = find_bezier_boundary_crossing(&rect, &curve, &Tuning::default())
            .expect("end point is inside the box");
        let dist = native.exact_point.distance_to(analytic.exact_point);
        assert!(
            dist <= 1.0,
            "strategies disagree by {dist} on {rect:?}: {:?} vs {:?}",
            native.exact_point,
            analytic.exact_point
        );
    }
}

#[test]
fn solvers_are_deterministic() {
    let (rect, curve) = cases().remove(0);
    let m = measurer();
    let a = {
        let path = m.measure(&cubic_d(&curve)).expect("measurable");
        find_boundary_crossing(&rect, path.as_ref(), &Tuning::default())
    };
    let b = {
        let path = m.measure(&cubic_d(&curve)).expect("measurable");
        find_boundary_crossing(&rect, path.as_ref(), &Tuning::default())
    };
    assert_eq!(a, b);
    assert_eq!(
        find_bezier_boundary_crossing(&rect, &curve, &Tuning::default()),
        find_bezier_boundary_crossing(&rect, &curve, &Tuning::default())
    );
}

#[test]
fn entry_from_the_upper_left_lands_on_top_or_left() {
    // Box centered at (100,100), 120×50; curve approaches from the origin.
    let rect = NodeRect::new(100.0, 100.0, 120.0, 50.0);
    let curve = CubicBezier::new(
        Point::new(0.0, 0.0),
        Point::new(40.0, 0.0),
        Point::new(100.0, 40.0),
        Point::new(100.0, 100.0),
    );

    let m = measurer();
    let path = m.measure(&cubic_d(&curve)).expect("measurable");
    for hit in [
        find_boundary_crossing(&rect, path.as_ref(), &Tuning::default()).expect("crossing"),
        find_bezier_boundary_crossing(&rect, &curve, &Tuning::default()).expect("crossing"),
    ] {
        assert!(
            matches!(hit.side, Side::Top | Side::Left),
            "expected a top/left entry, got {:?}",
            hit.side
        );
        assert!(
            hit.exact_point.distance_to(rect.center()) > 10.0,
            "crossing collapsed to the center"
        );
    }
}

#[test]
fn path_fully_inside_the_box_snaps_to_the_nearest_side() {
    let rect = NodeRect::new(50.0, 50.0, 100.0, 100.0);
    let m = measurer();
    let path = m.measure("M0,0L50,50").expect("measurable");
    let hit =
        find_boundary_crossing(&rect, path.as_ref(), &Tuning::default()).expect("total fallback");
    assert!(rect.perimeter_distance(hit.exact_point) <= 0.5);
    assert!(!rect.strictly_contains(hit.point));
}

#[test]
fn arc_walk_rejects_paths_that_end_outside_the_box() {
    let rect = NodeRect::new(500.0, 500.0, 10.0, 10.0);
    let m = measurer();
    let path = m.measure("M0,0L50,50").expect("measurable");
    assert!(find_boundary_crossing(&rect, path.as_ref(), &Tuning::default()).is_none());
}

#[test]
fn trim_length_matches_the_crossing_position() {
    let (rect, curve) = cases().remove(0);
    let m = measurer();
    let path = m.measure(&cubic_d(&curve)).expect("measurable");
    let hit = find_boundary_crossing(&rect, path.as_ref(), &Tuning::default()).expect("crossing");
    let s = hit.arc_length_at_crossing.expect("arc walk reports arc length");
    assert!(s > 0.0 && s < path.total_length());
    // The sample at the reported arc length sits on (or next to) the crossing.
    let at_s = path.point_at_length(s);
    assert!(at_s.distance_to(hit.exact_point) <= 1.0);
}
