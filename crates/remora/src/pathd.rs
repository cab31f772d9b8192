//! SVG path data emission.
//!
//! Coordinates are stringified with three fractional digits, rounding ties
//! half-up, matching D3's `d3-path` output so path strings stay byte-stable
//! across platforms and straight round-trips through DOM measurement.

use crate::curve::CubicBezier;
use crate::model::Point;

pub(crate) fn fmt_coord_into(out: &mut String, v: f64) {
    use std::fmt::Write as _;

    if !v.is_finite() {
        out.push('0');
        return;
    }

    // Math.round(v * 1000) / 1000, ties half-up (negatives included).
    let k = (v * 1000.0 + 0.5).floor() as i64;
    if k == 0 {
        out.push('0');
        return;
    }

    if k < 0 {
        out.push('-');
    }
    let abs = k.unsigned_abs();
    let int_part = abs / 1000;
    let mut frac = abs % 1000;
    let _ = write!(out, "{int_part}");
    if frac != 0 {
        let mut width = 3usize;
        while frac % 10 == 0 {
            frac /= 10;
            width -= 1;
        }
        out.push('.');
        let _ = write!(out, "{frac:0width$}");
    }
}

fn emit_pair(out: &mut String, cmd: char, p: Point) {
    out.push(cmd);
    fmt_coord_into(out, p.x);
    out.push(',');
    fmt_coord_into(out, p.y);
}

/// `M p0 C p1,p2,p3` for a single cubic segment.
pub(crate) fn cubic_path_d(curve: &CubicBezier) -> String {
    let mut out = String::with_capacity(72);
    emit_pair(&mut out, 'M', curve.p0);
    emit_pair(&mut out, 'C', curve.p1);
    out.push(',');
    fmt_coord_into(&mut out, curve.p2.x);
    out.push(',');
    fmt_coord_into(&mut out, curve.p2.y);
    out.push(',');
    fmt_coord_into(&mut out, curve.p3.x);
    out.push(',');
    fmt_coord_into(&mut out, curve.p3.y);
    out
}

/// `M p0 L p1 L p2 ...` for step and straight edges.
pub(crate) fn polyline_path_d(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        emit_pair(&mut out, if i == 0 { 'M' } else { 'L' }, *p);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(v: f64) -> String {
        let mut s = String::new();
        fmt_coord_into(&mut s, v);
        s
    }

    #[test]
    fn fmt_coord_matches_d3_rounding() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(f64::INFINITY), "0");
        assert_eq!(fmt(0.0004), "0");
        assert_eq!(fmt(-0.0004), "0");
        assert_eq!(fmt(1.0), "1");
        assert_eq!(fmt(1.23456), "1.235");
        assert_eq!(fmt(-1.2345), "-1.234");
        assert_eq!(fmt(2.5e-3), "0.003");
        assert_eq!(fmt(10.05), "10.05");
        assert_eq!(fmt(10.100), "10.1");
    }

    #[test]
    fn cubic_path_d_emits_move_and_one_curve() {
        let c = CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(100.0, 40.0),
            Point::new(100.0, 100.0),
        );
        assert_eq!(cubic_path_d(&c), "M0,0C40,0,100,40,100,100");
    }

    #[test]
    fn polyline_path_d_emits_line_segments() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 80.0),
        ];
        assert_eq!(polyline_path_d(&pts), "M0,0L50,0L50,80");
    }
}
