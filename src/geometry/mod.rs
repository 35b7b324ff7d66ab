//! Scalar geometry utilities: angles, turning direction, circumcenters,
//! lengths, areas and point rotation.
//!
//! Everything here is a pure function. Inputs in stored (screen) space are
//! converted to the y-up math frame through [`SCREEN`] before any angle is
//! taken, so the sign conventions live in one place.

pub mod conic;
pub mod solve;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

use crate::defaults;
use crate::errors::GeomError;
use crate::model::{Arc, ArcKind, Ellipse};
use crate::types::{Direction, Point, SCREEN};

pub use conic::{EllipseFrame, conic_intersections};
pub use solve::{Roots, solve_cubic, solve_quadratic, solve_quartic};

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Angle of the vector `(dx, dy)` in `[0, 2π)`, y-up.
///
/// Axis-aligned vectors are special-cased; everything else is `atan` plus a
/// quadrant correction. The zero vector yields 0.
pub fn compute_angle(dx: f64, dy: f64) -> f64 {
    if dx == 0.0 {
        if dy > 0.0 {
            FRAC_PI_2
        } else if dy < 0.0 {
            3.0 * FRAC_PI_2
        } else {
            0.0
        }
    } else if dy == 0.0 {
        if dx > 0.0 { 0.0 } else { PI }
    } else {
        let mut alpha = (dy / dx).atan(); // -π/2 .. π/2
        if dx < 0.0 {
            alpha += PI;
        } else if dy < 0.0 {
            alpha += TAU;
        }
        alpha
    }
}

/// Angle of a stored-space offset, measured in the math frame.
pub fn screen_angle(v: DVec2) -> f64 {
    let m = SCREEN.to_math(v);
    compute_angle(m.x, m.y)
}

/// Turning sense of the path `p1 → p2 → p3`, as displayed.
pub fn compute_direction(p1: DVec2, p2: DVec2, p3: DVec2) -> Direction {
    let alpha = screen_angle(p2 - p1);
    let theta = screen_angle(p3 - p2);
    let diff = theta - alpha;
    if (0.0 < diff && diff < PI) || diff < -PI {
        Direction::Counterclockwise
    } else {
        Direction::Clockwise
    }
}

/// Center of the circle through three points.
///
/// Fails when two points coincide or the points are collinear up to rounding,
/// so the perpendicular bisectors of `p1p2` and `p1p3` never meet.
pub fn compute_arccenter(p1: DVec2, p2: DVec2, p3: DVec2) -> Result<DVec2, GeomError> {
    if p1 == p2 || p2 == p3 || p1 == p3 {
        return Err(GeomError::CoincidentPoints);
    }
    let b = p2 - p1;
    let d = p3 - p1;
    let cross = b.perp_dot(d);
    if cross.abs() <= defaults::COLLINEAR_TOLERANCE * b.length() * d.length() {
        return Err(GeomError::Collinear);
    }
    // 2 b·c = |b|², 2 d·c = |d|², with p1 at the origin
    let bb = b.length_squared();
    let dd = d.length_squared();
    let det = 2.0 * cross;
    let cx = (bb * d.y - dd * b.y) / det;
    let cy = (b.x * dd - d.x * bb) / det;
    Ok(p1 + DVec2::new(cx, cy))
}

/// Radius of the circle through three points.
pub fn compute_arcradius(p1: DVec2, p2: DVec2, p3: DVec2) -> Result<f64, GeomError> {
    compute_arccenter(p1, p2, p3).map(|c| c.distance(p1))
}

/// Angle at `p2` from the ray `p2 → p3` to the ray `p2 → p1`, counterclockwise
/// as displayed, in `[0, 2π)`.
pub fn compute_3p_angle(p1: DVec2, p2: DVec2, p3: DVec2) -> Result<f64, GeomError> {
    let r1 = p1 - p2;
    let r3 = p3 - p2;
    if r1 == DVec2::ZERO || r3 == DVec2::ZERO {
        return Err(GeomError::ZeroLength);
    }
    Ok(normalize_angle(screen_angle(r1) - screen_angle(r3)))
}

/// Total length of the point sequence.
pub fn compute_poly_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Signed shoelace area of the ring through `points`.
///
/// Positive when the ring runs counterclockwise as displayed. The ring is
/// closed implicitly, so a repeated closing point contributes nothing.
pub fn compute_poly_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let a = SCREEN.to_math(p.to_vec());
        let b = SCREEN.to_math(q.to_vec());
        sum += a.perp_dot(b);
    }
    sum / 2.0
}

/// Length along the arc.
pub fn compute_arc_length(arc: &Arc) -> f64 {
    arc.radius() * arc.sweep()
}

/// Signed area enclosed by the arc: the sector for a pie wedge, the circular
/// segment cut off by the chord for an open arc. Positive for counterclockwise
/// arcs.
pub fn compute_arc_area(arc: &Arc) -> f64 {
    let r = arc.radius();
    let theta = arc.sweep();
    let sector = r * r * theta / 2.0;
    let area = match arc.kind() {
        ArcKind::PieWedge => sector,
        // the triangle term changes sign once the arc passes a half turn
        ArcKind::Open => sector - r * r * theta.sin() / 2.0,
    };
    area * arc.direction().sign()
}

/// π·a·b
pub fn compute_ellipse_area(ellipse: &Ellipse) -> f64 {
    let r = ellipse.radii();
    PI * r.x * r.y
}

/// Perimeter, by Ramanujan's second approximation.
pub fn compute_ellipse_length(ellipse: &Ellipse) -> f64 {
    let r = ellipse.radii();
    let sum = r.x + r.y;
    if sum == 0.0 {
        return 0.0;
    }
    let h = ((r.x - r.y) / sum).powi(2);
    PI * sum * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

/// Rotate `p` about `pivot` by `angle` radians in `direction`.
///
/// Works on the polar form (magnitude, angle) with the angle kept in
/// `[0, 2π)`, then rounds back to device units.
pub fn rotate_point(p: Point, pivot: Point, angle: f64, direction: Direction) -> Point {
    let offset = SCREEN.to_math(p.to_vec() - pivot.to_vec());
    let r = offset.length();
    if r == 0.0 {
        return p;
    }
    let theta = normalize_angle(compute_angle(offset.x, offset.y) + direction.sign() * angle);
    let rotated = SCREEN.from_math(DVec2::new(r * theta.cos(), r * theta.sin()));
    Point::from_vec(pivot.to_vec() + rotated)
}

/// Twice the signed area of triangle `abc` (raw coordinates, no axis flip).
#[inline]
pub fn cross3(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Closest point to `p` on the segment `ab`.
pub fn closest_on_segment(a: DVec2, b: DVec2, p: DVec2) -> DVec2 {
    let d = b - a;
    let len2 = d.length_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(d) / len2).clamp(0.0, 1.0);
    a + d * t
}

/// Whether `p` lies within `tol` of the segment `ab`.
pub fn close_to_vector(a: DVec2, b: DVec2, p: DVec2, tol: f64) -> bool {
    closest_on_segment(a, b, p).distance(p) <= tol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Arc, ArcKind, Ellipse};

    fn v(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn compute_angle_axis_cases() {
        assert_eq!(compute_angle(1.0, 0.0), 0.0);
        assert_eq!(compute_angle(0.0, 1.0), FRAC_PI_2);
        assert_eq!(compute_angle(-1.0, 0.0), PI);
        assert_eq!(compute_angle(0.0, -1.0), 3.0 * FRAC_PI_2);
        assert_eq!(compute_angle(0.0, 0.0), 0.0);
    }

    #[test]
    fn compute_angle_quadrants() {
        assert!(close(compute_angle(1.0, 1.0), PI / 4.0));
        assert!(close(compute_angle(-1.0, 1.0), 3.0 * PI / 4.0));
        assert!(close(compute_angle(-1.0, -1.0), 5.0 * PI / 4.0));
        assert!(close(compute_angle(1.0, -1.0), 7.0 * PI / 4.0));
    }

    #[test]
    fn compute_angle_stays_in_range() {
        for i in 0..360 {
            let t = (i as f64).to_radians();
            for r in [1e-6, 1.0, 1e6] {
                let a = compute_angle(r * t.cos(), r * t.sin());
                assert!((0.0..TAU).contains(&a), "angle {} out of range", a);
            }
        }
    }

    #[test]
    fn normalize_wraps_negative_and_large() {
        assert!(close(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert!(close(normalize_angle(5.0 * PI), PI));
        assert!(normalize_angle(-1e-18) < TAU);
    }

    #[test]
    fn direction_follows_screen_convention() {
        // right, then up the screen (y decreasing): a left turn as displayed
        let dir = compute_direction(v(0.0, 0.0), v(10.0, 0.0), v(10.0, -10.0));
        assert_eq!(dir, Direction::Counterclockwise);
        let dir = compute_direction(v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0));
        assert_eq!(dir, Direction::Clockwise);
    }

    #[test]
    fn direction_reverses_with_path() {
        let triples = [
            (v(0.0, 0.0), v(5.0, 7.0), v(13.0, -2.0)),
            (v(-3.0, 4.0), v(1.0, 1.0), v(8.0, 9.0)),
            (v(10.0, 0.0), v(0.0, 10.0), v(-10.0, 0.0)),
        ];
        for (a, b, c) in triples {
            assert_ne!(compute_direction(a, b, c), compute_direction(c, b, a));
        }
    }

    #[test]
    fn arccenter_is_equidistant() {
        let triples = [
            (v(0.0, 0.0), v(5.0, 7.0), v(13.0, -2.0)),
            (v(10.0, 0.0), v(0.0, 10.0), v(-10.0, 0.0)),
            (v(1000.0, 20.0), v(1500.0, 600.0), v(900.0, 1400.0)),
        ];
        for (a, b, c) in triples {
            let center = compute_arccenter(a, b, c).unwrap();
            let r = center.distance(a);
            assert!((center.distance(b) - r).abs() < 1e-6);
            assert!((center.distance(c) - r).abs() < 1e-6);
        }
        let c = compute_arccenter(v(10.0, 0.0), v(0.0, 10.0), v(-10.0, 0.0)).unwrap();
        assert!(c.length() < 1e-9);
    }

    #[test]
    fn arccenter_of_a_gentle_arc() {
        let (a, b, c) = (v(0.0, 0.0), v(3000.0, 2.0), v(6000.0, 0.0));
        let center = compute_arccenter(a, b, c).unwrap();
        assert_eq!(center.x, 3000.0);
        assert!((center.y - (4.0 - 9.0e6) / 4.0).abs() < 1e-3);
        let r = center.distance(a);
        assert!((center.distance(b) - r).abs() < 1e-6 * r);
        assert!((center.distance(c) - r).abs() < 1e-6 * r);

        let arc = Arc::new(
            ArcKind::Open,
            [Point::new(0, 0), Point::new(3000, 2), Point::new(6000, 0)],
        );
        assert!(arc.is_ok());
    }

    #[test]
    fn arccenter_rejects_degenerate_triples() {
        assert_eq!(
            compute_arccenter(v(0.0, 0.0), v(0.0, 0.0), v(1.0, 1.0)),
            Err(GeomError::CoincidentPoints)
        );
        assert_eq!(
            compute_arccenter(v(0.0, 0.0), v(1.0, 1.0), v(0.0, 0.0)),
            Err(GeomError::CoincidentPoints)
        );
        assert_eq!(
            compute_arccenter(v(0.0, 0.0), v(5.0, 5.0), v(10.0, 10.0)),
            Err(GeomError::Collinear)
        );
        assert_eq!(
            compute_arccenter(v(0.0, 0.0), v(10.0, 10.0), v(5.0, 5.0)),
            Err(GeomError::Collinear)
        );
    }

    #[test]
    fn arcradius_matches_center_distance() {
        let r = compute_arcradius(v(10.0, 0.0), v(0.0, 10.0), v(-10.0, 0.0)).unwrap();
        assert!(close(r, 10.0));
    }

    #[test]
    fn three_point_angle() {
        // p1 east of the vertex, p3 straight up the screen
        let a = compute_3p_angle(v(10.0, 0.0), v(0.0, 0.0), v(0.0, -10.0)).unwrap();
        assert!(close(a, 3.0 * FRAC_PI_2));
        let b = compute_3p_angle(v(0.0, -10.0), v(0.0, 0.0), v(10.0, 0.0)).unwrap();
        assert!(close(b, FRAC_PI_2));
        assert!((0.0..TAU).contains(&a));
        assert_eq!(
            compute_3p_angle(v(0.0, 0.0), v(0.0, 0.0), v(1.0, 0.0)),
            Err(GeomError::ZeroLength)
        );
    }

    #[test]
    fn poly_length_and_area() {
        let square = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
            Point::new(0, 0),
        ];
        assert_eq!(compute_poly_length(&square), 40.0);
        // clockwise as displayed
        assert_eq!(compute_poly_area(&square), -100.0);
        let reversed: Vec<Point> = square.iter().rev().copied().collect();
        assert_eq!(compute_poly_area(&reversed), 100.0);
        // the closing point is optional
        assert_eq!(compute_poly_area(&square[..4]), -100.0);
        assert_eq!(compute_poly_area(&square[..2]), 0.0);
    }

    #[test]
    fn arc_length_and_area() {
        // upper half circle as displayed, drawn counterclockwise
        let arc = Arc::new(
            ArcKind::Open,
            [Point::new(10, 0), Point::new(0, -10), Point::new(-10, 0)],
        )
        .unwrap();
        assert_eq!(arc.direction(), Direction::Counterclockwise);
        assert!((compute_arc_length(&arc) - 10.0 * PI).abs() < 1e-9);
        let half_disc = 50.0 * PI;
        assert!((compute_arc_area(&arc) - half_disc).abs() < 1e-9);

        let wedge = Arc::new(
            ArcKind::PieWedge,
            [Point::new(-10, 0), Point::new(0, -10), Point::new(10, 0)],
        )
        .unwrap();
        assert_eq!(wedge.direction(), Direction::Clockwise);
        assert!((compute_arc_area(&wedge) + half_disc).abs() < 1e-9);
    }

    #[test]
    fn open_arc_area_is_segment_not_sector() {
        // quarter circle: segment = sector - triangle
        let arc = Arc::new(
            ArcKind::Open,
            [Point::new(10, 0), Point::new(7, -7), Point::new(0, -10)],
        )
        .unwrap();
        let r = arc.radius();
        let theta = arc.sweep();
        let expected = r * r * (theta - theta.sin()) / 2.0;
        assert!((compute_arc_area(&arc) - expected).abs() < 1e-9);
    }

    #[test]
    fn ellipse_area_and_length() {
        let e = Ellipse::new(Point::new(0, 0), 10, 5, 0.0).unwrap();
        assert!((compute_ellipse_area(&e) - 50.0 * PI).abs() < 1e-9);
        let c = Ellipse::circle(Point::new(0, 0), 10).unwrap();
        assert!((compute_ellipse_length(&c) - 20.0 * PI).abs() < 1e-9);
        // Ramanujan II is within a few ppm for moderate eccentricity
        assert!((compute_ellipse_length(&e) - 48.442_241_102_738_88).abs() < 1e-3);
    }

    #[test]
    fn rotate_quarter_turns() {
        let pivot = Point::new(0, 0);
        let p = Point::new(10, 0);
        // counterclockwise as displayed moves toward negative y
        assert_eq!(
            rotate_point(p, pivot, FRAC_PI_2, Direction::Counterclockwise),
            Point::new(0, -10)
        );
        assert_eq!(
            rotate_point(p, pivot, FRAC_PI_2, Direction::Clockwise),
            Point::new(0, 10)
        );
        assert_eq!(
            rotate_point(p, pivot, 5.0 * PI, Direction::Counterclockwise),
            Point::new(-10, 0)
        );
        assert_eq!(rotate_point(pivot, pivot, 1.0, Direction::Clockwise), pivot);
    }

    #[test]
    fn rotate_about_offset_pivot() {
        let pivot = Point::new(100, 100);
        let p = Point::new(110, 100);
        assert_eq!(
            rotate_point(p, pivot, PI, Direction::Clockwise),
            Point::new(90, 100)
        );
    }

    #[test]
    fn segment_proximity() {
        let a = v(0.0, 0.0);
        let b = v(10.0, 0.0);
        assert!(close_to_vector(a, b, v(5.0, 3.0), 3.0));
        assert!(!close_to_vector(a, b, v(5.0, 3.1), 3.0));
        assert!(!close_to_vector(a, b, v(14.0, 0.0), 3.0));
        assert_eq!(closest_on_segment(a, b, v(-4.0, 2.0)), a);
        assert_eq!(closest_on_segment(a, a, v(-4.0, 2.0)), a);
    }
}
