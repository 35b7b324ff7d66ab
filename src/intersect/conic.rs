//! Curved operands: circles via the radical line, everything else via the
//! quartic in `geometry::conic`

use glam::DVec2;

use crate::defaults::COINCIDENT_HIT;
use crate::geometry::{EllipseFrame, conic_intersections};

/// Where two circles meet.
///
/// The chord of intersection lies on the radical line, at distance `a` from
/// the first center. Touching circles meet once; concentric ones never.
pub fn circle_circle(c1: DVec2, r1: f64, c2: DVec2, r2: f64) -> Vec<DVec2> {
    let between = c2 - c1;
    let d = between.length();
    if d == 0.0 || d > r1 + r2 + COINCIDENT_HIT || d < (r1 - r2).abs() - COINCIDENT_HIT {
        return Vec::new();
    }
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let u = between / d;
    let foot = c1 + u * a;
    let h2 = r1 * r1 - a * a;
    if h2 <= 0.0 {
        return vec![foot];
    }
    let h = h2.sqrt();
    if h < COINCIDENT_HIT {
        return vec![foot];
    }
    let off = u.perp() * h;
    vec![foot + off, foot - off]
}

/// Where two ellipse frames meet, picking the circle construction when it applies
pub fn frame_frame(e1: &EllipseFrame, e2: &EllipseFrame) -> Vec<DVec2> {
    if e1.is_circle() && e2.is_circle() {
        circle_circle(e1.center, e1.radii.x, e2.center, e2.radii.x)
    } else {
        conic_intersections(e1, e2)
    }
}
