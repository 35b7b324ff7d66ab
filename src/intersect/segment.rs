//! Straight segments against segments and conics

use glam::DVec2;

use crate::defaults::PARALLEL_TOLERANCE;
use crate::geometry::EllipseFrame;

/// Where two segments cross, with the parameter along the first.
///
/// Both parameters must lie in `[0, 1]` give or take `tol`, so a crossing
/// exactly at an endpoint counts. Parallel and collinear segments never
/// report a crossing.
pub fn segment_segment(
    a0: DVec2,
    a1: DVec2,
    b0: DVec2,
    b1: DVec2,
    tol: f64,
) -> Option<(DVec2, f64)> {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let denom = d1.perp_dot(d2);
    if denom.abs() <= PARALLEL_TOLERANCE * d1.length() * d2.length() || denom == 0.0 {
        return None;
    }
    let w = b0 - a0;
    let t = w.perp_dot(d2) / denom;
    let u = w.perp_dot(d1) / denom;
    let range = -tol..=1.0 + tol;
    if range.contains(&t) && range.contains(&u) {
        Some((a0 + d1 * t.clamp(0.0, 1.0), t))
    } else {
        None
    }
}

/// Where the segment `a → b` meets an ellipse. A tangent segment meets it once.
pub fn segment_conic(a: DVec2, b: DVec2, conic: &EllipseFrame, tol: f64) -> Vec<DVec2> {
    conic
        .line_params(a, b)
        .iter()
        .filter(|t| (-tol..=1.0 + tol).contains(t))
        .map(|t| a.lerp(b, t.clamp(0.0, 1.0)))
        .collect()
}
