//! Ellipse frames and conic/conic, line/conic root finding.
//!
//! An ellipse's local frame has its origin at the center, its x axis along
//! the first radius and y pointing up (math convention). Stored-space
//! positions are mapped through [`SCREEN`] on the way in and out.

use glam::DVec2;

use super::solve::{Roots, solve_quadratic, solve_quartic};
use crate::defaults::{COINCIDENT_HIT, CONIC_RESIDUAL};
use crate::types::SCREEN;

/// An ellipse positioned in stored space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseFrame {
    pub center: DVec2,
    /// Semi-axis lengths along the local x and y axes
    pub radii: DVec2,
    /// Rotation of the local x axis, counterclockwise as displayed
    pub angle: f64,
}

impl EllipseFrame {
    pub fn new(center: DVec2, radii: DVec2, angle: f64) -> Self {
        Self {
            center,
            radii,
            angle,
        }
    }

    pub fn circle(center: DVec2, radius: f64) -> Self {
        Self::new(center, DVec2::splat(radius), 0.0)
    }

    pub fn is_circle(&self) -> bool {
        self.radii.x == self.radii.y
    }

    /// Unit vector of the local x axis, in the math frame
    fn axis(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }

    /// Stored-space position to local coordinates
    pub fn to_local(&self, p: DVec2) -> DVec2 {
        let m = SCREEN.to_math(p - self.center);
        DVec2::from_angle(-self.angle).rotate(m)
    }

    /// Local coordinates to a stored-space position
    pub fn to_world(&self, l: DVec2) -> DVec2 {
        self.center + SCREEN.from_math(self.axis().rotate(l))
    }

    /// The point at eccentric angle `t`
    pub fn point_at(&self, t: f64) -> DVec2 {
        let (s, c) = t.sin_cos();
        self.to_world(DVec2::new(self.radii.x * c, self.radii.y * s))
    }

    /// `(x/a)² + (y/b)² - 1` at a stored-space position
    pub fn residual(&self, p: DVec2) -> f64 {
        let l = self.to_local(p) / self.radii;
        l.length_squared() - 1.0
    }

    /// Parameters `t` where the line `a + t·(b - a)` meets the ellipse.
    /// A tangent line yields a single parameter.
    pub fn line_params(&self, a: DVec2, b: DVec2) -> Roots<2> {
        let p0 = self.to_local(a) / self.radii;
        let p1 = self.to_local(b) / self.radii;
        let d = p1 - p0;
        solve_quadratic([p0.length_squared() - 1.0, 2.0 * p0.dot(d), d.length_squared()])
    }
}

/// Every point where two ellipses meet, in stored space.
///
/// The second ellipse is written in the first one's frame and the first is
/// parametrized by the half-angle substitution `s = tan(t/2)`, which turns
/// the intersection into a quartic in `s`. `t = π` has no finite `s` and is
/// checked separately. Candidates failing the second ellipse's equation are
/// dropped and near-identical ones merged, so a tangency counts once.
pub fn conic_intersections(e1: &EllipseFrame, e2: &EllipseFrame) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::new();
    if e1.radii.min_element() <= 0.0 || e2.radii.min_element() <= 0.0 {
        return out;
    }

    let a1 = e1.radii.x;
    let b1 = e1.radii.y;
    let c2 = e1.to_local(e2.center);
    let u2 = DVec2::from_angle(e2.angle - e1.angle);
    let v2 = u2.perp();

    // offset from e2's center, projected on each of its axes, as a quadratic in s
    let along = |axis: DVec2| {
        let k0 = -c2.dot(axis);
        let k1 = a1 * axis.x;
        let k2 = b1 * axis.y;
        [k0 + k1, 2.0 * k2, k0 - k1]
    };
    let square = |l: [f64; 3]| {
        [
            l[0] * l[0],
            2.0 * l[0] * l[1],
            l[1] * l[1] + 2.0 * l[0] * l[2],
            2.0 * l[1] * l[2],
            l[2] * l[2],
        ]
    };
    let x2 = square(along(u2));
    let y2 = square(along(v2));
    let ia = 1.0 / (e2.radii.x * e2.radii.x);
    let ib = 1.0 / (e2.radii.y * e2.radii.y);
    // (1 + s²)²
    let rhs = [1.0, 0.0, 2.0, 0.0, 1.0];
    let mut quartic = [0.0; 5];
    for i in 0..5 {
        quartic[i] = x2[i] * ia + y2[i] * ib - rhs[i];
    }

    let mut push = |p: DVec2| {
        if e2.residual(p).abs() > CONIC_RESIDUAL {
            return;
        }
        if out.iter().any(|q| q.distance(p) < COINCIDENT_HIT) {
            return;
        }
        out.push(p);
    };
    for s in solve_quartic(quartic).iter() {
        push(e1.point_at(2.0 * s.atan()));
    }
    push(e1.point_at(std::f64::consts::PI));
    out
}
