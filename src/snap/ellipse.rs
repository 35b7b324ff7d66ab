//! Snapping to ellipses and circles

use glam::DVec2;

use super::{SnapMode, nearest_to};
use crate::config::Config;
use crate::errors::SnapError;
use crate::geometry::{EllipseFrame, solve_quadratic, solve_quartic};
use crate::model::ObjectKind;

const KIND: ObjectKind = ObjectKind::Ellipse;

pub(crate) fn snap(
    frame: &EllipseFrame,
    mode: SnapMode,
    cursor: DVec2,
    anchor: Option<DVec2>,
    cfg: &Config,
) -> Result<DVec2, SnapError> {
    let not_found = SnapError::NotFound { mode, kind: KIND };
    let needs_anchor = || anchor.ok_or(SnapError::NeedsAnchor { mode });
    match mode {
        SnapMode::Endpoint => {
            if frame.is_circle() {
                return Err(SnapError::InvalidMode { mode, kind: KIND });
            }
            let (a, b) = (frame.radii.x, frame.radii.y);
            let ends = [
                DVec2::new(a, 0.0),
                DVec2::new(-a, 0.0),
                DVec2::new(0.0, b),
                DVec2::new(0.0, -b),
            ];
            nearest_to(cursor, ends.map(|e| frame.to_world(e))).ok_or(not_found)
        }
        SnapMode::Midpoint => Ok(frame.center),
        SnapMode::Focus => Ok(focus(frame, cursor)),
        SnapMode::Diameter => Ok(2.0 * frame.center - needs_anchor()?),
        SnapMode::Normal => normal(frame, needs_anchor()?, cursor, cfg).ok_or(not_found),
        SnapMode::Nearest => normal(frame, cursor, cursor, cfg).ok_or(not_found),
        SnapMode::Tangent => {
            let anchor = needs_anchor()?;
            let candidates = if frame.is_circle() {
                circle_tangents(frame.center, frame.radii.x, anchor, KIND)?.to_vec()
            } else {
                ellipse_tangents(frame, anchor, cfg)?
            };
            nearest_to(cursor, candidates).ok_or(not_found)
        }
        SnapMode::Intersect | SnapMode::None => Err(SnapError::InvalidMode { mode, kind: KIND }),
    }
}

/// The focus nearer the cursor; a circle's only focus is its center
fn focus(frame: &EllipseFrame, cursor: DVec2) -> DVec2 {
    let (a, b) = (frame.radii.x, frame.radii.y);
    if a == b {
        return frame.center;
    }
    let c = (a * a - b * b).abs().sqrt();
    let axis = if a > b {
        DVec2::new(c, 0.0)
    } else {
        DVec2::new(0.0, c)
    };
    let f1 = frame.to_world(axis);
    let f2 = frame.to_world(-axis);
    if f2.distance_squared(cursor) < f1.distance_squared(cursor) {
        f2
    } else {
        f1
    }
}

/// The two points where the line through the center and `toward` crosses
/// the circle. `toward` at the center falls back to `fallback`'s direction.
pub(crate) fn circle_normals(
    center: DVec2,
    r: f64,
    toward: DVec2,
    fallback: DVec2,
) -> Option<[DVec2; 2]> {
    let dir = (toward - center)
        .try_normalize()
        .or_else(|| (fallback - center).try_normalize())?;
    Some([center + dir * r, center - dir * r])
}

/// The two points where lines from `anchor` touch the circle.
///
/// The anchor must be strictly outside. Center, anchor and tangent point
/// form a right triangle with the radius as the adjacent side, so each
/// tangent point is `acos(r / d)` away from the anchor's direction.
pub(crate) fn circle_tangents(
    center: DVec2,
    r: f64,
    anchor: DVec2,
    kind: ObjectKind,
) -> Result<[DVec2; 2], SnapError> {
    let to_anchor = anchor - center;
    let d = to_anchor.length();
    if d <= r {
        return Err(SnapError::AnchorInside { kind });
    }
    let offset = (r / d).acos();
    let dir = to_anchor / d;
    let at = |angle: f64| center + DVec2::from_angle(angle).rotate(dir) * r;
    Ok([at(offset), at(-offset)])
}

/// Normal foot from `anchor` nearest the cursor.
///
/// Circles reflect the anchor direction through the center. A true ellipse
/// substitutes the ellipse equation into the condition that `anchor - P` is
/// parallel to the normal at `P`, a quartic in `x/a` in the ellipse's frame.
/// Every real root gives two candidate points (±y); only those whose normal
/// lines up with the anchor survive.
fn normal(frame: &EllipseFrame, anchor: DVec2, cursor: DVec2, cfg: &Config) -> Option<DVec2> {
    let (a, b) = (frame.radii.x, frame.radii.y);
    if a == b {
        let [p, q] = circle_normals(frame.center, a, anchor, cursor)?;
        return nearest_to(cursor, [p, q]);
    }
    if a <= 0.0 || b <= 0.0 {
        return None;
    }
    let l = frame.to_local(anchor);
    let k = b * b - a * a;
    let quartic = [
        -(a * l.x).powi(2),
        -2.0 * a * k * l.x,
        (a * l.x).powi(2) - k * k + (b * l.y).powi(2),
        2.0 * a * k * l.x,
        k * k,
    ];
    let mut candidates = Vec::new();
    for x in solve_quartic(quartic).iter() {
        if !(-1.0 - 1e-6..=1.0 + 1e-6).contains(&x) {
            continue;
        }
        let x = x.clamp(-1.0, 1.0);
        let y = b * (1.0 - x * x).sqrt();
        for p in [DVec2::new(a * x, y), DVec2::new(a * x, -y)] {
            if aligned(p, l, a, b, cfg.alignment_tolerance) {
                candidates.push(frame.to_world(p));
            }
        }
    }
    nearest_to(cursor, candidates)
}

/// Whether the normal at local point `p` points at `anchor`
fn aligned(p: DVec2, anchor: DVec2, a: f64, b: f64, tol: f64) -> bool {
    let Some(normal) = DVec2::new(p.x / (a * a), p.y / (b * b)).try_normalize() else {
        return false;
    };
    match (anchor - p).try_normalize() {
        Some(dir) => normal.perp_dot(dir).abs() < tol,
        // the anchor is on the ellipse: its own foot
        None => true,
    }
}

/// Tangent points from `anchor` on a true ellipse.
///
/// Scaling the ellipse to the unit circle keeps tangency. With the anchor
/// at `(p, q)` in that space, a tangent point `(X, Y)` satisfies
/// `pX + qY = 1`, which with `X² + Y² = 1` gives
/// `(p² + q²)X² − 2pX + (1 − q²) = 0`. Each root has two `Y` candidates;
/// those off the tangent line are dropped.
fn ellipse_tangents(
    frame: &EllipseFrame,
    anchor: DVec2,
    cfg: &Config,
) -> Result<Vec<DVec2>, SnapError> {
    let pq = frame.to_local(anchor) / frame.radii;
    let (p, q) = (pq.x, pq.y);
    let norm2 = p * p + q * q;
    if norm2 <= 1.0 {
        return Err(SnapError::AnchorInside { kind: KIND });
    }
    let slack = cfg.alignment_tolerance * norm2.sqrt();
    let mut out = Vec::new();
    for x in solve_quadratic([1.0 - q * q, -2.0 * p, norm2]).iter() {
        let x = x.clamp(-1.0, 1.0);
        let y = (1.0 - x * x).sqrt();
        for (x, y) in [(x, y), (x, -y)] {
            if (p * x + q * y - 1.0).abs() <= slack {
                out.push(frame.to_world(DVec2::new(x, y) * frame.radii));
            }
        }
    }
    Ok(out)
}
