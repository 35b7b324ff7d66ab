//! Pairwise intersection engine
//!
//! `intersect` finds every point where two primitives meet. Polylines, arcs
//! and ellipses (circles included) can be intersected with each other in
//! any combination; anything else is rejected. Hits on a polyline record the
//! index of the segment they fall on so the chop engine can place them in
//! the original point sequence.

pub mod conic;
pub mod segment;

use glam::DVec2;

use crate::config::Config;
use crate::errors::IntersectError;
use crate::model::{Arc, Ellipse, Object, Polyline, Shape};

pub use conic::circle_circle;
pub use segment::{segment_conic, segment_segment};

/// One intersection point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub pos: DVec2,
    /// Segment of the polyline operand the hit lies on (the target's, when
    /// both operands are polylines)
    pub seg_idx: Option<usize>,
}

impl Hit {
    pub fn new(pos: DVec2, seg_idx: Option<usize>) -> Self {
        Self { pos, seg_idx }
    }
}

/// The hits gathered by one or more intersection queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intersections {
    hits: Vec<Hit>,
}

impl Intersections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hit: Hit) {
        self.hits.push(hit);
    }

    pub fn append(&mut self, other: Intersections) {
        self.hits.extend(other.hits);
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hit> {
        self.hits.iter()
    }

    pub fn as_slice(&self) -> &[Hit] {
        &self.hits
    }

    /// The hit closest to `p`
    pub fn nearest_to(&self, p: DVec2) -> Option<&Hit> {
        self.hits
            .iter()
            .min_by(|a, b| a.pos.distance_squared(p).total_cmp(&b.pos.distance_squared(p)))
    }
}

impl FromIterator<Hit> for Intersections {
    fn from_iter<I: IntoIterator<Item = Hit>>(iter: I) -> Self {
        Self {
            hits: iter.into_iter().collect(),
        }
    }
}

/// A primitive the engine can intersect
#[derive(Debug, Clone, Copy)]
enum Curve<'a> {
    Path(&'a Polyline),
    Arc(&'a Arc),
    Ellipse(&'a Ellipse),
}

impl<'a> Curve<'a> {
    fn of(object: &'a Object) -> Result<Self, IntersectError> {
        match object {
            Object::Polyline(l) => Ok(Curve::Path(l)),
            Object::Arc(a) => Ok(Curve::Arc(a)),
            Object::Ellipse(e) => Ok(Curve::Ellipse(e)),
            other => Err(IntersectError::Unsupported { kind: other.kind() }),
        }
    }

    /// Whether a point of the underlying circle or ellipse is on the drawn curve
    fn keeps(&self, p: DVec2) -> bool {
        match self {
            Curve::Arc(a) => a.contains(p),
            _ => true,
        }
    }

    fn frame(&self) -> Option<crate::geometry::EllipseFrame> {
        match self {
            Curve::Path(_) => None,
            Curve::Arc(a) => Some(a.circle()),
            Curve::Ellipse(e) => Some(e.frame()),
        }
    }
}

/// Whether an object can take part in an intersection at all
pub fn is_intersectable(object: &Object) -> bool {
    Curve::of(object).is_ok()
}

/// Every point where `target` and `other` meet.
///
/// Fails for the same object on both sides and for operands that are not
/// polylines, arcs or ellipses. Finding no hits is not an error.
pub fn intersect(
    target: &Object,
    other: &Object,
    cfg: &Config,
) -> Result<Intersections, IntersectError> {
    if std::ptr::eq(target, other) || (target.id().is_assigned() && target.id() == other.id()) {
        crate::log::warn!(id = %target.id(), "refusing self intersection");
        return Err(IntersectError::SelfIntersection);
    }
    let t = Curve::of(target)?;
    let o = Curve::of(other)?;
    let tol = cfg.segment_tolerance;

    let hits: Intersections = match (t, o) {
        (Curve::Path(a), Curve::Path(b)) => path_path(a, b, tol),
        (Curve::Path(path), curve) | (curve, Curve::Path(path)) => path_curve(path, curve, tol),
        (a, b) => curve_curve(a, b),
    };
    crate::log::debug!(
        target = %target.id(),
        other = %other.id(),
        hits = hits.len(),
        "intersect"
    );
    Ok(hits)
}

fn path_path(target: &Polyline, other: &Polyline, tol: f64) -> Intersections {
    let mut hits = Intersections::new();
    for (i, (a0, a1)) in target.segments().enumerate() {
        for (b0, b1) in other.segments() {
            if let Some((pos, _)) =
                segment_segment(a0.to_vec(), a1.to_vec(), b0.to_vec(), b1.to_vec(), tol)
            {
                hits.push(Hit::new(pos, Some(i)));
            }
        }
    }
    hits
}

fn path_curve(path: &Polyline, curve: Curve<'_>, tol: f64) -> Intersections {
    let Some(frame) = curve.frame() else {
        return Intersections::new();
    };
    let mut hits = Intersections::new();
    for (i, (a, b)) in path.segments().enumerate() {
        for pos in segment_conic(a.to_vec(), b.to_vec(), &frame, tol) {
            if curve.keeps(pos) {
                hits.push(Hit::new(pos, Some(i)));
            }
        }
    }
    hits
}

fn curve_curve(a: Curve<'_>, b: Curve<'_>) -> Intersections {
    let (Some(fa), Some(fb)) = (a.frame(), b.frame()) else {
        return Intersections::new();
    };
    conic::frame_frame(&fa, &fb)
        .into_iter()
        .filter(|p| a.keeps(*p) && b.keeps(*p))
        .map(|p| Hit::new(p, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::model::{ArcKind, Spline, Text};
    use crate::types::Point;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn line(points: &[(i32, i32)]) -> Object {
        Polyline::line(points.iter().map(|&(x, y)| p(x, y)).collect())
            .unwrap()
            .into()
    }

    fn positions(hits: &Intersections) -> Vec<Point> {
        let mut pts: Vec<Point> = hits.iter().map(|h| Point::from_vec(h.pos)).collect();
        pts.sort_by_key(|q| (q.x, q.y));
        pts
    }

    #[test]
    fn polyline_hits_carry_target_segment() {
        let square: Object = Polyline::polygon(vec![p(0, 0), p(10, 0), p(10, 10), p(0, 10)])
            .unwrap()
            .into();
        let axe = line(&[(5, -5), (5, 15)]);
        let hits = intersect(&square, &axe, &Config::default()).unwrap();
        assert_eq!(positions(&hits), vec![p(5, 0), p(5, 10)]);
        let mut segs: Vec<usize> = hits.iter().filter_map(|h| h.seg_idx).collect();
        segs.sort();
        assert_eq!(segs, vec![0, 2]);
    }

    #[test]
    fn polyline_against_arc_respects_the_missing_extension() {
        let arc: Object = Arc::new(ArcKind::Open, [p(10, 0), p(0, -10), p(-10, 0)])
            .unwrap()
            .into();
        let vertical = line(&[(0, -20), (0, 20)]);
        let hits = intersect(&vertical, &arc, &Config::default()).unwrap();
        assert_eq!(positions(&hits), vec![p(0, -10)]);
        assert_eq!(hits.as_slice()[0].seg_idx, Some(0));
    }

    #[test]
    fn polyline_against_rotated_ellipse() {
        let e: Object = Ellipse::new(p(0, 0), 20, 5, std::f64::consts::FRAC_PI_2)
            .unwrap()
            .into();
        let vertical = line(&[(0, -30), (0, 30)]);
        let hits = intersect(&e, &vertical, &Config::default()).unwrap();
        assert_eq!(positions(&hits), vec![p(0, -20), p(0, 20)]);
        assert!(hits.iter().all(|h| h.seg_idx == Some(0)));
    }

    #[test]
    fn arc_against_circle() {
        let arc: Object = Arc::new(ArcKind::Open, [p(10, 0), p(0, -10), p(-10, 0)])
            .unwrap()
            .into();
        let circle: Object = Ellipse::circle(p(12, 0), 10).unwrap().into();
        let hits = intersect(&arc, &circle, &Config::default()).unwrap();
        // only the upper crossing is on the drawn half
        assert_eq!(positions(&hits), vec![p(6, -8)]);
        assert_eq!(hits.as_slice()[0].seg_idx, None);
    }

    #[test]
    fn tangent_contact_is_recorded_once() {
        let circle: Object = Ellipse::circle(p(0, 0), 10).unwrap().into();
        let tangent = line(&[(-20, 10), (20, 10)]);
        let hits = intersect(&circle, &tangent, &Config::default()).unwrap();
        assert_eq!(positions(&hits), vec![p(0, 10)]);
    }

    #[test]
    fn disjoint_operands_yield_nothing() {
        let square: Object = Polyline::rectangle(p(0, 0), p(10, 10)).into();
        let away = line(&[(20, 0), (20, 10)]);
        assert!(intersect(&square, &away, &Config::default()).unwrap().is_empty());
    }

    #[test]
    fn self_intersection_is_rejected() {
        let mut doc = Document::new();
        let id = doc.insert(Polyline::rectangle(p(0, 0), p(10, 10)));
        let obj = doc.get(id).unwrap();
        let copy = obj.clone();
        assert_eq!(
            intersect(obj, obj, &Config::default()),
            Err(IntersectError::SelfIntersection)
        );
        assert_eq!(
            intersect(obj, &copy, &Config::default()),
            Err(IntersectError::SelfIntersection)
        );
    }

    #[test]
    fn unsupported_kinds_are_rejected() {
        let spline: Object = Spline::new(vec![p(0, 0), p(5, 5)], false).unwrap().into();
        let text: Object = Text::new(p(0, 0), "x").into();
        let l = line(&[(0, 0), (5, 5)]);
        assert!(matches!(
            intersect(&l, &spline, &Config::default()),
            Err(IntersectError::Unsupported { .. })
        ));
        assert!(matches!(
            intersect(&text, &l, &Config::default()),
            Err(IntersectError::Unsupported { .. })
        ));
        assert!(!is_intersectable(&text));
    }

    #[test]
    fn nearest_hit() {
        let hits: Intersections = [
            Hit::new(DVec2::new(0.0, 0.0), None),
            Hit::new(DVec2::new(10.0, 0.0), None),
        ]
        .into_iter()
        .collect();
        assert_eq!(hits.nearest_to(DVec2::new(8.0, 1.0)).map(|h| h.pos.x), Some(10.0));
    }
}
