//! Snapping to arcs.
//!
//! The circle constructions are shared with circles. The candidate nearest
//! the cursor is chosen first and must then pass the on-arc test; a point on
//! the part of the circle the arc does not sweep is a failure, never a cue to
//! try the other candidate.

use glam::DVec2;

use super::ellipse::{circle_normals, circle_tangents};
use super::{SnapMode, nearest_to};
use crate::errors::SnapError;
use crate::model::{Arc, ObjectKind};

const KIND: ObjectKind = ObjectKind::Arc;

pub(crate) fn snap(
    arc: &Arc,
    mode: SnapMode,
    cursor: DVec2,
    anchor: Option<DVec2>,
) -> Result<DVec2, SnapError> {
    let center = arc.center();
    let r = arc.radius();
    let ends = [arc.start().to_vec(), arc.end().to_vec()];
    let on_arc = |candidates: &[DVec2]| -> Result<DVec2, SnapError> {
        let p = nearest_to(cursor, candidates.iter().copied())
            .ok_or(SnapError::NotFound { mode, kind: KIND })?;
        if arc.contains(p) {
            Ok(p)
        } else {
            Err(SnapError::OffArc { mode })
        }
    };
    match mode {
        SnapMode::Endpoint => {
            nearest_to(cursor, ends).ok_or(SnapError::NotFound { mode, kind: KIND })
        }
        SnapMode::Midpoint => Ok(arc.mid_angle_point()),
        SnapMode::Focus => Ok(center),
        SnapMode::Diameter => {
            let anchor = anchor.ok_or(SnapError::NeedsAnchor { mode })?;
            Ok(2.0 * center - anchor)
        }
        SnapMode::Tangent => {
            let anchor = anchor.ok_or(SnapError::NeedsAnchor { mode })?;
            on_arc(&circle_tangents(center, r, anchor, KIND)?)
        }
        SnapMode::Normal => {
            let anchor = anchor.ok_or(SnapError::NeedsAnchor { mode })?;
            let candidates = circle_normals(center, r, anchor, cursor)
                .ok_or(SnapError::NotFound { mode, kind: KIND })?;
            on_arc(&candidates)
        }
        SnapMode::Nearest => {
            let candidates = circle_normals(center, r, cursor, cursor)
                .ok_or(SnapError::NotFound { mode, kind: KIND })?;
            on_arc(&candidates)
        }
        SnapMode::Intersect | SnapMode::None => Err(SnapError::InvalidMode { mode, kind: KIND }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArcKind;
    use crate::types::Point;

    fn v(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    fn near(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-6
    }

    /// Upper half of the circle of radius 10 around the origin
    fn upper() -> Arc {
        Arc::new(
            ArcKind::Open,
            [Point::new(10, 0), Point::new(0, -10), Point::new(-10, 0)],
        )
        .unwrap()
    }

    /// Quarter from the top to the left
    fn quarter() -> Arc {
        Arc::new(
            ArcKind::Open,
            [Point::new(0, -10), Point::new(-7, -7), Point::new(-10, 0)],
        )
        .unwrap()
    }

    #[test]
    fn endpoint_midpoint_focus() {
        let arc = upper();
        let p = snap(&arc, SnapMode::Endpoint, v(-8.0, 1.0), None).unwrap();
        assert_eq!(p, v(-10.0, 0.0));
        let p = snap(&arc, SnapMode::Midpoint, v(0.0, 0.0), None).unwrap();
        assert!(near(p, v(0.0, -10.0)));
        let p = snap(&arc, SnapMode::Focus, v(3.0, 3.0), None).unwrap();
        assert!(p.length() < 1e-9);
    }

    #[test]
    fn diameter_reflects_through_center() {
        let p = snap(&upper(), SnapMode::Diameter, v(0.0, 0.0), Some(v(6.0, -8.0))).unwrap();
        assert!(near(p, v(-6.0, 8.0)));
    }

    #[test]
    fn normal_nearest_the_cursor_on_the_arc() {
        let p = snap(&upper(), SnapMode::Normal, v(0.0, -12.0), Some(v(0.0, 30.0))).unwrap();
        assert!(near(p, v(0.0, -10.0)));
    }

    #[test]
    fn normal_nearest_the_cursor_off_the_arc_fails() {
        // (0, -10) is drawn, but the cursor is nearer (0, 10) on the missing half
        let err = snap(&upper(), SnapMode::Normal, v(0.0, 12.0), Some(v(0.0, 30.0)));
        assert_eq!(
            err,
            Err(SnapError::OffArc {
                mode: SnapMode::Normal
            })
        );
    }

    #[test]
    fn normal_off_arc_fails() {
        // the normal line runs through the two quadrants the arc misses
        let err = snap(&quarter(), SnapMode::Normal, v(0.0, 0.0), Some(v(20.0, -20.0)));
        assert_eq!(
            err,
            Err(SnapError::OffArc {
                mode: SnapMode::Normal
            })
        );
    }

    #[test]
    fn tangent_nearest_the_cursor_on_the_arc() {
        let p = snap(&upper(), SnapMode::Tangent, v(5.0, -9.0), Some(v(20.0, 0.0))).unwrap();
        assert!(near(p, v(5.0, -75f64.sqrt())));
    }

    #[test]
    fn tangent_nearest_the_cursor_off_the_arc_fails() {
        // the upper tangent point is drawn, but the cursor picks the lower one
        let err = snap(&upper(), SnapMode::Tangent, v(5.0, 9.0), Some(v(20.0, 0.0)));
        assert_eq!(
            err,
            Err(SnapError::OffArc {
                mode: SnapMode::Tangent
            })
        );
    }

    #[test]
    fn tangent_off_arc_fails() {
        let err = snap(&quarter(), SnapMode::Tangent, v(0.0, 0.0), Some(v(20.0, 0.0)));
        assert_eq!(
            err,
            Err(SnapError::OffArc {
                mode: SnapMode::Tangent
            })
        );
    }

    #[test]
    fn nearest_must_land_on_the_arc() {
        let arc = upper();
        let p = snap(&arc, SnapMode::Nearest, v(3.0, -20.0), None).unwrap();
        assert!(near(p, v(3.0, -20.0).normalize() * 10.0));
        // below the arc the foot is on the missing half
        let err = snap(&arc, SnapMode::Nearest, v(-3.0, 20.0), None);
        assert_eq!(
            err,
            Err(SnapError::OffArc {
                mode: SnapMode::Nearest
            })
        );
    }
}
