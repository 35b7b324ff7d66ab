//! Closest-point queries ("smart snapping")
//!
//! This module is organized into submodules:
//! - `polyline`: point sequences, also used for text bounding boxes
//! - `ellipse`: ellipses and circles, plus the circle constructions arcs share
//! - `arc`: three-point arcs, filtered by the on-arc test
//!
//! [`snap_to`] is the pure per-object query. [`SnapSession`] wraps it with the
//! interactive behavior: status messages, the hold toggle and the two-pick
//! intersect protocol.

mod arc;
mod ellipse;
mod polyline;

use std::fmt;

use glam::DVec2;

use crate::config::Config;
use crate::document::{Document, PointRef};
use crate::errors::{IntersectError, SnapError};
use crate::feedback::{Feedback, report_failure};
use crate::intersect::{intersect, is_intersectable};
use crate::model::{Object, ObjectId, ObjectKind, Shape};
use crate::types::Point;

use polyline::Path;

/// The constraint a snap query applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnapMode {
    #[default]
    None,
    Endpoint,
    Midpoint,
    Tangent,
    Normal,
    Focus,
    Diameter,
    Nearest,
    Intersect,
}

impl SnapMode {
    /// Modes that measure from a previously placed point
    pub fn is_anchored(self) -> bool {
        matches!(
            self,
            SnapMode::Tangent | SnapMode::Normal | SnapMode::Diameter
        )
    }
}

impl fmt::Display for SnapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SnapMode::None => "none",
            SnapMode::Endpoint => "endpoint",
            SnapMode::Midpoint => "midpoint",
            SnapMode::Tangent => "tangent",
            SnapMode::Normal => "normal",
            SnapMode::Focus => "focus",
            SnapMode::Diameter => "diameter",
            SnapMode::Nearest => "nearest",
            SnapMode::Intersect => "intersect",
        };
        f.write_str(name)
    }
}

/// Result of a successful query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapPoint {
    pub point: Point,
    /// The anchor the point was constructed from, for anchored modes
    pub secondary: Option<Point>,
}

/// What a pick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapOutcome {
    Found(SnapPoint),
    /// First half of an intersect pick; the next pick completes it
    Pending,
}

/// One user pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapRequest {
    pub target: ObjectId,
    pub cursor: Point,
    pub anchor: Option<PointRef>,
}

impl SnapRequest {
    pub fn new(target: ObjectId, cursor: Point) -> Self {
        Self {
            target,
            cursor,
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<PointRef>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
}

/// The candidate closest to the cursor; the first wins a tie
pub(crate) fn nearest_to(
    cursor: DVec2,
    candidates: impl IntoIterator<Item = DVec2>,
) -> Option<DVec2> {
    let mut best: Option<(f64, DVec2)> = None;
    for p in candidates {
        let d = p.distance_squared(cursor);
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, p));
        }
    }
    best.map(|(_, p)| p)
}

/// Compute the `mode` point of `object` for a pick at `cursor`.
///
/// `anchor` is the previously placed point that tangent, normal and diameter
/// measure from. Intersect needs two objects and is only available through
/// [`SnapSession`].
pub fn snap_to(
    object: &Object,
    mode: SnapMode,
    cursor: Point,
    anchor: Option<Point>,
    cfg: &Config,
) -> Result<SnapPoint, SnapError> {
    if mode == SnapMode::None {
        return Err(SnapError::NoMode);
    }
    let pos = snap_vec(object, mode, cursor.to_vec(), anchor.map(Point::to_vec), cfg)?;
    crate::log::debug!(%mode, kind = %object.kind(), x = pos.x, y = pos.y, "snap");
    Ok(SnapPoint {
        point: Point::from_vec(pos),
        secondary: if mode.is_anchored() { anchor } else { None },
    })
}

fn snap_vec(
    object: &Object,
    mode: SnapMode,
    cursor: DVec2,
    anchor: Option<DVec2>,
    cfg: &Config,
) -> Result<DVec2, SnapError> {
    if mode == SnapMode::Intersect {
        return Err(SnapError::InvalidMode {
            mode,
            kind: object.kind(),
        });
    }
    match object {
        Object::Polyline(l) => Path {
            points: l.points(),
            closed: l.is_closed(),
            kind: ObjectKind::Polyline,
        }
        .snap(mode, cursor, anchor),
        Object::Text(t) => {
            let [a, b, c, d] = t.bbox_points();
            Path {
                points: &[a, b, c, d, a],
                closed: true,
                kind: ObjectKind::Text,
            }
            .snap(mode, cursor, anchor)
        }
        Object::Arc(a) => arc::snap(a, mode, cursor, anchor),
        Object::Ellipse(e) => ellipse::snap(&e.frame(), mode, cursor, anchor, cfg),
        Object::Spline(s) => match mode {
            SnapMode::Focus => Ok(s.centroid()),
            SnapMode::Diameter => Err(SnapError::InvalidMode {
                mode,
                kind: ObjectKind::Spline,
            }),
            _ => Err(SnapError::NotImplemented {
                mode,
                kind: ObjectKind::Spline,
            }),
        },
        Object::Compound(c) => {
            let mut first_err = None;
            let mut found = Vec::new();
            for member in c.objects() {
                match snap_vec(member, mode, cursor, anchor, cfg) {
                    Ok(p) => found.push(p),
                    Err(e) => {
                        first_err.get_or_insert(e);
                    }
                }
            }
            nearest_to(cursor, found).ok_or_else(|| {
                first_err.unwrap_or(SnapError::NotFound {
                    mode,
                    kind: ObjectKind::Compound,
                })
            })
        }
    }
}

/// Interactive snap state: the active mode and the first half of a pending
/// intersect pick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapSession {
    mode: SnapMode,
    pending: Option<ObjectId>,
}

impl SnapSession {
    pub fn new(mode: SnapMode) -> Self {
        Self {
            mode,
            pending: None,
        }
    }

    pub fn mode(&self) -> SnapMode {
        self.mode
    }

    /// Switch modes, abandoning any half-finished intersect pick
    pub fn set_mode(&mut self, mode: SnapMode) {
        self.mode = mode;
        self.pending = None;
    }

    /// The object picked first in intersect mode, if any
    pub fn pending(&self) -> Option<ObjectId> {
        self.pending
    }

    /// Run one pick.
    ///
    /// Every outcome is reported through `feedback`; failures also beep.
    /// After a success the mode drops back to `None` unless `cfg.hold` is set.
    pub fn pick(
        &mut self,
        doc: &Document,
        req: &SnapRequest,
        cfg: &Config,
        feedback: &mut dyn Feedback,
    ) -> Result<SnapOutcome, SnapError> {
        match self.run(doc, req, cfg) {
            Ok(SnapOutcome::Pending) => {
                feedback.put_msg("intersect: now pick the second object");
                Ok(SnapOutcome::Pending)
            }
            Ok(SnapOutcome::Found(found)) => {
                feedback.put_msg(&format!("{} point at {}", self.mode, found.point));
                if !cfg.hold {
                    self.mode = SnapMode::None;
                }
                Ok(SnapOutcome::Found(found))
            }
            Err(err) => {
                crate::log::warn!(mode = %self.mode, target = %req.target, %err, "snap failed");
                report_failure(feedback, &err);
                Err(err)
            }
        }
    }

    fn run(
        &mut self,
        doc: &Document,
        req: &SnapRequest,
        cfg: &Config,
    ) -> Result<SnapOutcome, SnapError> {
        if self.mode == SnapMode::None {
            return Err(SnapError::NoMode);
        }
        let target = doc
            .get(req.target)
            .ok_or(SnapError::ObjectNotFound(req.target))?;
        if self.mode == SnapMode::Intersect {
            return self.intersect_pick(doc, target, req.cursor, cfg);
        }
        let anchor = req
            .anchor
            .map(|r| doc.resolve(&r).ok_or(SnapError::DanglingAnchor))
            .transpose()?;
        snap_to(target, self.mode, req.cursor, anchor, cfg).map(SnapOutcome::Found)
    }

    fn intersect_pick(
        &mut self,
        doc: &Document,
        target: &Object,
        cursor: Point,
        cfg: &Config,
    ) -> Result<SnapOutcome, SnapError> {
        if !is_intersectable(target) {
            self.pending = None;
            return Err(IntersectError::Unsupported {
                kind: target.kind(),
            }
            .into());
        }
        let Some(first_id) = self.pending.take() else {
            self.pending = Some(target.id());
            return Ok(SnapOutcome::Pending);
        };
        let first = doc
            .get(first_id)
            .ok_or(SnapError::ObjectNotFound(first_id))?;
        let hits = intersect(first, target, cfg)?;
        let hit = hits
            .nearest_to(cursor.to_vec())
            .ok_or(SnapError::NoIntersection)?;
        Ok(SnapOutcome::Found(SnapPoint {
            point: Point::from_vec(hit.pos),
            secondary: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::MessageLog;
    use crate::model::{Arc, ArcKind, Compound, Ellipse, Polyline, Spline, Text};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn nearest_to_prefers_the_first_on_ties() {
        let c = nearest_to(DVec2::ZERO, [DVec2::new(1.0, 0.0), DVec2::new(-1.0, 0.0)]);
        assert_eq!(c, Some(DVec2::new(1.0, 0.0)));
        assert_eq!(nearest_to(DVec2::ZERO, []), None);
    }

    #[test]
    fn anchored_modes_report_the_anchor() {
        let circle: Object = Ellipse::circle(p(0, 0), 10).unwrap().into();
        let cfg = Config::default();
        let found = snap_to(&circle, SnapMode::Diameter, p(0, 0), Some(p(6, 8)), &cfg).unwrap();
        assert_eq!(found.point, p(-6, -8));
        assert_eq!(found.secondary, Some(p(6, 8)));
        let found = snap_to(&circle, SnapMode::Midpoint, p(3, 3), Some(p(6, 8)), &cfg).unwrap();
        assert_eq!(found.secondary, None);
    }

    #[test]
    fn polylines_have_no_diameter() {
        let square: Object = Polyline::rectangle(p(0, 0), p(10, 10)).into();
        let cfg = Config::default();
        let err = snap_to(&square, SnapMode::Diameter, p(0, 0), Some(p(5, 5)), &cfg).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no such point: diameter is not defined for a polyline"
        );
    }

    #[test]
    fn text_snaps_to_its_box() {
        let text: Object = Text::new(p(0, 100), "label").with_metrics(40, 10, 2).into();
        let found = snap_to(&text, SnapMode::Endpoint, p(41, 89), None, &Config::default());
        assert_eq!(found.unwrap().point, p(40, 90));
    }

    #[test]
    fn spline_placeholders() {
        let spline: Object = Spline::new(vec![p(0, 0), p(10, 0), p(10, 10)], false)
            .unwrap()
            .into();
        let cfg = Config::default();
        for mode in [
            SnapMode::Endpoint,
            SnapMode::Midpoint,
            SnapMode::Tangent,
            SnapMode::Normal,
        ] {
            let err = snap_to(&spline, mode, p(0, 0), Some(p(1, 1)), &cfg).unwrap_err();
            assert!(matches!(err, SnapError::NotImplemented { .. }));
            assert!(err.to_string().ends_with("is not yet implemented"));
        }
        let found = snap_to(&spline, SnapMode::Focus, p(0, 0), None, &cfg).unwrap();
        assert_eq!(found.point, p(7, 3));
    }

    #[test]
    fn compound_uses_the_nearest_member() {
        let a = Polyline::line(vec![p(0, 0), p(10, 0)]).unwrap();
        let b = Ellipse::circle(p(100, 0), 5).unwrap();
        let group: Object = Compound::new(vec![a.into(), b.into()]).into();
        let cfg = Config::default();
        let found = snap_to(&group, SnapMode::Midpoint, p(90, 3), None, &cfg).unwrap();
        assert_eq!(found.point, p(100, 0));
        let found = snap_to(&group, SnapMode::Midpoint, p(2, 3), None, &cfg).unwrap();
        assert_eq!(found.point, p(5, 0));
    }

    #[test]
    fn session_resets_mode_unless_held() {
        let mut doc = Document::new();
        let id = doc.insert(Polyline::rectangle(p(0, 0), p(10, 10)));
        let mut log = MessageLog::new();
        let req = SnapRequest::new(id, p(9, 9));

        let mut session = SnapSession::new(SnapMode::Endpoint);
        let out = session.pick(&doc, &req, &Config::default(), &mut log).unwrap();
        assert_eq!(
            out,
            SnapOutcome::Found(SnapPoint {
                point: p(10, 10),
                secondary: None
            })
        );
        assert_eq!(session.mode(), SnapMode::None);
        assert_eq!(log.last_message(), Some("endpoint point at (10, 10)"));

        let mut session = SnapSession::new(SnapMode::Endpoint);
        let held = Config::default().with_hold(true);
        session.pick(&doc, &req, &held, &mut log).unwrap();
        assert_eq!(session.mode(), SnapMode::Endpoint);
        assert_eq!(log.beeps, 0);
    }

    #[test]
    fn session_failures_message_and_beep() {
        let mut doc = Document::new();
        let id = doc.insert(Polyline::rectangle(p(0, 0), p(10, 10)));
        let mut log = MessageLog::new();
        let mut session = SnapSession::new(SnapMode::Tangent);
        let req = SnapRequest::new(id, p(0, 0)).with_anchor(p(20, 20));
        assert!(session.pick(&doc, &req, &Config::default(), &mut log).is_err());
        assert_eq!(log.beeps, 1);
        assert_eq!(
            log.last_message(),
            Some("no such point: tangent is not defined for a polyline")
        );
        // a failed query keeps the mode for another try
        assert_eq!(session.mode(), SnapMode::Tangent);

        let mut idle = SnapSession::default();
        let err = idle.pick(&doc, &req, &Config::default(), &mut log).unwrap_err();
        assert_eq!(err, SnapError::NoMode);
        assert_eq!(log.beeps, 2);
    }

    #[test]
    fn anchor_references_resolve_through_the_document() {
        let mut doc = Document::new();
        let line = doc.insert(Polyline::line(vec![p(30, 0), p(30, 40)]).unwrap());
        let circle = doc.insert(Ellipse::circle(p(0, 0), 10).unwrap());
        let mut session = SnapSession::new(SnapMode::Normal);
        let req = SnapRequest::new(circle, p(12, 1)).with_anchor(PointRef::Vertex {
            object: line,
            index: 0,
        });
        let out = session
            .pick(&doc, &req, &Config::default(), &mut MessageLog::new())
            .unwrap();
        assert_eq!(
            out,
            SnapOutcome::Found(SnapPoint {
                point: p(10, 0),
                secondary: Some(p(30, 0))
            })
        );

        let mut session = SnapSession::new(SnapMode::Normal);
        let req = SnapRequest::new(circle, p(12, 1)).with_anchor(PointRef::Vertex {
            object: line,
            index: 7,
        });
        let err = session
            .pick(&doc, &req, &Config::default(), &mut MessageLog::new())
            .unwrap_err();
        assert_eq!(err, SnapError::DanglingAnchor);
    }

    #[test]
    fn intersect_takes_two_picks() {
        let mut doc = Document::new();
        let square = doc.insert(Polyline::rectangle(p(0, 0), p(10, 10)));
        let cut = doc.insert(Polyline::line(vec![p(5, -5), p(5, 15)]).unwrap());
        let mut log = MessageLog::new();
        let cfg = Config::default();
        let mut session = SnapSession::new(SnapMode::Intersect);

        let first = session.pick(&doc, &SnapRequest::new(square, p(5, 1)), &cfg, &mut log);
        assert_eq!(first, Ok(SnapOutcome::Pending));
        assert_eq!(session.pending(), Some(square));
        assert_eq!(session.mode(), SnapMode::Intersect);

        let second = session.pick(&doc, &SnapRequest::new(cut, p(5, 9)), &cfg, &mut log);
        assert_eq!(
            second,
            Ok(SnapOutcome::Found(SnapPoint {
                point: p(5, 10),
                secondary: None
            }))
        );
        assert_eq!(session.pending(), None);
        assert_eq!(session.mode(), SnapMode::None);
        assert_eq!(log.beeps, 0);
    }

    #[test]
    fn intersect_failures() {
        let mut doc = Document::new();
        let square = doc.insert(Polyline::rectangle(p(0, 0), p(10, 10)));
        let away = doc.insert(Polyline::line(vec![p(20, 0), p(20, 10)]).unwrap());
        let arc = doc.insert(Arc::new(ArcKind::Open, [p(30, 0), p(40, 10), p(50, 0)]).unwrap());
        let cfg = Config::default();
        let mut log = MessageLog::new();

        let mut session = SnapSession::new(SnapMode::Intersect);
        let _ = session.pick(&doc, &SnapRequest::new(square, p(0, 0)), &cfg, &mut log);
        let err = session
            .pick(&doc, &SnapRequest::new(away, p(0, 0)), &cfg, &mut log)
            .unwrap_err();
        assert_eq!(err, SnapError::NoIntersection);
        assert_eq!(log.last_message(), Some("objects do not intersect"));

        let _ = session.pick(&doc, &SnapRequest::new(arc, p(0, 0)), &cfg, &mut log);
        let err = session
            .pick(&doc, &SnapRequest::new(arc, p(0, 0)), &cfg, &mut log)
            .unwrap_err();
        assert_eq!(err, SnapError::Intersect(IntersectError::SelfIntersection));
        assert_eq!(log.beeps, 2);
    }
}
