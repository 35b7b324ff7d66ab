//! Chopping objects apart where other objects cross them
//!
//! A chop collects one or more "axe" objects, then splits a "log" object at
//! every point where the axes intersect it:
//! - `polyline`: polylines and polygons, via the serialized cut stream
//! - `arc`: arcs into shorter arcs, circles into pie wedges
//!
//! [`ChopSession`] holds the axe selection and commits the result to the
//! document: the log is deleted and the pieces are inserted in its place.

mod arc;
mod polyline;

pub use arc::{chop_arc, chop_circle};
pub use polyline::{CutKind, CutPoint, chop_polyline, cut_stream};

use crate::config::Config;
use crate::document::Document;
use crate::errors::ChopError;
use crate::feedback::{Feedback, report_failure};
use crate::intersect::{Intersections, intersect, is_intersectable};
use crate::model::{Object, ObjectId, PolylineKind, Shape};
use crate::types::BBox;

/// Where a chop stands between picks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChopState {
    #[default]
    Idle,
    /// Axes picked so far, in pick order
    Collecting(Vec<ObjectId>),
}

/// What a committed chop changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChopReport {
    /// The log object, now gone from the document
    pub removed: ObjectId,
    /// The inserted pieces, in order along the log
    pub pieces: Vec<ObjectId>,
}

/// The interactive chop: collect axes, then pick the log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChopSession {
    state: ChopState,
}

impl ChopSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ChopState {
        &self.state
    }

    pub fn axes(&self) -> &[ObjectId] {
        match &self.state {
            ChopState::Idle => &[],
            ChopState::Collecting(axes) => axes,
        }
    }

    /// Add an axe. Objects the intersection engine cannot handle and objects
    /// already selected are refused.
    pub fn add_axe(
        &mut self,
        doc: &Document,
        id: ObjectId,
        feedback: &mut dyn Feedback,
    ) -> Result<(), ChopError> {
        let result = self.try_add_axe(doc, id);
        match &result {
            Ok(()) => {
                let n = self.axes().len();
                feedback.put_msg(&format!(
                    "{n} axe object{} selected; now pick the object to chop",
                    if n == 1 { "" } else { "s" }
                ));
            }
            Err(err) => {
                crate::log::warn!(%id, %err, "axe refused");
                report_failure(feedback, err);
            }
        }
        result
    }

    fn try_add_axe(&mut self, doc: &Document, id: ObjectId) -> Result<(), ChopError> {
        let object = doc.get(id).ok_or(ChopError::NotFound(id))?;
        if !is_intersectable(object) {
            return Err(ChopError::UnsupportedAxe {
                kind: object.kind(),
            });
        }
        match &mut self.state {
            ChopState::Collecting(axes) if axes.contains(&id) => Err(ChopError::DuplicateAxe),
            ChopState::Collecting(axes) => {
                axes.push(id);
                Ok(())
            }
            ChopState::Idle => {
                self.state = ChopState::Collecting(vec![id]);
                Ok(())
            }
        }
    }

    /// Drop the axe selection
    pub fn clear(&mut self) {
        self.state = ChopState::Idle;
    }

    /// Chop `log` with the collected axes and commit the pieces.
    ///
    /// The session returns to idle whatever the outcome. On failure the
    /// document is untouched and the reason is reported once.
    pub fn chop(
        &mut self,
        doc: &mut Document,
        log: ObjectId,
        cfg: &Config,
        feedback: &mut dyn Feedback,
    ) -> Result<ChopReport, ChopError> {
        let axes = match std::mem::take(&mut self.state) {
            ChopState::Idle => Vec::new(),
            ChopState::Collecting(axes) => axes,
        };
        let pieces = match plan(doc, log, &axes, cfg) {
            Ok(pieces) => pieces,
            Err(err) => {
                crate::log::warn!(%log, %err, "chop failed");
                report_failure(feedback, &err);
                return Err(err);
            }
        };

        let mut region = BBox::new();
        if let Some(original) = doc.delete(log) {
            region.union(&original.bbox());
        }
        let mut ids = Vec::with_capacity(pieces.len());
        for piece in pieces {
            region.union(&piece.bbox());
            ids.push(doc.insert(piece));
        }
        crate::log::debug!(%log, pieces = ids.len(), "chop committed");
        feedback.redisplay(region);
        feedback.put_msg(&format!("chop produced {} pieces", ids.len()));
        Ok(ChopReport {
            removed: log,
            pieces: ids,
        })
    }
}

/// Compute the pieces without touching the document
fn plan(
    doc: &Document,
    log: ObjectId,
    axes: &[ObjectId],
    cfg: &Config,
) -> Result<Vec<Object>, ChopError> {
    if axes.is_empty() {
        return Err(ChopError::NoAxes);
    }
    if axes.contains(&log) {
        return Err(ChopError::SelfChop);
    }
    // only top-level objects can be replaced
    let target = doc
        .objects()
        .iter()
        .find(|o| o.id() == log)
        .ok_or(ChopError::NotFound(log))?;
    match target {
        Object::Polyline(l) if l.kind() == PolylineKind::Picture => {
            return Err(ChopError::UnsupportedLog {
                what: target.label(),
            });
        }
        Object::Ellipse(e) if !e.is_circle() => return Err(ChopError::EllipseUnsupported),
        Object::Spline(_) | Object::Text(_) | Object::Compound(_) => {
            return Err(ChopError::UnsupportedLog {
                what: target.label(),
            });
        }
        _ => {}
    }

    let mut hits = Intersections::new();
    for &axe in axes {
        let axe = doc.get(axe).ok_or(ChopError::NotFound(axe))?;
        hits.append(intersect(target, axe, cfg)?);
    }
    crate::log::debug!(%log, axes = axes.len(), hits = hits.len(), "chop");

    let pieces: Vec<Object> = match target {
        Object::Polyline(l) => into_objects(chop_polyline(l, &hits)?),
        Object::Arc(a) => into_objects(chop_arc(a, &hits, cfg)?),
        Object::Ellipse(e) => into_objects(chop_circle(e, &hits)?),
        _ => Vec::new(),
    };
    if pieces.is_empty() {
        return Err(ChopError::NoPieces);
    }
    Ok(pieces)
}

fn into_objects<T: Into<Object>>(pieces: Vec<T>) -> Vec<Object> {
    pieces.into_iter().map(Into::into).collect()
}
