//! Snapping to point sequences: polylines, polygons, boxes, and the
//! bounding rectangles of text

use glam::DVec2;

use super::{SnapMode, nearest_to};
use crate::errors::SnapError;
use crate::model::ObjectKind;
use crate::types::Point;

/// A point sequence as the snap algorithms see it
pub(crate) struct Path<'a> {
    pub points: &'a [Point],
    /// The last point repeats the first
    pub closed: bool,
    /// Reported in error messages
    pub kind: ObjectKind,
}

impl Path<'_> {
    fn vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        let n = if self.closed && self.points.len() > 1 {
            self.points.len() - 1
        } else {
            self.points.len()
        };
        self.points[..n].iter().map(|p| p.to_vec())
    }

    fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.points.windows(2).map(|w| (w[0].to_vec(), w[1].to_vec()))
    }

    pub fn snap(
        &self,
        mode: SnapMode,
        cursor: DVec2,
        anchor: Option<DVec2>,
    ) -> Result<DVec2, SnapError> {
        let not_found = SnapError::NotFound {
            mode,
            kind: self.kind,
        };
        match mode {
            SnapMode::Endpoint => nearest_to(cursor, self.vertices()).ok_or(not_found),
            SnapMode::Midpoint => {
                nearest_to(cursor, self.segments().map(|(a, b)| (a + b) * 0.5)).ok_or(not_found)
            }
            SnapMode::Normal => {
                let anchor = anchor.ok_or(SnapError::NeedsAnchor { mode })?;
                self.normal_foot(anchor).ok_or(not_found)
            }
            // a normal with the cursor standing in for the anchor
            SnapMode::Nearest => self
                .normal_foot(cursor)
                .or_else(|| self.vertices().next())
                .ok_or(not_found),
            SnapMode::Focus => self.centroid().ok_or(not_found),
            SnapMode::Tangent | SnapMode::Diameter | SnapMode::Intersect | SnapMode::None => {
                Err(SnapError::InvalidMode {
                    mode,
                    kind: self.kind,
                })
            }
        }
    }

    /// Foot of the perpendicular from `anchor` onto the line of the segment
    /// closest to it. Lines are extended past the segment ends; degenerate
    /// segments are skipped. The first segment wins a tie.
    fn normal_foot(&self, anchor: DVec2) -> Option<DVec2> {
        let mut best: Option<(f64, DVec2)> = None;
        for (a, b) in self.segments() {
            let d = b - a;
            let len2 = d.length_squared();
            if len2 == 0.0 {
                continue;
            }
            let foot = a + d * ((anchor - a).dot(d) / len2);
            let dist = foot.distance(anchor);
            if best.is_none_or(|(bd, _)| dist < bd) {
                best = Some((dist, foot));
            }
        }
        best.map(|(_, foot)| foot)
    }

    /// Mean of the distinct vertices
    fn centroid(&self) -> Option<DVec2> {
        let (sum, n) = self
            .vertices()
            .fold((DVec2::ZERO, 0usize), |(s, n), v| (s + v, n + 1));
        (n > 0).then(|| sum / n as f64)
    }
}
