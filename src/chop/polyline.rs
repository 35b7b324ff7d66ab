//! Chopping polylines and polygons at their intersection points.
//!
//! Every segment contributes its start point plus the cuts that land on it,
//! ordered by distance from the segment start. The per-segment buffers are
//! concatenated into one circular stream which is then walked from the first
//! cut, closing a piece at every further cut.

use glam::DVec2;

use crate::errors::ChopError;
use crate::geometry::compute_poly_area;
use crate::intersect::Intersections;
use crate::model::Polyline;
use crate::types::Point;

/// Role of a point in the cut stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// First point of the polyline
    Start,
    /// Any later original vertex
    Vertex,
    /// Last point of an open polyline
    End,
    /// An intersection with an axe
    Cut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPoint {
    pub pos: DVec2,
    pub kind: CutKind,
    /// Distance from the start of the segment the point belongs to
    pub dist: f64,
}

/// The serialized cut stream of `line`.
///
/// A closed polyline's closing point is left out: the stream is circular and
/// the walk reaches `Start` again after the last segment.
pub fn cut_stream(line: &Polyline, hits: &Intersections) -> Vec<CutPoint> {
    let last = line.segment_count().saturating_sub(1);
    let mut stream = Vec::with_capacity(line.len() + hits.len());
    for (i, (a, b)) in line.segments().enumerate() {
        let (a, b) = (a.to_vec(), b.to_vec());
        let mut buf = vec![CutPoint {
            pos: a,
            kind: if i == 0 { CutKind::Start } else { CutKind::Vertex },
            dist: 0.0,
        }];
        buf.extend(
            hits.iter()
                .filter(|h| h.seg_idx == Some(i))
                .map(|h| CutPoint {
                    pos: h.pos,
                    kind: CutKind::Cut,
                    dist: a.distance(h.pos),
                }),
        );
        if !line.is_closed() && i == last {
            buf.push(CutPoint {
                pos: b,
                kind: CutKind::End,
                dist: a.distance(b),
            });
        }
        // stable: a cut on a vertex stays after it
        buf.sort_by(|x, y| x.dist.total_cmp(&y.dist));
        stream.append(&mut buf);
    }
    stream
}

/// Walk the circular stream from its first cut, splitting at every cut.
///
/// Pieces come out in stream order starting after the first cut; for an
/// open polyline the piece from `Start` to the first cut is moved to the
/// front so pieces follow the original direction.
fn walk(stream: &[CutPoint], closed: bool) -> Vec<Vec<Point>> {
    let Some(first) = stream.iter().position(|c| c.kind == CutKind::Cut) else {
        return Vec::new();
    };
    let n = stream.len();
    let mut pieces = Vec::new();
    let mut current = vec![Point::from_vec(stream[first].pos)];
    for step in 1..=n {
        let c = stream[(first + step) % n];
        let p = Point::from_vec(c.pos);
        if step == n {
            current.push(p);
            pieces.push(current);
            break;
        }
        match c.kind {
            CutKind::Cut => {
                current.push(p);
                pieces.push(std::mem::replace(&mut current, vec![p]));
            }
            CutKind::End => {
                current.push(p);
                pieces.push(std::mem::take(&mut current));
            }
            CutKind::Start if !closed => current = vec![p],
            CutKind::Start | CutKind::Vertex => current.push(p),
        }
    }
    if !closed {
        pieces.rotate_right(1);
    }
    pieces
}

/// Split `line` at `hits`, which must carry the segment index they fall on.
///
/// Open pieces need two distinct points. Closed pieces are closed back onto
/// their first cut and must enclose area with the original's orientation.
pub fn chop_polyline(line: &Polyline, hits: &Intersections) -> Result<Vec<Polyline>, ChopError> {
    if hits.is_empty() {
        return Err(ChopError::NoIntersections);
    }
    let closed = line.is_closed();
    if closed {
        let mut distinct: Vec<Point> = hits.iter().map(|h| Point::from_vec(h.pos)).collect();
        distinct.sort_by_key(|p| (p.x, p.y));
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(ChopError::ClosedNeedsTwo);
        }
    }

    let orientation = compute_poly_area(line.points()).signum();
    let pieces = walk(&cut_stream(line, hits), closed);
    crate::log::debug!(raw = pieces.len(), closed, "polyline pieces");

    let fragments: Vec<Polyline> = pieces
        .into_iter()
        .filter_map(|mut points| {
            if closed {
                points.push(points[0]);
                points.dedup();
                if compute_poly_area(&points) * orientation <= 0.0 {
                    return None;
                }
                Polyline::polygon(points).ok()
            } else {
                points.dedup();
                if points.len() < 2 {
                    return None;
                }
                Polyline::line(points).ok()
            }
        })
        .map(|piece| {
            piece
                .with_style(line.style.clone())
                .with_depth(line.depth)
        })
        .collect();

    if fragments.is_empty() {
        return Err(ChopError::NoPieces);
    }
    Ok(fragments)
}
