//! Polylines, polygons, boxes and pictures

use crate::errors::ModelError;
use crate::types::{BBox, Point};

use super::{ObjectId, ObjectKind, Shape, Style};

/// Subtype of a polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolylineKind {
    PolyLine,
    Box,
    Polygon,
    /// Box with rounded corners
    ArcBox,
    /// Imported image, stored as its bounding box
    Picture,
}

impl PolylineKind {
    /// Closed subtypes repeat their first point as the last
    pub const fn is_closed(self) -> bool {
        !matches!(self, PolylineKind::PolyLine)
    }

    /// Boxes, arc-boxes and pictures always have exactly five points
    pub const fn is_rectangular(self) -> bool {
        matches!(
            self,
            PolylineKind::Box | PolylineKind::ArcBox | PolylineKind::Picture
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            PolylineKind::PolyLine => "polyline",
            PolylineKind::Box => "box",
            PolylineKind::Polygon => "polygon",
            PolylineKind::ArcBox => "arc box",
            PolylineKind::Picture => "picture",
        }
    }
}

/// An ordered point sequence.
///
/// The point list is private so the closure invariant (closed kinds repeat
/// the first point at the end) is maintained by the editing operations
/// rather than by every caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub id: ObjectId,
    pub depth: i32,
    pub style: Style,
    /// Corner radius of an arc-box
    pub radius: i32,
    kind: PolylineKind,
    points: Vec<Point>,
}

impl Polyline {
    /// An open polyline of one or more points
    pub fn line(points: Vec<Point>) -> Result<Self, ModelError> {
        Self::from_parts(PolylineKind::PolyLine, points)
    }

    /// A polygon. The closing point is appended if missing.
    pub fn polygon(mut points: Vec<Point>) -> Result<Self, ModelError> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        let got = points.len();
        points.dedup();
        if points.len() < 3 {
            return Err(ModelError::TooFewPoints {
                what: "polygon",
                needed: 3,
                got,
            });
        }
        points.push(points[0]);
        Ok(Self::raw(PolylineKind::Polygon, points))
    }

    /// An axis-aligned box spanning two opposite corners
    pub fn rectangle(a: Point, b: Point) -> Self {
        Self::raw(PolylineKind::Box, Self::corners(a, b))
    }

    /// A rounded box spanning two opposite corners
    pub fn arc_box(a: Point, b: Point, radius: i32) -> Self {
        let mut l = Self::raw(PolylineKind::ArcBox, Self::corners(a, b));
        l.radius = radius;
        l
    }

    /// A picture frame spanning two opposite corners
    pub fn picture(a: Point, b: Point) -> Self {
        Self::raw(PolylineKind::Picture, Self::corners(a, b))
    }

    /// Build any subtype, validating its point count and closure
    pub fn from_parts(kind: PolylineKind, points: Vec<Point>) -> Result<Self, ModelError> {
        let needed = match kind {
            PolylineKind::PolyLine => 1,
            PolylineKind::Polygon => 4,
            _ => 5,
        };
        if points.len() < needed {
            return Err(ModelError::TooFewPoints {
                what: kind.label(),
                needed,
                got: points.len(),
            });
        }
        if kind.is_rectangular() && points.len() != 5 {
            return Err(ModelError::FixedPointCount { what: kind.label() });
        }
        if kind == PolylineKind::Polygon {
            return Self::polygon(points);
        }
        let mut l = Self::raw(kind, points);
        if kind.is_closed() {
            l.points[4] = l.points[0];
        }
        Ok(l)
    }

    fn corners(a: Point, b: Point) -> Vec<Point> {
        vec![
            a,
            Point::new(b.x, a.y),
            b,
            Point::new(a.x, b.y),
            a,
        ]
    }

    fn raw(kind: PolylineKind, points: Vec<Point>) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            depth: 50,
            style: Style::default(),
            radius: 0,
            kind,
            points,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn kind(&self) -> PolylineKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.kind.is_closed()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The distinct vertices: all points minus the closing duplicate
    pub fn vertices(&self) -> &[Point] {
        if self.is_closed() && self.points.len() > 1 {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Consecutive point pairs, in order; segment `i` runs from point `i` to `i + 1`
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Turn an open polyline into a polygon by repeating its first point
    pub fn close(&mut self) -> Result<(), ModelError> {
        if self.is_closed() {
            return Ok(());
        }
        let closed = Self::polygon(self.points.clone())?;
        self.kind = PolylineKind::Polygon;
        self.points = closed.points;
        Ok(())
    }

    /// Remove the vertex at `index`, keeping a closed shape closed
    pub fn remove_point(&mut self, index: usize) -> Result<Point, ModelError> {
        let len = self.points.len();
        if index >= len {
            return Err(ModelError::IndexOutOfRange { index, len });
        }
        if self.kind.is_rectangular() {
            return Err(ModelError::FixedPointCount {
                what: self.kind.label(),
            });
        }
        let needed = if self.is_closed() { 5 } else { 2 };
        if len < needed {
            return Err(ModelError::TooFewPoints {
                what: self.kind.label(),
                needed: needed - 1,
                got: len - 1,
            });
        }
        if self.is_closed() && (index == 0 || index == len - 1) {
            let removed = self.points.remove(0);
            let last = self.points.len() - 1;
            self.points[last] = self.points[0];
            return Ok(removed);
        }
        Ok(self.points.remove(index))
    }

    /// Insert a vertex before `index`
    pub fn insert_point(&mut self, index: usize, p: Point) -> Result<(), ModelError> {
        let len = self.points.len();
        if self.kind.is_rectangular() {
            return Err(ModelError::FixedPointCount {
                what: self.kind.label(),
            });
        }
        if index > len {
            return Err(ModelError::IndexOutOfRange { index, len });
        }
        if self.is_closed() && index == 0 {
            // a new first vertex is also the new closing vertex
            self.points.insert(0, p);
            let last = self.points.len() - 1;
            self.points[last] = p;
            return Ok(());
        }
        if self.is_closed() && index == len {
            self.points.insert(len - 1, p);
            return Ok(());
        }
        self.points.insert(index, p);
        Ok(())
    }

    /// Move the vertex at `index`; the closing duplicate follows its twin
    pub fn relocate_point(&mut self, index: usize, p: Point) -> Result<(), ModelError> {
        let len = self.points.len();
        if index >= len {
            return Err(ModelError::IndexOutOfRange { index, len });
        }
        self.points[index] = p;
        if self.is_closed() {
            if index == 0 {
                self.points[len - 1] = p;
            } else if index == len - 1 {
                self.points[0] = p;
            }
        }
        Ok(())
    }
}

impl Shape for Polyline {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Polyline
    }

    fn depth(&self) -> i32 {
        self.depth
    }

    fn bbox(&self) -> BBox {
        BBox::from_points(&self.points)
    }

    fn style(&self) -> &Style {
        &self.style
    }
}
