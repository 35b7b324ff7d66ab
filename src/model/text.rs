//! Text objects, seen by the geometry engines as their bounding rectangle

use glam::DVec2;

use crate::errors::ModelError;
use crate::types::{BBox, Point, SCREEN};

use super::{ObjectId, ObjectKind, Polyline, PolylineKind, Shape, Style};

/// Horizontal alignment of the string relative to its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub id: ObjectId,
    pub depth: i32,
    pub style: Style,
    pub justify: Justify,
    /// Baseline anchor point
    pub origin: Point,
    /// Baseline rotation in radians, counterclockwise as displayed
    pub angle: f64,
    /// Extent above the baseline
    pub ascent: i32,
    /// Extent below the baseline
    pub descent: i32,
    /// Rendered width of the string
    pub length: i32,
    pub string: String,
}

impl Text {
    pub fn new(origin: Point, string: impl Into<String>) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            depth: 50,
            style: Style::default(),
            justify: Justify::Left,
            origin,
            angle: 0.0,
            ascent: 0,
            descent: 0,
            length: 0,
            string: string.into(),
        }
    }

    /// Set the rendered extents as measured by the font layer
    pub fn with_metrics(mut self, length: i32, ascent: i32, descent: i32) -> Self {
        self.length = length;
        self.ascent = ascent;
        self.descent = descent;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Corners of the rotated bounding rectangle, starting at the lower left
    /// of the text and running counterclockwise as displayed.
    pub fn bbox_points(&self) -> [Point; 4] {
        let len = self.length as f64;
        let x0 = match self.justify {
            Justify::Left => 0.0,
            Justify::Center => -len / 2.0,
            Justify::Right => -len,
        };
        let lo = -(self.descent as f64);
        let hi = self.ascent as f64;
        let axis = DVec2::from_angle(self.angle);
        let origin = self.origin.to_vec();
        [
            DVec2::new(x0, lo),
            DVec2::new(x0 + len, lo),
            DVec2::new(x0 + len, hi),
            DVec2::new(x0, hi),
        ]
        .map(|corner| Point::from_vec(origin + SCREEN.from_math(axis.rotate(corner))))
    }

    /// The bounding rectangle as a polyline: four points when open, five
    /// (a closed polygon) when `closed`. A closed rectangle fails for empty
    /// text, which has no area.
    pub fn bbox_polyline(&self, closed: bool) -> Result<Polyline, ModelError> {
        let corners = self.bbox_points().to_vec();
        if closed {
            Polyline::from_parts(PolylineKind::Polygon, corners)
        } else {
            Polyline::line(corners)
        }
    }
}

impl Shape for Text {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Text
    }

    fn depth(&self) -> i32 {
        self.depth
    }

    fn bbox(&self) -> BBox {
        BBox::from_points(&self.bbox_points())
    }

    fn style(&self) -> &Style {
        &self.style
    }
}
