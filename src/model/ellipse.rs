//! Ellipses and circles

use glam::DVec2;

use crate::errors::ModelError;
use crate::geometry::EllipseFrame;
use crate::types::{BBox, NumericError, Point};

use super::{ObjectId, ObjectKind, Shape, Style};

/// How the ellipse was drawn; kept so editing can reuse the same handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipseKind {
    EllipseByRadius,
    EllipseByDiameter,
    CircleByRadius,
    CircleByDiameter,
}

/// A possibly rotated ellipse. Equal radii make it a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub id: ObjectId,
    pub depth: i32,
    pub style: Style,
    kind: EllipseKind,
    center: Point,
    radii: (i32, i32),
    /// Rotation in radians, counterclockwise as displayed
    angle: f64,
    /// Creation handles
    start: Point,
    end: Point,
}

fn check_radius(r: i32) -> Result<i32, ModelError> {
    if r < 0 {
        return Err(ModelError::InvalidRadius(NumericError::Negative));
    }
    Ok(r)
}

impl Ellipse {
    /// An ellipse from its center, radii and rotation
    pub fn new(center: Point, rx: i32, ry: i32, angle: f64) -> Result<Self, ModelError> {
        let rx = check_radius(rx)?;
        let ry = check_radius(ry)?;
        let angle = crate::types::finite(angle).map_err(ModelError::InvalidAngle)?;
        let end = Point::new(center.x + rx, center.y + ry);
        Ok(Self::raw(EllipseKind::EllipseByRadius, center, (rx, ry), angle, center, end))
    }

    /// An axis-aligned ellipse inscribed in the box spanned by two corners
    pub fn by_diameter(a: Point, b: Point) -> Self {
        let rx = (b.x - a.x).abs() / 2;
        let ry = (b.y - a.y).abs() / 2;
        Self::raw(EllipseKind::EllipseByDiameter, a.midpoint(b), (rx, ry), 0.0, a, b)
    }

    pub fn circle(center: Point, r: i32) -> Result<Self, ModelError> {
        let r = check_radius(r)?;
        let end = Point::new(center.x + r, center.y);
        Ok(Self::raw(EllipseKind::CircleByRadius, center, (r, r), 0.0, center, end))
    }

    /// A circle whose diameter runs between two points
    pub fn circle_by_diameter(a: Point, b: Point) -> Self {
        let r = (a.distance(b) / 2.0).round() as i32;
        Self::raw(EllipseKind::CircleByDiameter, a.midpoint(b), (r, r), 0.0, a, b)
    }

    fn raw(
        kind: EllipseKind,
        center: Point,
        radii: (i32, i32),
        angle: f64,
        start: Point,
        end: Point,
    ) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            depth: 50,
            style: Style::default(),
            kind,
            center,
            radii,
            angle,
            start,
            end,
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

    pub fn kind(&self) -> EllipseKind {
        self.kind
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radii(&self) -> DVec2 {
        DVec2::new(self.radii.0 as f64, self.radii.1 as f64)
    }

    /// Rotation angle; always 0 for circles
    pub fn angle(&self) -> f64 {
        if self.is_circle() { 0.0 } else { self.angle }
    }

    pub fn is_circle(&self) -> bool {
        self.radii.0 == self.radii.1
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Change both radii, keeping the center
    pub fn set_radii(&mut self, rx: i32, ry: i32) -> Result<(), ModelError> {
        self.radii = (check_radius(rx)?, check_radius(ry)?);
        Ok(())
    }

    pub fn frame(&self) -> EllipseFrame {
        EllipseFrame::new(self.center.to_vec(), self.radii(), self.angle())
    }
}

impl Shape for Ellipse {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Ellipse
    }

    fn depth(&self) -> i32 {
        self.depth
    }

    fn bbox(&self) -> BBox {
        let r = self.radii();
        let (s, c) = self.angle().sin_cos();
        let half = DVec2::new(
            ((r.x * c).powi(2) + (r.y * s).powi(2)).sqrt(),
            ((r.x * s).powi(2) + (r.y * c).powi(2)).sqrt(),
        )
        .ceil();
        let center = self.center.to_vec();
        BBox::from_points(&[
            Point::from_vec(center - half),
            Point::from_vec(center + half),
        ])
    }

    fn style(&self) -> &Style {
        &self.style
    }
}
