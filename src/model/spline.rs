//! Splines, stored as their control points only

use glam::DVec2;

use crate::errors::ModelError;
use crate::types::{BBox, Point};

use super::{ObjectId, ObjectKind, Shape, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub id: ObjectId,
    pub depth: i32,
    pub style: Style,
    closed: bool,
    points: Vec<Point>,
}

impl Spline {
    pub fn new(points: Vec<Point>, closed: bool) -> Result<Self, ModelError> {
        let needed = if closed { 3 } else { 2 };
        if points.len() < needed {
            return Err(ModelError::TooFewPoints {
                what: "spline",
                needed,
                got: points.len(),
            });
        }
        Ok(Self {
            id: ObjectId::UNASSIGNED,
            depth: 50,
            style: Style::default(),
            closed,
            points,
        })
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn control_points(&self) -> &[Point] {
        &self.points
    }

    /// Mean of the control points
    pub fn centroid(&self) -> DVec2 {
        let sum: DVec2 = self.points.iter().map(|p| p.to_vec()).sum();
        sum / self.points.len() as f64
    }
}

impl Shape for Spline {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Spline
    }

    fn depth(&self) -> i32 {
        self.depth
    }

    /// The control polygon's box, which always contains the curve
    fn bbox(&self) -> BBox {
        BBox::from_points(&self.points)
    }

    fn style(&self) -> &Style {
        &self.style
    }
}
