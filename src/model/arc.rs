//! Three-point circular arcs

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use crate::defaults::ON_ARC_TOLERANCE;
use crate::errors::ModelError;
use crate::geometry::{
    EllipseFrame, compute_arccenter, compute_direction, cross3, normalize_angle, screen_angle,
};
use crate::types::{BBox, Direction, Point, SCREEN};

use super::{ObjectId, ObjectKind, Shape, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcKind {
    /// An open arc; may carry arrowheads
    Open,
    /// Closed through the center; never carries arrowheads
    PieWedge,
}

/// A circular arc through a start point, an interior point and an end point.
///
/// The center and turning direction are derived from the three points and
/// are only ever recomputed together with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub id: ObjectId,
    pub depth: i32,
    style: Style,
    kind: ArcKind,
    points: [Point; 3],
    center: DVec2,
    direction: Direction,
}

impl Arc {
    /// Build an arc from its three defining points.
    ///
    /// Fails when the points coincide or are collinear.
    pub fn new(kind: ArcKind, points: [Point; 3]) -> Result<Self, ModelError> {
        let [p0, p1, p2] = points.map(Point::to_vec);
        let center = compute_arccenter(p0, p1, p2)?;
        let direction = compute_direction(p0, p1, p2);
        Ok(Self::from_raw(kind, points, center, direction))
    }

    /// A piece of `parent` spanning `points`, which must lie on the parent's
    /// circle. The parent's center and direction are kept as-is so rounding of
    /// the new points cannot drift the circle.
    pub fn split_from(parent: &Arc, points: [Point; 3]) -> Self {
        Self::from_raw(parent.kind, points, parent.center, parent.direction)
            .with_style(parent.style.clone())
            .with_depth(parent.depth)
    }

    /// A pie wedge of the circle around `center`
    pub(crate) fn wedge(points: [Point; 3], center: DVec2, direction: Direction) -> Self {
        Self::from_raw(ArcKind::PieWedge, points, center, direction)
    }

    fn from_raw(kind: ArcKind, points: [Point; 3], center: DVec2, direction: Direction) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            depth: 50,
            style: Style::default(),
            kind,
            points,
            center,
            direction,
        }
    }

    /// Set the style; a pie wedge drops any arrowheads
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = match self.kind {
            ArcKind::Open => style,
            ArcKind::PieWedge => style.without_arrows(),
        };
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn kind(&self) -> ArcKind {
        self.kind
    }

    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[2]
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn radius(&self) -> f64 {
        self.center.distance(self.points[0].to_vec())
    }

    /// The full circle the arc lies on
    pub fn circle(&self) -> EllipseFrame {
        EllipseFrame::circle(self.center, self.radius())
    }

    /// Math-frame angle of `p` around the center
    pub fn angle_of(&self, p: DVec2) -> f64 {
        screen_angle(p - self.center)
    }

    /// Angle swept from the start, turning in the arc's direction, to `p`
    pub fn angle_from_start(&self, p: DVec2) -> f64 {
        let a0 = self.angle_of(self.points[0].to_vec());
        let a = self.angle_of(p);
        match self.direction {
            Direction::Counterclockwise => normalize_angle(a - a0),
            Direction::Clockwise => normalize_angle(a0 - a),
        }
    }

    /// Angle subtended by the arc, in `(0, 2π)`
    pub fn sweep(&self) -> f64 {
        self.angle_from_start(self.points[2].to_vec())
    }

    /// The point on the circle at `angle` (math frame)
    pub fn point_at_angle(&self, angle: f64) -> DVec2 {
        let r = self.radius();
        self.center + SCREEN.from_math(DVec2::from_angle(angle) * r)
    }

    /// The point halfway along the arc
    pub fn mid_angle_point(&self) -> DVec2 {
        let a0 = self.angle_of(self.points[0].to_vec());
        self.point_at_angle(a0 + self.direction.sign() * self.sweep() / 2.0)
    }

    /// The on-arc test for a point on the arc's circle: it belongs to the drawn
    /// arc when it lies on the same side of the start-end chord as the interior
    /// point. Points on the chord line (the endpoints) count.
    pub fn contains(&self, q: DVec2) -> bool {
        let [p0, p1, p2] = self.points.map(Point::to_vec);
        let chord = p2 - p0;
        let tol = ON_ARC_TOLERANCE * chord.length_squared().max(1.0);
        let side = cross3(p0, p2, q);
        if side.abs() <= tol {
            return true;
        }
        side.signum() == cross3(p0, p2, p1).signum()
    }

    /// Move one of the three defining points, recomputing center and direction.
    /// The arc is unchanged when the new points are degenerate.
    pub fn relocate_point(&mut self, index: usize, p: Point) -> Result<(), ModelError> {
        if index >= 3 {
            return Err(ModelError::IndexOutOfRange { index, len: 3 });
        }
        let mut points = self.points;
        points[index] = p;
        let moved = Arc::new(self.kind, points)?;
        self.points = moved.points;
        self.center = moved.center;
        self.direction = moved.direction;
        Ok(())
    }
}

impl Shape for Arc {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Arc
    }

    fn depth(&self) -> i32 {
        self.depth
    }

    fn bbox(&self) -> BBox {
        let mut bb = BBox::from_points(&self.points);
        for quarter in 0..4 {
            let extreme = self.point_at_angle(quarter as f64 * FRAC_PI_2);
            if self.contains(extreme) {
                bb.expand_point(Point::from_vec(extreme));
            }
        }
        if self.kind == ArcKind::PieWedge {
            bb.expand_point(Point::from_vec(self.center));
        }
        bb
    }

    fn style(&self) -> &Style {
        &self.style
    }
}
