//! The scene document: owner of every object, identity, lookup and picking

use std::ops::RangeInclusive;

use glam::DVec2;

use crate::geometry::close_to_vector;
use crate::model::{
    Arc, Compound, Ellipse, KindMask, Object, ObjectId, Polyline, Shape, Spline, Text,
};
use crate::types::Point;

/// Which objects a search may return
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub mask: KindMask,
    /// Active depth range; `None` accepts every depth
    pub depths: Option<RangeInclusive<i32>>,
}

impl Filter {
    pub fn new(mask: KindMask) -> Self {
        Self { mask, depths: None }
    }

    pub fn with_depths(mut self, depths: RangeInclusive<i32>) -> Self {
        self.depths = Some(depths);
        self
    }

    pub fn matches(&self, object: &Object) -> bool {
        self.mask.contains(object.kind())
            && self
                .depths
                .as_ref()
                .is_none_or(|range| range.contains(&object.depth()))
    }
}

/// Resumable state of a pick search.
///
/// Repeated picks at the same spot can step through overlapping objects by
/// setting `continue_from_last`; each caller owns its own cursor, so any
/// number of searches may be in flight.
#[derive(Debug, Clone, Default)]
pub struct SearchCursor {
    pub filter: Filter,
    /// Resume after the previous match instead of starting over
    pub continue_from_last: bool,
    position: usize,
}

impl SearchCursor {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            continue_from_last: false,
            position: 0,
        }
    }

    pub fn continuing(mut self) -> Self {
        self.continue_from_last = true;
        self
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

/// A point given either by coordinates or by reference to an object's point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRef {
    Coord(Point),
    /// Vertex `index` of a polyline (or control point of a spline)
    Vertex { object: ObjectId, index: usize },
    /// Defining point `index` (0..3) of an arc
    ArcPoint { object: ObjectId, index: usize },
}

impl From<Point> for PointRef {
    fn from(p: Point) -> Self {
        PointRef::Coord(p)
    }
}

/// Every object of a figure, top level first, compounds nesting the rest
#[derive(Debug, Clone, Default)]
pub struct Document {
    objects: Vec<Object>,
    next_id: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, assigning fresh ids to it and to every nested member
    pub fn insert(&mut self, object: impl Into<Object>) -> ObjectId {
        let mut object = object.into();
        self.assign_ids(&mut object);
        let id = object.id();
        crate::log::debug!(%id, kind = %object.kind(), "insert");
        self.objects.push(object);
        id
    }

    fn assign_ids(&mut self, object: &mut Object) {
        self.next_id += 1;
        object.set_id(ObjectId(self.next_id));
        if let Object::Compound(c) = object {
            for member in c.objects_mut() {
                self.assign_ids(member);
            }
        }
    }

    /// Remove a top-level object
    pub fn delete(&mut self, id: ObjectId) -> Option<Object> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        crate::log::debug!(%id, "delete");
        Some(self.objects.remove(index))
    }

    /// Look an object up anywhere, including inside compounds
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects
            .iter()
            .flat_map(Object::walk)
            .find(|o| o.id() == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Top-level objects accepted by `filter`
    pub fn filtered<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Object> + 'a {
        self.objects.iter().filter(move |o| filter.matches(o))
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.objects.iter().filter_map(|o| match o {
            Object::Polyline(l) => Some(l),
            _ => None,
        })
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.objects.iter().filter_map(|o| match o {
            Object::Arc(a) => Some(a),
            _ => None,
        })
    }

    pub fn ellipses(&self) -> impl Iterator<Item = &Ellipse> {
        self.objects.iter().filter_map(|o| match o {
            Object::Ellipse(e) => Some(e),
            _ => None,
        })
    }

    pub fn splines(&self) -> impl Iterator<Item = &Spline> {
        self.objects.iter().filter_map(|o| match o {
            Object::Spline(s) => Some(s),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.objects.iter().filter_map(|o| match o {
            Object::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn compounds(&self) -> impl Iterator<Item = &Compound> {
        self.objects.iter().filter_map(|o| match o {
            Object::Compound(c) => Some(c),
            _ => None,
        })
    }

    /// The next top-level object accepted by the cursor's filter whose outline
    /// passes within `tol` of `p`. The search wraps around once.
    pub fn find_near(&self, cursor: &mut SearchCursor, p: Point, tol: f64) -> Option<&Object> {
        let len = self.objects.len();
        if len == 0 {
            return None;
        }
        let start = if cursor.continue_from_last {
            cursor.position % len
        } else {
            0
        };
        let target = p.to_vec();
        for step in 0..len {
            let index = (start + step) % len;
            let object = &self.objects[index];
            if cursor.filter.matches(object) && outline_near(object, target, tol) {
                cursor.position = index + 1;
                return Some(object);
            }
        }
        None
    }

    /// Resolve a point reference to coordinates
    pub fn resolve(&self, point: &PointRef) -> Option<Point> {
        match *point {
            PointRef::Coord(p) => Some(p),
            PointRef::Vertex { object, index } => match self.get(object)? {
                Object::Polyline(l) => l.points().get(index).copied(),
                Object::Spline(s) => s.control_points().get(index).copied(),
                _ => None,
            },
            PointRef::ArcPoint { object, index } => match self.get(object)? {
                Object::Arc(a) => a.points().get(index).copied(),
                _ => None,
            },
        }
    }
}

fn path_near(points: &[Point], p: DVec2, tol: f64) -> bool {
    match points {
        [] => false,
        [only] => only.to_vec().distance(p) <= tol,
        _ => points
            .windows(2)
            .any(|w| close_to_vector(w[0].to_vec(), w[1].to_vec(), p, tol)),
    }
}

fn outline_near(object: &Object, p: DVec2, tol: f64) -> bool {
    match object {
        Object::Polyline(l) => path_near(l.points(), p, tol),
        Object::Spline(s) => path_near(s.control_points(), p, tol),
        Object::Arc(a) => {
            let offset = p - a.center();
            let r = a.radius();
            if (offset.length() - r).abs() > tol {
                return false;
            }
            let on_circle = a.center() + offset.normalize_or_zero() * r;
            a.contains(on_circle)
        }
        Object::Ellipse(e) => {
            let frame = e.frame();
            let local = frame.to_local(p);
            let scaled = (local / frame.radii).length();
            if !scaled.is_finite() || scaled == 0.0 {
                return false;
            }
            frame.to_world(local / scaled).distance(p) <= tol
        }
        Object::Text(t) => t.bbox().inflate(tol.ceil() as i32).contains(Point::from_vec(p)),
        Object::Compound(c) => c.objects().iter().any(|o| outline_near(o, p, tol)),
    }
}
