//! Nested groups of objects

use crate::types::BBox;

use super::{Object, ObjectId, ObjectKind, Shape};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    pub id: ObjectId,
    objects: Vec<Object>,
}

impl Compound {
    pub fn new(objects: Vec<Object>) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            objects,
        }
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub(crate) fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn into_objects(self) -> Vec<Object> {
        self.objects
    }
}

impl Shape for Compound {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Compound
    }

    /// The shallowest member's depth
    fn depth(&self) -> i32 {
        self.objects.iter().map(|o| o.depth()).min().unwrap_or(0)
    }

    fn bbox(&self) -> BBox {
        let mut bb = BBox::new();
        for o in &self.objects {
            bb.union(&o.bbox());
        }
        bb
    }
}
