//! Primitive model: the passive objects a figure is made of
//!
//! Every primitive carries an [`ObjectId`] (assigned by the document), a
//! depth, and its [`Style`]. The [`Object`] enum stores them uniformly and
//! dispatches the [`Shape`] trait to each variant.

mod arc;
mod compound;
mod ellipse;
mod polyline;
mod spline;
mod text;

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::types::{BBox, Color};

pub use arc::{Arc, ArcKind};
pub use compound::Compound;
pub use ellipse::{Ellipse, EllipseKind};
pub use polyline::{Polyline, PolylineKind};
pub use spline::Spline;
pub use text::{Justify, Text};

/// Identity of an object within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    /// Id carried by objects that have not been inserted into a document
    pub const UNASSIGNED: ObjectId = ObjectId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The primitive type of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Polyline,
    Arc,
    Ellipse,
    Spline,
    Text,
    Compound,
}

impl ObjectKind {
    const fn bit(self) -> u8 {
        match self {
            ObjectKind::Polyline => 1,
            ObjectKind::Arc => 1 << 1,
            ObjectKind::Ellipse => 1 << 2,
            ObjectKind::Spline => 1 << 3,
            ObjectKind::Text => 1 << 4,
            ObjectKind::Compound => 1 << 5,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Polyline => "polyline",
            ObjectKind::Arc => "arc",
            ObjectKind::Ellipse => "ellipse",
            ObjectKind::Spline => "spline",
            ObjectKind::Text => "text",
            ObjectKind::Compound => "compound",
        };
        f.write_str(name)
    }
}

/// Set of object kinds a search is allowed to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindMask(u8);

impl KindMask {
    pub const NONE: KindMask = KindMask(0);
    pub const ALL: KindMask = KindMask(0x3f);
    /// The kinds the intersection engine accepts
    pub const INTERSECTABLE: KindMask = KindMask::NONE
        .with(ObjectKind::Polyline)
        .with(ObjectKind::Arc)
        .with(ObjectKind::Ellipse);

    pub const fn only(kind: ObjectKind) -> KindMask {
        KindMask(kind.bit())
    }

    pub const fn with(self, kind: ObjectKind) -> KindMask {
        KindMask(self.0 | kind.bit())
    }

    pub const fn without(self, kind: ObjectKind) -> KindMask {
        KindMask(self.0 & !kind.bit())
    }

    pub const fn contains(self, kind: ObjectKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

impl Default for KindMask {
    fn default() -> Self {
        KindMask::ALL
    }
}

/// Dash pattern of an outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDotted,
    DashDoubleDotted,
    DashTripleDotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStyle {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapStyle {
    #[default]
    Butt,
    Round,
    Projecting,
}

/// An arrowhead on one end of an open object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    /// Arrowhead shape number
    pub shape: u8,
    pub filled: bool,
    pub thickness: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            shape: 0,
            filled: false,
            thickness: 1.0,
            width: 4.0,
            height: 8.0,
        }
    }
}

/// Drawing attributes that travel with an object.
///
/// Chopping copies this verbatim onto every fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub pen_color: Color,
    pub fill_color: Color,
    pub thickness: i32,
    pub line_style: LineStyle,
    /// Dash length or dot gap for non-solid line styles
    pub style_val: f64,
    pub join: JoinStyle,
    pub cap: CapStyle,
    /// Area fill intensity, `None` when unfilled
    pub area_fill: Option<u8>,
    pub forward_arrow: Option<Arrow>,
    pub backward_arrow: Option<Arrow>,
}

impl Style {
    pub const PLAIN: Style = Style {
        pen_color: Color::Default,
        fill_color: Color::Default,
        thickness: 1,
        line_style: LineStyle::Solid,
        style_val: 0.0,
        join: JoinStyle::Miter,
        cap: CapStyle::Butt,
        area_fill: None,
        forward_arrow: None,
        backward_arrow: None,
    };

    /// The same style with both arrowheads removed
    pub fn without_arrows(&self) -> Style {
        Style {
            forward_arrow: None,
            backward_arrow: None,
            ..self.clone()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::PLAIN
    }
}

static PLAIN_STYLE: Style = Style::PLAIN;

/// Common behavior for all primitives
#[enum_dispatch]
pub trait Shape {
    /// Document identity (`ObjectId::UNASSIGNED` before insertion)
    fn id(&self) -> ObjectId;

    fn set_id(&mut self, id: ObjectId);

    fn kind(&self) -> ObjectKind;

    /// Drawing depth; lower is closer to the viewer
    fn depth(&self) -> i32;

    fn bbox(&self) -> BBox;

    fn style(&self) -> &Style {
        &PLAIN_STYLE
    }
}

/// An object wrapping all primitive types
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Polyline,
    Arc,
    Ellipse,
    Spline,
    Text,
    Compound,
}

impl Object {
    /// This object and, for compounds, every nested member (depth first)
    pub fn walk(&self) -> Vec<&Object> {
        let mut out = Vec::new();
        self.walk_into(&mut out);
        out
    }

    fn walk_into<'a>(&'a self, out: &mut Vec<&'a Object>) {
        out.push(self);
        if let Object::Compound(c) = self {
            for member in c.objects() {
                member.walk_into(out);
            }
        }
    }

    /// Short label used in status messages ("circle" rather than "ellipse")
    pub fn label(&self) -> &'static str {
        match self {
            Object::Polyline(l) => l.kind().label(),
            Object::Arc(a) => match a.kind() {
                ArcKind::Open => "arc",
                ArcKind::PieWedge => "pie wedge",
            },
            Object::Ellipse(e) if e.is_circle() => "circle",
            Object::Ellipse(_) => "ellipse",
            Object::Spline(_) => "spline",
            Object::Text(_) => "text",
            Object::Compound(_) => "compound",
        }
    }
}
