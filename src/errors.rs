//! Error types with diagnostic codes using miette
//!
//! The `Display` text of every user-facing error is the status line message
//! the editor shows. Each failure produces exactly one of these, so a
//! specific message is never replaced by a generic one further up.

use miette::Diagnostic;
use thiserror::Error;

use crate::model::{ObjectId, ObjectKind};
use crate::snap::SnapMode;

// ============================================================================
// Geometry Errors
// ============================================================================

/// A degenerate input to one of the scalar geometry routines
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomError {
    #[error("points coincide")]
    #[diagnostic(code(figgeom::geom::coincident_points))]
    CoincidentPoints,

    #[error("points are collinear")]
    #[diagnostic(
        code(figgeom::geom::collinear),
        help("three collinear points do not define a circle")
    )]
    Collinear,

    #[error("zero-length vector")]
    #[diagnostic(code(figgeom::geom::zero_length))]
    ZeroLength,

    #[error("no real solution")]
    #[diagnostic(code(figgeom::geom::no_real_roots))]
    NoRealRoots,
}

// ============================================================================
// Snap Errors
// ============================================================================

/// Errors from the constrained closest-point queries
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SnapError {
    #[error("no snap mode selected")]
    #[diagnostic(code(figgeom::snap::no_mode))]
    NoMode,

    #[error("no such point: {mode} is not defined for a {kind}")]
    #[diagnostic(code(figgeom::snap::invalid_mode))]
    InvalidMode { mode: SnapMode, kind: ObjectKind },

    #[error("{mode} snap on a {kind} is not yet implemented")]
    #[diagnostic(code(figgeom::snap::not_implemented))]
    NotImplemented { mode: SnapMode, kind: ObjectKind },

    #[error("{mode} snap needs a starting point")]
    #[diagnostic(
        code(figgeom::snap::needs_anchor),
        help("place the first point of the line before snapping its second")
    )]
    NeedsAnchor { mode: SnapMode },

    #[error("no tangent: the starting point is not outside the {kind}")]
    #[diagnostic(code(figgeom::snap::anchor_inside))]
    AnchorInside { kind: ObjectKind },

    #[error("no {mode} point found on the {kind}")]
    #[diagnostic(code(figgeom::snap::not_found))]
    NotFound { mode: SnapMode, kind: ObjectKind },

    #[error("{mode} point falls off the arc")]
    #[diagnostic(code(figgeom::snap::off_arc))]
    OffArc { mode: SnapMode },

    #[error("objects do not intersect")]
    #[diagnostic(code(figgeom::snap::no_intersection))]
    NoIntersection,

    #[error("object {0} not found")]
    #[diagnostic(code(figgeom::snap::object_not_found))]
    ObjectNotFound(ObjectId),

    #[error("starting point does not resolve to a point in the figure")]
    #[diagnostic(code(figgeom::snap::dangling_anchor))]
    DanglingAnchor,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeomError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Intersect(#[from] IntersectError),
}

// ============================================================================
// Intersection Errors
// ============================================================================

/// Errors from the pairwise intersection engine
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectError {
    #[error("an object cannot be intersected with itself")]
    #[diagnostic(
        code(figgeom::intersect::self_intersection),
        help("pick two different objects")
    )]
    SelfIntersection,

    #[error("intersections with a {kind} are not supported")]
    #[diagnostic(
        code(figgeom::intersect::unsupported),
        help("only polylines, arcs, circles and ellipses can be intersected")
    )]
    Unsupported { kind: ObjectKind },
}

// ============================================================================
// Chop Errors
// ============================================================================

/// Errors from the chop engine
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ChopError {
    #[error("no axe objects selected")]
    #[diagnostic(
        code(figgeom::chop::no_axes),
        help("select one or more cutting objects before choosing the object to chop")
    )]
    NoAxes,

    #[error("object already selected as an axe")]
    #[diagnostic(code(figgeom::chop::duplicate_axe))]
    DuplicateAxe,

    #[error("a {kind} cannot be used as an axe")]
    #[diagnostic(code(figgeom::chop::unsupported_axe))]
    UnsupportedAxe { kind: ObjectKind },

    #[error("an object cannot chop itself")]
    #[diagnostic(code(figgeom::chop::self_chop))]
    SelfChop,

    #[error("no intersections with selected axe objects")]
    #[diagnostic(code(figgeom::chop::no_intersections))]
    NoIntersections,

    #[error("closed figures need two or more intersections")]
    #[diagnostic(code(figgeom::chop::closed_needs_two))]
    ClosedNeedsTwo,

    #[error("a circle needs two or more intersections")]
    #[diagnostic(code(figgeom::chop::circle_needs_two))]
    CircleNeedsTwo,

    #[error("the axes do not cross the arc")]
    #[diagnostic(code(figgeom::chop::arc_needs_cut))]
    ArcNeedsCut,

    #[error("every piece was degenerate; nothing chopped")]
    #[diagnostic(code(figgeom::chop::no_pieces))]
    NoPieces,

    #[error("chopping ellipses is not yet supported")]
    #[diagnostic(
        code(figgeom::chop::ellipse_unsupported),
        help("only circles can be chopped into wedges")
    )]
    EllipseUnsupported,

    #[error("a {what} cannot be chopped")]
    #[diagnostic(
        code(figgeom::chop::unsupported_log),
        help("polylines, polygons, boxes, arcs and circles can be chopped")
    )]
    UnsupportedLog { what: &'static str },

    #[error("object {0} not found")]
    #[diagnostic(code(figgeom::chop::object_not_found))]
    NotFound(ObjectId),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Intersect(#[from] IntersectError),
}

// ============================================================================
// Model Errors
// ============================================================================

/// A primitive that would violate its structural invariants
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("a {what} needs at least {needed} points, got {got}")]
    #[diagnostic(code(figgeom::model::too_few_points))]
    TooFewPoints {
        what: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("a {what} has a fixed number of points")]
    #[diagnostic(code(figgeom::model::fixed_point_count))]
    FixedPointCount { what: &'static str },

    #[error("point index {index} out of range for {len} points")]
    #[diagnostic(code(figgeom::model::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid radius: {0}")]
    #[diagnostic(code(figgeom::model::invalid_radius))]
    InvalidRadius(crate::types::NumericError),

    #[error("invalid angle: {0}")]
    #[diagnostic(code(figgeom::model::invalid_angle))]
    InvalidAngle(crate::types::NumericError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeomError),
}
