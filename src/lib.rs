//! Geometry engine for an interactive 2D figure editor.
//!
//! The engine answers three kinds of questions about the objects of a
//! figure:
//! - [`snap`]: where is the endpoint, midpoint, tangent point, normal foot,
//!   focus, diametric opposite or nearest point of an object
//! - [`intersect`]: where do two objects meet
//! - [`chop`]: split an object at every point where chosen "axe" objects
//!   cross it, replacing it in the [`Document`] with the pieces
//!
//! Stored coordinates are integer device units with y growing downward;
//! everything in between is `f64` math on `glam::DVec2`. Failures are
//! values: every public operation returns a `Result` whose error text is the
//! status message shown to the user.
//!
//! ```
//! use figgeom::{ChopSession, Config, Document, MessageLog, Point, Polyline};
//!
//! let mut doc = Document::new();
//! let square = doc.insert(
//!     Polyline::polygon(vec![
//!         Point::new(0, 0),
//!         Point::new(10, 0),
//!         Point::new(10, 10),
//!         Point::new(0, 10),
//!     ])
//!     .unwrap(),
//! );
//! let axe = doc.insert(Polyline::line(vec![Point::new(5, -5), Point::new(5, 15)]).unwrap());
//!
//! let mut log = MessageLog::new();
//! let mut chop = ChopSession::new();
//! chop.add_axe(&doc, axe, &mut log).unwrap();
//! let report = chop.chop(&mut doc, square, &Config::default(), &mut log).unwrap();
//! assert_eq!(report.pieces.len(), 2);
//! assert_eq!(log.last_message(), Some("chop produced 2 pieces"));
//! ```

pub mod chop;
pub mod config;
pub mod defaults;
pub mod document;
pub mod errors;
pub mod feedback;
pub mod geometry;
pub mod intersect;
mod log;
pub mod model;
pub mod snap;
pub mod types;

pub use chop::{ChopReport, ChopSession, ChopState};
pub use config::Config;
pub use document::{Document, Filter, PointRef, SearchCursor};
pub use errors::{ChopError, GeomError, IntersectError, ModelError, SnapError};
pub use feedback::{Feedback, MessageLog, Silent};
pub use intersect::{Hit, Intersections, intersect};
pub use model::{
    Arc, ArcKind, Compound, Ellipse, EllipseKind, Justify, KindMask, Object, ObjectId, ObjectKind,
    Polyline, PolylineKind, Shape, Spline, Style, Text,
};
pub use snap::{SnapMode, SnapOutcome, SnapPoint, SnapRequest, SnapSession, snap_to};
pub use types::{BBox, Direction, Point, SCREEN, YAxis};
