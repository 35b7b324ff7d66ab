//! Calibrated tolerances and defaults.
//!
//! These are tuned against the legacy editor's behavior; changing them moves
//! tie-breaks between candidates, not just precision.

/// Root classification epsilon for the closed-form polynomial solvers.
pub const EQN_EPS: f64 = 1e-9;

/// Slack on a segment's parametric range `[0, 1]` so hits on endpoints count.
pub const SEGMENT_PARAM_TOLERANCE: f64 = 1e-9;

/// Two parametric lines closer to parallel than this (normalized cross
/// product) do not intersect.
pub const PARALLEL_TOLERANCE: f64 = 1e-10;

/// Minimum |sin| between the chords p1p2 and p1p3 for a circumcenter to exist.
/// Only rounding noise on truly collinear points stays under it; a gentle
/// arc with a radius far beyond its chord still has a center.
pub const COLLINEAR_TOLERANCE: f64 = 1e-12;

/// Maximum |cross| between the unit normal at a candidate and the unit
/// anchor-to-candidate vector for the candidate to count as a normal foot.
pub const ALIGNMENT_TOLERANCE: f64 = 1e-3;

/// Residual allowed when checking a candidate against a conic equation
/// (dimensionless, the conic is normalized to its radii).
pub const CONIC_RESIDUAL: f64 = 1e-4;

/// Hits closer than this (device units) inside one handler are one hit.
pub const COINCIDENT_HIT: f64 = 1e-2;

/// Shortest arc (device units of arc length) that chopping may emit.
pub const MIN_CHOP_ARC_LENGTH: f64 = 2.0;

/// How close (device units) a click must be to an object's outline to pick it.
pub const PICK_TOLERANCE: f64 = 6.0;

/// Newton refinement steps applied to every closed-form root.
pub const POLISH_STEPS: usize = 3;

/// A point whose signed area against an arc's chord is below this fraction of
/// the squared chord length counts as lying on the chord line.
pub const ON_ARC_TOLERANCE: f64 = 1e-9;
