//! Engine configuration threaded through snap, intersect and chop.

use crate::defaults;
use crate::types::{NumericError, non_negative};

/// Tunable engine settings.
///
/// `Config::default()` reproduces the calibrated legacy behavior. The
/// `with_*` setters are unchecked; use the `try_*` variants for values that
/// come from the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Keep the snap mode active after a successful query
    pub hold: bool,
    /// Pick distance for `Document::find_near`
    pub pick_tolerance: f64,
    /// Shortest arc a chop may emit
    pub min_chop_arc_length: f64,
    /// Segment parameter slack for intersection tests
    pub segment_tolerance: f64,
    /// Normal/anchor alignment tolerance for ellipse normals
    pub alignment_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold: false,
            pick_tolerance: defaults::PICK_TOLERANCE,
            min_chop_arc_length: defaults::MIN_CHOP_ARC_LENGTH,
            segment_tolerance: defaults::SEGMENT_PARAM_TOLERANCE,
            alignment_tolerance: defaults::ALIGNMENT_TOLERANCE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn with_pick_tolerance(mut self, tol: f64) -> Self {
        self.pick_tolerance = tol;
        self
    }

    pub fn try_pick_tolerance(self, tol: f64) -> Result<Self, NumericError> {
        Ok(self.with_pick_tolerance(non_negative(tol)?))
    }

    pub fn with_min_chop_arc_length(mut self, len: f64) -> Self {
        self.min_chop_arc_length = len;
        self
    }

    pub fn try_min_chop_arc_length(self, len: f64) -> Result<Self, NumericError> {
        Ok(self.with_min_chop_arc_length(non_negative(len)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_calibrated_constants() {
        let cfg = Config::default();
        assert!(!cfg.hold);
        assert_eq!(cfg.pick_tolerance, defaults::PICK_TOLERANCE);
        assert_eq!(cfg.min_chop_arc_length, defaults::MIN_CHOP_ARC_LENGTH);
    }

    #[test]
    fn try_setters_validate() {
        assert_eq!(
            Config::new().try_pick_tolerance(-1.0),
            Err(NumericError::Negative)
        );
        assert_eq!(
            Config::new().try_min_chop_arc_length(f64::NAN),
            Err(NumericError::NaN)
        );
        let cfg = Config::new().try_pick_tolerance(3.0).unwrap().with_hold(true);
        assert_eq!(cfg.pick_tolerance, 3.0);
        assert!(cfg.hold);
    }
}
