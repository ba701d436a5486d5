//! Scoring knobs.
//!
//! The defaults are the tuned product values (weights 0.4 / 0.3 / 0.3, rescale
//! at 0.6, pass bar 0.92). Changing them changes how hard practice feels.

use crate::error::StrokeError;

/// Heuristic constants for [`crate::scorer`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringConfig {
    /// Attempts with fewer points are rejected as incomplete.
    pub min_points: usize,
    /// `accuracy` must be strictly greater than this to pass.
    pub pass_threshold: f64,
    /// A raw combined score at this value maps to accuracy 1.0.
    pub full_marks_at: f64,
    pub shape_weight: f64,
    pub aspect_weight: f64,
    pub distribution_weight: f64,
    /// Cells per axis of the point distribution grid.
    pub grid_cells: usize,
    /// Multiplier turning the directed Hausdorff distance into a penalty.
    pub distance_gain: f64,
    /// Floor for width/height when computing aspect ratios (one pixel / design unit).
    pub min_extent: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_points: 10,
            pass_threshold: 0.92,
            full_marks_at: 0.6,
            shape_weight: 0.4,
            aspect_weight: 0.3,
            distribution_weight: 0.3,
            grid_cells: 5,
            distance_gain: 2.0,
            min_extent: 1.0,
        }
    }
}

/// Upper bound for [`ScoringConfig::grid_cells`].
pub const MAX_GRID_CELLS: usize = 64;

impl ScoringConfig {
    /// Reject values that would make scores NaN or the grid unbounded.
    pub fn validate(&self) -> Result<(), StrokeError> {
        let invalid = |msg: String| Err(StrokeError::InvalidInput(msg));
        if !(self.full_marks_at.is_finite() && self.full_marks_at > 0.0) {
            return invalid(format!("full_marks_at must be positive, got {}", self.full_marks_at));
        }
        if !(1..=MAX_GRID_CELLS).contains(&self.grid_cells) {
            return invalid(format!("grid_cells must be in 1..={MAX_GRID_CELLS}, got {}", self.grid_cells));
        }
        if !(self.min_extent.is_finite() && self.min_extent > 0.0) {
            return invalid(format!("min_extent must be positive, got {}", self.min_extent));
        }
        if !(0.0..=1.0).contains(&self.pass_threshold) {
            return invalid(format!("pass_threshold must be in [0, 1], got {}", self.pass_threshold));
        }
        let non_negative = [
            ("shape_weight", self.shape_weight),
            ("aspect_weight", self.aspect_weight),
            ("distribution_weight", self.distribution_weight),
            ("distance_gain", self.distance_gain),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return invalid(format!("{name} must be finite and non-negative, got {v}"));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde_json")]
impl ScoringConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep their
    /// defaults. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, StrokeError> {
        let config: Self = serde_json::from_str(json).map_err(|e| StrokeError::InvalidInput(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let c = ScoringConfig::default();
        assert!((c.shape_weight + c.aspect_weight + c.distribution_weight - 1.0).abs() < 1e-12);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let c = ScoringConfig::from_json(r#"{"pass_threshold": 0.8, "min_points": 4}"#).unwrap();
        assert_eq!(c.min_points, 4);
        assert_eq!(c.pass_threshold, 0.8);
        assert_eq!(c.full_marks_at, 0.6);
        assert_eq!(c.grid_cells, 5);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ScoringConfig::default().validate(), Ok(()));
    }

    #[test]
    fn degenerate_values_are_rejected() {
        let bad = [
            ScoringConfig { full_marks_at: 0.0, ..Default::default() },
            ScoringConfig { full_marks_at: -0.5, ..Default::default() },
            ScoringConfig { full_marks_at: f64::NAN, ..Default::default() },
            ScoringConfig { grid_cells: 0, ..Default::default() },
            ScoringConfig { grid_cells: MAX_GRID_CELLS + 1, ..Default::default() },
            ScoringConfig { grid_cells: usize::MAX, ..Default::default() },
            ScoringConfig { min_extent: 0.0, ..Default::default() },
            ScoringConfig { min_extent: f64::INFINITY, ..Default::default() },
            ScoringConfig { pass_threshold: -0.1, ..Default::default() },
            ScoringConfig { pass_threshold: 1.5, ..Default::default() },
            ScoringConfig { pass_threshold: f64::NAN, ..Default::default() },
            ScoringConfig { shape_weight: -0.4, ..Default::default() },
            ScoringConfig { aspect_weight: f64::NAN, ..Default::default() },
            ScoringConfig { distribution_weight: f64::INFINITY, ..Default::default() },
            ScoringConfig { distance_gain: -2.0, ..Default::default() },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(StrokeError::InvalidInput(_))), "{:?} accepted", c);
        }
    }

    #[test]
    fn edge_values_are_accepted() {
        let edges = [
            ScoringConfig { grid_cells: 1, ..Default::default() },
            ScoringConfig { grid_cells: MAX_GRID_CELLS, ..Default::default() },
            ScoringConfig { pass_threshold: 0.0, ..Default::default() },
            ScoringConfig { pass_threshold: 1.0, ..Default::default() },
            ScoringConfig { distance_gain: 0.0, ..Default::default() },
        ];
        for c in edges {
            assert_eq!(c.validate(), Ok(()), "{:?} rejected", c);
        }
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_with_degenerate_values_is_rejected() {
        for json in [
            r#"{"full_marks_at": 0}"#,
            r#"{"grid_cells": 8589934592}"#,
            r#"{"grid_cells": 0}"#,
            r#"{"min_extent": 0}"#,
            r#"{"pass_threshold": 2}"#,
            r#"{"shape_weight": -1}"#,
            r#"{"distance_gain": -1}"#,
        ] {
            let err = ScoringConfig::from_json(json).unwrap_err();
            assert!(matches!(err, StrokeError::InvalidInput(_)), "{json}");
        }
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_invalid_input() {
        let err = ScoringConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, StrokeError::InvalidInput(_)));
    }
}
