//! Similarity scorer.
//!
//! Three independent signals are combined into one accuracy:
//!
//! - aspect ratio of the raw (pre-normalization) bounding boxes,
//! - point distribution over a 5x5 grid laid on each normalized shape,
//! - directed Hausdorff distance from drawn points to reference points.
//!
//! The weighted sum is then rescaled so a raw score of 0.6 already counts as a
//! perfect drawing. This is a practice aid heuristic, not a recognizer.

use crate::config::ScoringConfig;
use crate::geometry::{Bounds, NormalizedShape, Point, normalize};
use crate::reference::ReferenceCharacterEntry;

pub const MSG_CORRECT: &str = "Well done! Your character matches.";
pub const MSG_RETRY: &str = "Not quite. Check the proportions and try again.";
pub const MSG_INCOMPLETE: &str = "Incomplete drawing. Keep going!";

/// Outcome of one verification call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VerificationResult {
    pub is_correct: bool,
    pub message: String,
    /// In `[0, 1]`.
    pub accuracy: f64,
}

impl VerificationResult {
    pub fn incomplete() -> Self {
        Self {
            is_correct: false,
            message: MSG_INCOMPLETE.to_string(),
            accuracy: 0.0,
        }
    }

    /// Apply the pass bar to an accuracy. Passing is strictly above the threshold.
    pub fn from_accuracy(accuracy: f64, config: &ScoringConfig) -> Self {
        let is_correct = accuracy > config.pass_threshold;
        Self {
            is_correct,
            message: if is_correct { MSG_CORRECT } else { MSG_RETRY }.to_string(),
            accuracy,
        }
    }
}

/// Individual signals behind an accuracy value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreBreakdown {
    pub aspect: f64,
    pub distribution: f64,
    pub shape: f64,
    /// Weighted sum before rescaling.
    pub raw: f64,
    pub accuracy: f64,
}

/// `1 - min(1, |drawn aspect - reference aspect|)`.
///
/// Width and height are floored at `min_extent` first, so a perfectly straight
/// line gets a large but finite aspect instead of dividing by zero.
pub fn aspect_score(drawn: &Bounds, reference: &Bounds, config: &ScoringConfig) -> f64 {
    let aspect = |b: &Bounds| b.width.max(config.min_extent) / b.height.max(config.min_extent);
    1.0 - (aspect(drawn) - aspect(reference)).abs().min(1.0)
}

// Per-cell point counts; the grid is laid over the set's own bounding box.
fn cell_counts(points: &[Point], cells: usize) -> Vec<u32> {
    let mut counts = vec![0u32; cells * cells];
    let Some(b) = Bounds::of(points) else {
        return counts;
    };
    let last = cells.saturating_sub(1);
    let index = |c: f64, min: f64, extent: f64| -> usize {
        let extent = if extent == 0.0 { 1.0 } else { extent };
        let i = ((c - min) / extent * last as f64).floor();
        (i.max(0.0) as usize).min(last)
    };
    for p in points {
        let cx = index(p.x, b.min_x, b.width);
        let cy = index(p.y, b.min_y, b.height);
        counts[cy * cells + cx] += 1;
    }
    counts
}

/// Mean per-cell agreement of the point counts of two shapes.
pub fn distribution_score(drawn: &[Point], reference: &[Point], cells: usize) -> f64 {
    if cells == 0 {
        return 0.0;
    }
    let d = cell_counts(drawn, cells);
    let r = cell_counts(reference, cells);
    let total: f64 = d
        .iter()
        .zip(&r)
        .map(|(&dc, &rc)| {
            let denom = dc.max(rc).max(1) as f64;
            1.0 - (dc as f64 - rc as f64).abs() / denom
        })
        .sum();
    total / (cells * cells) as f64
}

/// Largest distance from any point of `from` to its nearest point in `to`.
///
/// Returns `None` when either set is empty.
pub fn directed_hausdorff(from: &[Point], to: &[Point]) -> Option<f64> {
    if from.is_empty() || to.is_empty() {
        return None;
    }
    let worst = from
        .iter()
        .map(|p| to.iter().map(|q| p.distance(*q)).fold(f64::INFINITY, f64::min))
        .fold(0.0, f64::max);
    Some(worst)
}

pub fn shape_score(drawn: &[Point], reference: &[Point], config: &ScoringConfig) -> f64 {
    match directed_hausdorff(drawn, reference) {
        Some(h) => (1.0 - config.distance_gain * h).max(0.0),
        None => 0.0,
    }
}

/// Score two normalized shapes.
pub fn score(drawn: &NormalizedShape, reference: &NormalizedShape, config: &ScoringConfig) -> ScoreBreakdown {
    let aspect = aspect_score(&drawn.bounds, &reference.bounds, config);
    let distribution = distribution_score(&drawn.points, &reference.points, config.grid_cells);
    let shape = shape_score(&drawn.points, &reference.points, config);
    let raw = config.shape_weight * shape + config.aspect_weight * aspect + config.distribution_weight * distribution;
    let accuracy = (raw / config.full_marks_at).clamp(0.0, 1.0);
    ScoreBreakdown {
        aspect,
        distribution,
        shape,
        raw,
        accuracy,
    }
}

/// Verify a drawing against a reference entry.
///
/// Drawings with fewer than `config.min_points` points are not scored at all.
pub fn verify(drawn_points: &[Point], entry: &ReferenceCharacterEntry, config: &ScoringConfig) -> VerificationResult {
    if drawn_points.len() < config.min_points {
        return VerificationResult::incomplete();
    }
    let drawn = normalize(drawn_points);
    let reference = normalize(&entry.reference_points);
    let breakdown = score(&drawn, &reference, config);
    log::debug!(
        "verify {:?}: aspect={:.3} distribution={:.3} shape={:.3} raw={:.3} accuracy={:.3}",
        entry.character,
        breakdown.aspect,
        breakdown.distribution,
        breakdown.shape,
        breakdown.raw,
        breakdown.accuracy
    );
    VerificationResult::from_accuracy(breakdown.accuracy, config)
}
