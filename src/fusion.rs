//! Blend an external recognizer's confidence with the geometric score.
//!
//! The geometric scorer runs conservative in the mid range, so quality
//! is lifted first, then blended with the confidence and penalized
//! for stroke-count mismatch. The result is capped by the lifted quality so
//! a confident recognizer cannot rescue a badly formed character.

use serde::{Deserialize, Serialize};

const CONFIDENCE_WEIGHT_USED: f64 = 0.55;
const CONFIDENCE_WEIGHT_FALLBACK: f64 = 0.35;
const PENALTY_SCALE_USED: f64 = 0.8;
const PENALTY_SCALE_FALLBACK: f64 = 0.35;
/// Raw confidences at or below this are read as 0–1 fractions.
const FRACTION_LIMIT: f64 = 1.2;
const NEAR_PERFECT_BONUS: f64 = 4.0;
const POOR_FORM_FLOOR: f64 = 52.0;

/// Fused score plus the intermediate values that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub score: u8,
    /// Confidence on a 0–100 scale (the adjusted quality when unusable).
    pub confidence_percent: f64,
    pub adjusted_quality: f64,
    /// Stroke-count penalty after weighting.
    pub penalty: f64,
    /// Effective upper bound: the quality-tier cap, lowered for poor form.
    pub cap: f64,
    pub confidence_weight: f64,
    pub quality_weight: f64,
    pub bonus: f64,
    pub used_confidence: bool,
}

/// Tiered lift of the raw quality score, clamped to `[0, 100]`.
pub fn adjusted_quality(quality: f64) -> f64 {
    let q = if quality < 30.0 {
        quality * 0.95
    } else if quality < 40.0 {
        quality + 7.0
    } else if quality < 60.0 {
        quality + 16.0
    } else if quality < 70.0 {
        quality + 12.0
    } else if quality < 80.0 {
        quality + 8.0
    } else if quality < 90.0 {
        quality + 4.0
    } else {
        quality
    };
    q.clamp(0.0, 100.0)
}

/// Put a raw confidence on a 0–100 scale; `None` when it is absent or non-finite.
pub fn confidence_percent(confidence: Option<f64>) -> Option<f64> {
    let c = confidence.filter(|c| c.is_finite())?;
    let percent = if c <= FRACTION_LIMIT { c * 100.0 } else { c.min(100.0) };
    Some(percent.clamp(0.0, 100.0))
}

fn stroke_penalty(diff: usize) -> f64 {
    match diff {
        0 => 0.0,
        1 => 1.0,
        2 => 3.0,
        3 => 5.0,
        _ => 8.0,
    }
}

fn quality_cap(adjusted: f64) -> f64 {
    match adjusted {
        q if q < 30.0 => 52.0,
        q if q < 40.0 => 58.0,
        q if q < 50.0 => 72.0,
        q if q < 60.0 => 82.0,
        q if q < 70.0 => 90.0,
        q if q < 80.0 => 95.0,
        _ => 100.0,
    }
}

/// Fuse an optional recognizer confidence with a 0–100 quality score.
pub fn fuse(confidence: Option<f64>, quality: i32, stroke_count: usize, expected_stroke_count: usize) -> FusionResult {
    let adjusted = adjusted_quality(quality as f64);
    let used_confidence = confidence.is_some_and(f64::is_finite);
    let percent = confidence_percent(confidence).unwrap_or(adjusted);

    let confidence_weight = if used_confidence {
        CONFIDENCE_WEIGHT_USED
    } else {
        CONFIDENCE_WEIGHT_FALLBACK
    };
    let quality_weight = 1.0 - confidence_weight;

    let scale = if used_confidence { PENALTY_SCALE_USED } else { PENALTY_SCALE_FALLBACK };
    let penalty = stroke_penalty(stroke_count.abs_diff(expected_stroke_count)) * scale;

    let blended = percent * confidence_weight + adjusted * quality_weight - penalty;
    let bonus = if adjusted >= 90.0 && percent >= 88.0 { NEAR_PERFECT_BONUS } else { 0.0 };
    let floor = if adjusted < 30.0 { POOR_FORM_FLOOR } else { 100.0 };
    let cap = quality_cap(adjusted).min(floor);

    let score = (blended.round() + bonus).clamp(0.0, 100.0).min(cap);
    tracing::debug!(
        "fusion: confidence {:?} -> {:.1}% (used {}), quality {} -> {:.1}, penalty {:.2}, blended {:.2}, bonus {}, cap {}",
        confidence, percent, used_confidence, quality, adjusted, penalty, blended, bonus, cap,
    );

    FusionResult {
        score: score as u8,
        confidence_percent: percent,
        adjusted_quality: adjusted,
        penalty,
        cap,
        confidence_weight,
        quality_weight,
        bonus,
        used_confidence,
    }
}
