//! inkscore: handwriting similarity scoring against character templates.
//!
//! Compares freehand ink strokes with a reference stroke template and
//! produces a 0–100 score plus feedback. The score can optionally be
//! fused with an external recognizer's confidence.
//!
//! # Example
//!
//! ```
//! use inkscore::{score, InkSample, Stroke, StrokeTemplate};
//!
//! let template = StrokeTemplate::new(
//!     "yi", "一", 0.1,
//!     vec![Stroke::from_xy(&[(0.125, 0.5), (0.5, 0.5), (0.875, 0.5)])],
//! );
//! let ink = InkSample::new(vec![Stroke::from_xy(&[(32.0, 128.0), (128.0, 130.0), (224.0, 128.0)])])
//!     .with_canvas(256.0, 256.0);
//! let result = score(&ink, &template);
//! assert!(result.score > 80);
//! ```

#![forbid(unsafe_code)]

mod combine;
mod config;
mod descriptor;
mod geom;
mod matcher;
mod metrics;
mod model;
mod preprocess;

pub mod error;
pub mod fusion;
pub mod recognizer;

// Re-export kurbo so callers build points with the same version.
pub use kurbo;

pub use config::ScoringConfig;
pub use error::InkError;
pub use fusion::{fuse, FusionResult};
pub use geom::resample;
pub use model::{HandwritingScore, InkSample, MatchedStroke, ScoreBreakdown, Stroke, StrokeTemplate};
pub use recognizer::{NoRecognizer, Recognition, Recognizer};

use combine::{SubScores, NO_INK, UNABLE_TO_COMPARE};
use descriptor::build_descriptors;
use preprocess::{normalize_ink, normalize_template, sanitize};

/// Score ink against a template with the default configuration.
pub fn score(ink: &InkSample, template: &StrokeTemplate) -> HandwritingScore {
    score_with(ink, template, &ScoringConfig::default())
}

/// Full pipeline: normalize → sanitize → descriptors → match → sub-scores → combine.
pub fn score_with(ink: &InkSample, template: &StrokeTemplate, config: &ScoringConfig) -> HandwritingScore {
    if ink.is_empty() {
        return HandwritingScore::degenerate(NO_INK);
    }

    // ── Preprocess ────────────────────────────────────────
    let ink_strokes = sanitize(&normalize_ink(ink), config);
    let template_strokes = sanitize(&normalize_template(template), config);
    tracing::debug!(
        "template '{}': {} ink strokes → {} sanitized, {} template strokes → {}",
        template.id,
        ink.strokes.len(),
        ink_strokes.len(),
        template.strokes.len(),
        template_strokes.len(),
    );
    if ink_strokes.is_empty() || template_strokes.is_empty() {
        return HandwritingScore::degenerate(UNABLE_TO_COMPARE);
    }

    let samples = config.samples();
    let ink_desc = build_descriptors(ink_strokes, samples);
    let template_desc = build_descriptors(template_strokes, samples);

    // ── Match ─────────────────────────────────────────────
    let matches = matcher::match_strokes(&ink_desc, &template_desc, template.tolerance);
    for m in &matches {
        tracing::debug!(
            "  match ink {} → template {}  score {:.1}  shape {:.1}",
            m.ink_index, m.template_index, m.score, m.shape_score,
        );
    }
    let n = matches.len().max(1) as f64;
    let geometry = matches.iter().map(|m| m.shape_score).sum::<f64>() / n;
    let straightness = matches.iter().map(|m| m.straightness_score).sum::<f64>() / n;

    // ── Aggregate ─────────────────────────────────────────
    let sub = SubScores {
        geometry,
        straightness,
        count: metrics::count_alignment(ink_desc.len(), template_desc.len()),
        order: metrics::order_score(&matches),
        flow: metrics::flow_quality(&ink_desc),
        coverage: metrics::coverage(matches.len(), ink_desc.len(), template_desc.len()),
        trace: metrics::trace_efficiency(&ink_desc, config.trace_grid),
        intersection: metrics::intersection_density(&ink_desc),
        glyph_diff: metrics::glyph_diff(&ink_desc, &template_desc, config.glyph_grid, config.parallel_glyph_search),
    };

    // ── Combine ───────────────────────────────────────────
    let final_score = combine::final_score(&sub);
    let expected = if template.expected_stroke_count > 0 {
        template.expected_stroke_count
    } else {
        template_desc.len()
    };
    let feedback = combine::feedback(&sub, final_score, &matches, ink_desc.len(), expected);
    tracing::debug!(
        "score {} (raw {:.2}, cap {}) geometry {:.1} count {:.1} order {:.1} flow {:.1} straight {:.1} coverage {:.1} trace {:.1} cross {:.1} glyph {:.1}",
        final_score, sub.raw(), sub.cap(), sub.geometry, sub.count, sub.order, sub.flow,
        sub.straightness, sub.coverage, sub.trace, sub.intersection, sub.glyph_diff,
    );

    HandwritingScore {
        score: final_score,
        feedback,
        recognized_text: None,
        breakdown: Some(ScoreBreakdown {
            geometry: sub.geometry,
            straightness: sub.straightness,
            count: sub.count,
            order: sub.order,
            flow: sub.flow,
            coverage: sub.coverage,
            trace: sub.trace,
            intersection: sub.intersection,
            glyph_diff: sub.glyph_diff,
            raw: sub.raw(),
            cap: sub.cap(),
            ink_strokes: ink_desc.len(),
            template_strokes: template_desc.len(),
            matches,
        }),
        fusion: None,
    }
}

/// Geometric score fused with a recognizer's confidence.
///
/// The confidence only counts when the recognizer read the template's
/// symbol (or reported no text). Empty ink never reaches the recognizer,
/// and degenerate results stay at zero.
pub fn assess(
    ink: &InkSample,
    template: &StrokeTemplate,
    recognizer: &dyn Recognizer,
    config: &ScoringConfig,
) -> HandwritingScore {
    let mut result = score_with(ink, template, config);
    if ink.is_empty() {
        return result;
    }
    let recognition = recognizer.recognize(ink);
    let Some(ink_strokes) = result.breakdown.as_ref().map(|b| b.ink_strokes) else {
        result.recognized_text = recognition.text;
        return result;
    };

    let fusion = fuse(
        recognition.confidence_for(&template.symbol),
        i32::from(result.score),
        ink_strokes,
        template.expected_stroke_count,
    );
    result.score = fusion.score;
    result.recognized_text = recognition.text;
    result.fusion = Some(fusion);
    result
}
