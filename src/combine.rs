//! Weighted score, anti-scribble caps and feedback selection.

use crate::model::MatchedStroke;

const W_GEOMETRY: f64 = 0.24;
const W_COUNT: f64 = 0.12;
const W_ORDER: f64 = 0.07;
const W_FLOW: f64 = 0.11;
const W_STRAIGHTNESS: f64 = 0.10;
const W_COVERAGE: f64 = 0.09;
const W_TRACE: f64 = 0.09;
const W_GLYPH: f64 = 0.18;

pub const NO_INK: &str = "No ink detected. Draw the character to get a score.";
pub const UNABLE_TO_COMPARE: &str = "Unable to compare: the strokes were too small to read.";
const SCRIBBLE: &str = "This looks like a scribble. Slow down and draw each stroke deliberately.";
const FORM_OFF: &str = "The overall form is off. Compare your character against the model.";
const SEQUENCE: &str = "The strokes are out of sequence. Check the stroke order.";
const FRAGMENTED: &str = "Some strokes look broken up. Draw each stroke in one smooth motion.";
const EXCELLENT: &str = "Excellent! That matches the model closely.";
const GOOD: &str = "Good work. A little more precision and it's there.";
const KEEP_GOING: &str = "Keep practicing. You're getting closer.";

/// Sub-scores feeding the final combination, all in `[0, 100]`.
#[derive(Debug, Clone, Copy)]
pub struct SubScores {
    pub geometry: f64,
    pub straightness: f64,
    pub count: f64,
    pub order: f64,
    pub flow: f64,
    pub coverage: f64,
    pub trace: f64,
    pub intersection: f64,
    pub glyph_diff: f64,
}

impl SubScores {
    pub fn raw(&self) -> f64 {
        W_GEOMETRY * self.geometry
            + W_COUNT * self.count
            + W_ORDER * self.order
            + W_FLOW * self.flow
            + W_STRAIGHTNESS * self.straightness
            + W_COVERAGE * self.coverage
            + W_TRACE * self.trace
            + W_GLYPH * self.glyph_diff
    }

    /// Upper bound for input that looks disorganized rather than merely imprecise.
    pub fn cap(&self) -> f64 {
        let rules = [
            (self.coverage < 45.0, 50.0),
            (self.trace < 42.0, 48.0),
            (self.geometry < 38.0, 50.0),
            (self.intersection < 56.0, 44.0),
            (self.glyph_diff < 38.0 && self.geometry < 60.0, 42.0),
            (self.glyph_diff < 46.0 && self.coverage < 55.0, 50.0),
        ];
        rules
            .iter()
            .filter(|(hit, _)| *hit)
            .map(|&(_, cap)| cap)
            .fold(100.0, f64::min)
    }

    fn is_scribble(&self) -> bool {
        self.coverage < 45.0 || self.trace < 42.0 || self.intersection < 56.0
    }
}

/// Round the raw score, apply the cap, clamp to `[0, 100]`.
pub fn final_score(sub: &SubScores) -> u8 {
    sub.raw().round().min(sub.cap()).clamp(0.0, 100.0) as u8
}

/// Pick one message; the first matching rule wins.
pub fn feedback(
    sub: &SubScores,
    score: u8,
    matches: &[MatchedStroke],
    ink_strokes: usize,
    expected_strokes: usize,
) -> String {
    if sub.is_scribble() {
        return SCRIBBLE.to_string();
    }
    if sub.glyph_diff < 45.0 && (sub.geometry < 65.0 || sub.coverage < 60.0) {
        return FORM_OFF.to_string();
    }
    if sub.count < 38.0 {
        return format!(
            "This character has {} {}, but you drew {}.",
            expected_strokes,
            if expected_strokes == 1 { "stroke" } else { "strokes" },
            ink_strokes,
        );
    }
    if sub.geometry < 40.0 {
        if let Some(worst) = matches.iter().min_by(|a, b| a.shape_score.total_cmp(&b.shape_score)) {
            return format!(
                "Stroke {} is furthest from the model. Focus on its shape.",
                worst.template_index + 1
            );
        }
    }
    if sub.order < 60.0 {
        return SEQUENCE.to_string();
    }
    if sub.flow < 55.0 || sub.straightness < 52.0 {
        return FRAGMENTED.to_string();
    }
    match score {
        90.. => EXCELLENT.to_string(),
        74.. => GOOD.to_string(),
        _ => KEEP_GOING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect() -> SubScores {
        SubScores {
            geometry: 100.0,
            straightness: 100.0,
            count: 100.0,
            order: 100.0,
            flow: 100.0,
            coverage: 100.0,
            trace: 100.0,
            intersection: 100.0,
            glyph_diff: 100.0,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        assert_eq!(final_score(&perfect()), 100);
        assert_eq!(feedback(&perfect(), 100, &[], 1, 1), EXCELLENT);
    }

    #[test]
    fn lowest_cap_wins() {
        let sub = SubScores { trace: 30.0, intersection: 40.0, ..perfect() };
        assert_eq!(sub.cap(), 44.0);
        assert_eq!(final_score(&sub), 44);
        assert_eq!(feedback(&sub, 44, &[], 1, 1), SCRIBBLE);
    }

    #[test]
    fn count_message_names_expected() {
        let sub = SubScores { count: 24.0, ..perfect() };
        let msg = feedback(&sub, 80, &[], 6, 2);
        assert_eq!(msg, "This character has 2 strokes, but you drew 6.");
    }

    #[test]
    fn weak_geometry_names_worst_stroke() {
        let m = |t: usize, shape: f64| MatchedStroke {
            ink_index: t,
            template_index: t,
            score: shape,
            shape_score: shape,
            direction_score: 100.0,
            length_score: 100.0,
            placement_score: 100.0,
            straightness_score: 100.0,
        };
        let sub = SubScores { geometry: 35.0, ..perfect() };
        let msg = feedback(&sub, 60, &[m(0, 50.0), m(1, 20.0), m(2, 35.0)], 3, 3);
        assert!(msg.starts_with("Stroke 2 "), "{}", msg);
    }

    #[test]
    fn praise_tiers() {
        let sub = SubScores { geometry: 80.0, ..perfect() };
        assert_eq!(feedback(&sub, 80, &[], 1, 1), GOOD);
        assert_eq!(feedback(&sub, 60, &[], 1, 1), KEEP_GOING);
    }
}
