//! Sub-scores derived from the match list and raw stroke structure.

use crate::descriptor::StrokeDescriptor;
use crate::model::MatchedStroke;

const ORDER_BASE: f64 = 55.0;
const ORDER_SPAN: f64 = 45.0;

/// Strokes shorter than this count as fragments.
const SHORT_STROKE_LENGTH: f64 = 0.08;
/// Penalty when every stroke is a fragment.
const SHORT_STROKE_PENALTY: f64 = 45.0;
/// Flat penalty per stroke with fewer than three raw points.
const SPARSE_STROKE_PENALTY: f64 = 6.0;
const FLOW_FLOOR: f64 = 35.0;

const TEMPLATE_COVERAGE_WEIGHT: f64 = 0.7;
const INK_UTILIZATION_WEIGHT: f64 = 0.3;

/// Fraction of consecutive template strokes that were also drawn in order.
pub fn order_score(matches: &[MatchedStroke]) -> f64 {
    if matches.len() < 2 {
        return 100.0;
    }
    let mut by_template: Vec<&MatchedStroke> = matches.iter().collect();
    by_template.sort_by_key(|m| m.template_index);
    let ordered = by_template
        .windows(2)
        .filter(|w| w[1].ink_index > w[0].ink_index)
        .count();
    let ratio = ordered as f64 / (by_template.len() - 1) as f64;
    ORDER_BASE + ORDER_SPAN * ratio
}

/// Penalizes fragmented ink: very short strokes and strokes with almost no points.
pub fn flow_quality(ink: &[StrokeDescriptor]) -> f64 {
    if ink.is_empty() {
        return FLOW_FLOOR;
    }
    let short = ink.iter().filter(|d| d.length < SHORT_STROKE_LENGTH).count();
    let sparse = ink.iter().filter(|d| d.points.len() < 3).count();
    let short_ratio = short as f64 / ink.len() as f64;
    (100.0 - SHORT_STROKE_PENALTY * short_ratio - SPARSE_STROKE_PENALTY * sparse as f64)
        .clamp(FLOW_FLOOR, 100.0)
}

/// How much of the template was matched, and how much of the ink was used.
pub fn coverage(matched: usize, ink_count: usize, template_count: usize) -> f64 {
    let template_ratio = matched as f64 / template_count.max(1) as f64;
    let ink_ratio = matched as f64 / ink_count.max(1) as f64;
    (100.0 * (TEMPLATE_COVERAGE_WEIGHT * template_ratio + INK_UTILIZATION_WEIGHT * ink_ratio))
        .clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn pair(ink_index: usize, template_index: usize) -> MatchedStroke {
        MatchedStroke {
            ink_index,
            template_index,
            score: 0.0,
            shape_score: 0.0,
            direction_score: 0.0,
            length_score: 0.0,
            placement_score: 0.0,
            straightness_score: 0.0,
        }
    }

    #[test]
    fn order_rewards_matching_sequence() {
        assert_eq!(order_score(&[pair(0, 0), pair(1, 1), pair(2, 2)]), 100.0);
        assert_eq!(order_score(&[pair(2, 0), pair(1, 1), pair(0, 2)]), ORDER_BASE);
        assert_eq!(order_score(&[pair(0, 0)]), 100.0);
    }

    #[test]
    fn order_half_swapped() {
        // Template order 0,1,2 drawn as 0,2,1: one of two transitions in order.
        let s = order_score(&[pair(0, 0), pair(2, 1), pair(1, 2)]);
        assert!((s - 77.5).abs() < 1e-9);
    }

    #[test]
    fn flow_penalizes_fragments() {
        let long = StrokeDescriptor::new(
            0,
            vec![Point::new(0.1, 0.1), Point::new(0.5, 0.1), Point::new(0.9, 0.1)],
            24,
        );
        let frag = StrokeDescriptor::new(1, vec![Point::new(0.5, 0.5), Point::new(0.54, 0.5)], 24);
        assert_eq!(flow_quality(&[long.clone()]), 100.0);
        let mixed = flow_quality(&[long, frag]);
        assert!((mixed - (100.0 - 22.5 - 6.0)).abs() < 1e-9, "flow {}", mixed);
    }

    #[test]
    fn coverage_weights_template_side() {
        assert_eq!(coverage(3, 3, 3), 100.0);
        assert!((coverage(1, 1, 2) - 65.0).abs() < 1e-9);
    }
}
