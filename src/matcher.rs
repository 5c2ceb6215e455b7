//! Pairwise stroke comparison and greedy assignment.
//!
//! Every (ink, template) pair gets five sub-scores in `[0, 100]`. Pairs
//! are then locked in greedily by descending combined score. This is
//! not an optimal assignment, but it is deterministic, and the
//! tie-break (stable sort, first come first served) decides which
//! template stroke the feedback names.

use crate::descriptor::StrokeDescriptor;
use crate::geom::MIN_DENOMINATOR;
use crate::model::MatchedStroke;

const SHAPE_SCALE_OFFSET: f64 = 0.26;
const MIN_SHAPE_SCALE: f64 = 0.31;
/// Centroid separation at which placement reaches zero.
const PLACEMENT_FALLOFF: f64 = 0.8;

const W_SHAPE: f64 = 0.44;
const W_DIRECTION: f64 = 0.14;
const W_LENGTH: f64 = 0.14;
const W_PLACEMENT: f64 = 0.12;
const W_STRAIGHTNESS: f64 = 0.16;

/// Score one ink stroke against one template stroke.
pub fn compare(ink: &StrokeDescriptor, template: &StrokeDescriptor, tolerance: f64) -> MatchedStroke {
    let shape_score = shape_score(ink, template, tolerance);

    let a = ink.chord();
    let b = template.chord();
    // A closed loop has a zero chord: cosine 0, direction 50.
    let cos = a.dot(b) / (a.hypot() * b.hypot()).max(MIN_DENOMINATOR);
    let direction_score = to_percent((cos.clamp(-1.0, 1.0) + 1.0) / 2.0);

    let length_score = to_percent(ratio_of(ink.length, template.length));

    let placement = ink.centroid().distance(template.centroid());
    let placement_score = to_percent(1.0 - placement / PLACEMENT_FALLOFF);

    let (sa, sb) = (ink.straightness(), template.straightness());
    let straightness_score = if sa.max(sb) < MIN_DENOMINATOR {
        100.0
    } else {
        to_percent(ratio_of(sa, sb))
    };

    let score = W_SHAPE * shape_score
        + W_DIRECTION * direction_score
        + W_LENGTH * length_score
        + W_PLACEMENT * placement_score
        + W_STRAIGHTNESS * straightness_score;

    MatchedStroke {
        ink_index: ink.index,
        template_index: template.index,
        score,
        shape_score,
        direction_score,
        length_score,
        placement_score,
        straightness_score,
    }
}

/// Mean point-wise distance, trying the ink in both traversal directions.
fn shape_score(ink: &StrokeDescriptor, template: &StrokeDescriptor, tolerance: f64) -> f64 {
    let n = ink.resampled.len().min(template.resampled.len());
    if n == 0 {
        return 0.0;
    }
    let forward: f64 = (0..n)
        .map(|i| ink.resampled[i].distance(template.resampled[i]))
        .sum();
    let reverse: f64 = (0..n)
        .map(|i| ink.resampled[ink.resampled.len() - 1 - i].distance(template.resampled[i]))
        .sum();
    let mean = forward.min(reverse) / n as f64;
    let scale = (tolerance + SHAPE_SCALE_OFFSET).max(MIN_SHAPE_SCALE);
    to_percent(1.0 - mean / scale)
}

/// Greedy assignment over all pairs.
///
/// Returns at most `min(ink.len(), template.len())` matches, never
/// reusing an index on either side, in acceptance order.
pub fn match_strokes(
    ink: &[StrokeDescriptor],
    template: &[StrokeDescriptor],
    tolerance: f64,
) -> Vec<MatchedStroke> {
    let mut pairs: Vec<MatchedStroke> = Vec::with_capacity(ink.len() * template.len());
    for a in ink {
        for b in template {
            let pair = compare(a, b, tolerance);
            tracing::trace!(
                "pair ink {} / template {}: {:.1} (shape {:.1}, dir {:.1}, len {:.1}, place {:.1}, straight {:.1})",
                pair.ink_index, pair.template_index, pair.score, pair.shape_score,
                pair.direction_score, pair.length_score, pair.placement_score, pair.straightness_score,
            );
            pairs.push(pair);
        }
    }
    // `sort_by` is stable: equal scores keep enumeration order.
    pairs.sort_by(|x, y| y.score.total_cmp(&x.score));

    let limit = ink.len().min(template.len());
    let mut ink_used = vec![false; ink.len()];
    let mut template_used = vec![false; template.len()];
    let mut matches = Vec::with_capacity(limit);
    for pair in pairs {
        if matches.len() == limit {
            break;
        }
        if ink_used[pair.ink_index] || template_used[pair.template_index] {
            continue;
        }
        ink_used[pair.ink_index] = true;
        template_used[pair.template_index] = true;
        matches.push(pair);
    }
    matches
}

/// `min / max` of two non-negative magnitudes.
fn ratio_of(a: f64, b: f64) -> f64 {
    a.min(b) / a.max(b).max(MIN_DENOMINATOR)
}

fn to_percent(unit: f64) -> f64 {
    (unit * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn descriptor(index: usize, pts: &[(f64, f64)]) -> StrokeDescriptor {
        StrokeDescriptor::new(index, pts.iter().map(|&(x, y)| Point::new(x, y)).collect(), 24)
    }

    #[test]
    fn identical_strokes_score_full() {
        let a = descriptor(0, &[(0.1, 0.5), (0.5, 0.5), (0.9, 0.5)]);
        let m = compare(&a, &a, 0.1);
        assert!((m.score - 100.0).abs() < 1e-9, "score {}", m.score);
    }

    #[test]
    fn reversed_stroke_keeps_shape_but_loses_direction() {
        let a = descriptor(0, &[(0.1, 0.5), (0.9, 0.5)]);
        let b = descriptor(0, &[(0.9, 0.5), (0.1, 0.5)]);
        let m = compare(&b, &a, 0.1);
        assert!(m.shape_score > 99.9);
        assert!(m.direction_score < 1e-9);
    }

    #[test]
    fn closed_loop_direction_is_neutral() {
        let square = descriptor(0, &[(0.2, 0.2), (0.6, 0.2), (0.6, 0.6), (0.2, 0.6), (0.2, 0.2)]);
        let line = descriptor(0, &[(0.1, 0.5), (0.9, 0.5)]);
        assert_eq!(compare(&square, &line, 0.1).direction_score, 50.0);
        assert_eq!(compare(&square, &square, 0.1).direction_score, 50.0);
    }

    #[test]
    fn greedy_assignment_is_injective() {
        let ink = vec![
            descriptor(0, &[(0.1, 0.8), (0.9, 0.8)]),
            descriptor(1, &[(0.1, 0.2), (0.9, 0.2)]),
            descriptor(2, &[(0.5, 0.1), (0.5, 0.9)]),
        ];
        let template = vec![
            descriptor(0, &[(0.1, 0.2), (0.9, 0.2)]),
            descriptor(1, &[(0.1, 0.8), (0.9, 0.8)]),
        ];
        let matches = match_strokes(&ink, &template, 0.1);
        assert_eq!(matches.len(), 2);
        let pairs: Vec<(usize, usize)> = matches.iter().map(|m| (m.ink_index, m.template_index)).collect();
        assert!(pairs.contains(&(1, 0)));
        assert!(pairs.contains(&(0, 1)));
    }

    #[test]
    fn ties_resolve_in_enumeration_order() {
        let s = &[(0.2, 0.5), (0.8, 0.5)];
        let ink = vec![descriptor(0, s), descriptor(1, s)];
        let template = vec![descriptor(0, s)];
        let matches = match_strokes(&ink, &template, 0.1);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].ink_index, 0);
    }
}
