//! Ink normalization and stroke sanitizing.
//!
//! Normalize maps canvas coordinates into the unit square. Sanitize
//! then cleans each side before descriptors are built:
//! drop near-duplicate points → merge pen-lift fragments → drop
//! degenerate strokes → fall back to the longest stroke.

use kurbo::Point;

use crate::config::ScoringConfig;
use crate::geom::{clamp_unit, polyline_length, MIN_DENOMINATOR};
use crate::model::{InkSample, StrokeTemplate};

/// Map every ink point into `[0, 1]²`.
///
/// With a usable canvas (both dimensions > 1) the canvas is the scale
/// and its top-left corner the origin. Otherwise the ink's own bounding
/// box is used, scaled by its larger side so the aspect ratio survives.
pub fn normalize_ink(ink: &InkSample) -> Vec<Vec<Point>> {
    if let (Some(w), Some(h)) = (ink.canvas_width, ink.canvas_height) {
        if w > 1.0 && h > 1.0 {
            return ink
                .strokes
                .iter()
                .map(|s| {
                    s.points
                        .iter()
                        .map(|p| clamp_unit(Point::new(p.x / w, p.y / h)))
                        .collect()
                })
                .collect();
        }
    }

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for p in ink.strokes.iter().flat_map(|s| s.points.iter()) {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if min_x == f64::MAX {
        return ink.strokes.iter().map(|_| Vec::new()).collect();
    }
    let scale = (max_x - min_x).max(max_y - min_y).max(MIN_DENOMINATOR);
    ink.strokes
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|p| clamp_unit(Point::new((p.x - min_x) / scale, (p.y - min_y) / scale)))
                .collect()
        })
        .collect()
}

/// Template points are already normalized; only clamp them into range.
pub fn normalize_template(template: &StrokeTemplate) -> Vec<Vec<Point>> {
    template
        .strokes
        .iter()
        .map(|s| s.points.iter().copied().map(clamp_unit).collect())
        .collect()
}

/// Clean normalized strokes.
///
/// Never returns an empty set when some input stroke has at least two
/// points: the longest original stroke is kept as a fallback.
pub fn sanitize(strokes: &[Vec<Point>], config: &ScoringConfig) -> Vec<Vec<Point>> {
    let deduped: Vec<Vec<Point>> = strokes
        .iter()
        .map(|s| dedupe(s, config.dedupe_epsilon))
        .filter(|s| !s.is_empty())
        .collect();

    let mut merged: Vec<Vec<Point>> = Vec::with_capacity(deduped.len());
    for stroke in deduped {
        if let Some(prev) = merged.last_mut() {
            if should_merge(prev, &stroke, config) {
                let join = prev[prev.len() - 1];
                let skip = usize::from(stroke[0].distance(join) < config.dedupe_epsilon);
                prev.extend_from_slice(&stroke[skip..]);
                continue;
            }
        }
        merged.push(stroke);
    }

    let kept: Vec<Vec<Point>> = merged
        .into_iter()
        .filter(|s| s.len() >= 2 && polyline_length(s) >= config.min_stroke_length)
        .collect();
    if !kept.is_empty() {
        return kept;
    }

    strokes
        .iter()
        .filter(|s| s.len() >= 2)
        .max_by(|a, b| polyline_length(a).total_cmp(&polyline_length(b)))
        .map(|s| vec![s.clone()])
        .unwrap_or_default()
}

fn dedupe(points: &[Point], epsilon: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        match out.last() {
            Some(last) if last.distance(p) < epsilon => {}
            _ => out.push(p),
        }
    }
    out
}

/// Pen-lift fragment: the gap is small and at least one side is very short.
fn should_merge(prev: &[Point], next: &[Point], config: &ScoringConfig) -> bool {
    let gap = prev[prev.len() - 1].distance(next[0]);
    gap <= config.merge_gap
        && (polyline_length(prev) <= config.merge_short_length
            || polyline_length(next) <= config.merge_short_length)
}
