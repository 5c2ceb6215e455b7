//! Raster glyph diff under small affine perturbations.
//!
//! The ink is centered, perturbed by each of 27 scale/shear
//! candidates, pulled toward the template centroid, and rasterized
//! beside the template. Each candidate is scored on mask overlap plus
//! a chamfer term; the best candidate wins.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use kurbo::{Affine, Point, Vec2};
use rayon::prelude::*;

use super::trace::cell;
use crate::descriptor::StrokeDescriptor;
use crate::geom::{centroid, chamfer_distance, clamp_unit};

const SCALES: [f64; 3] = [0.9, 1.0, 1.1];
const SHEARS: [f64; 3] = [-0.08, 0.0, 0.08];
/// Per-axis limit on the centroid-alignment shift.
const MAX_SHIFT: f64 = 0.12;
/// Chamfer distance at which the chamfer term reaches zero.
const CHAMFER_FALLOFF: f64 = 0.20;

const W_PRECISION: f64 = 0.46;
const W_RECALL: f64 = 0.20;
const W_DICE: f64 = 0.20;
const W_CHAMFER: f64 = 0.14;

/// Best glyph similarity over all transform candidates.
pub fn glyph_diff(
    ink: &[StrokeDescriptor],
    template: &[StrokeDescriptor],
    grid: u32,
    parallel: bool,
) -> f64 {
    let ink_points = collect_points(ink);
    let template_points = collect_points(template);
    if ink_points.is_empty() || template_points.is_empty() {
        return 0.0;
    }
    let grid = grid.max(1);
    let template_mask = rasterize(&template_points, grid);

    let ink_center = centroid(&ink_points);
    let template_center = centroid(&template_points);
    let shift = Vec2::new(
        (template_center.x - ink_center.x).clamp(-MAX_SHIFT, MAX_SHIFT),
        (template_center.y - ink_center.y).clamp(-MAX_SHIFT, MAX_SHIFT),
    );

    let candidates = candidates();
    let evaluate = |transform: &Affine| {
        let placed = Affine::translate(ink_center.to_vec2() + shift)
            * *transform
            * Affine::translate(-ink_center.to_vec2());
        let moved: Vec<Point> = ink_points.iter().map(|&p| clamp_unit(placed * p)).collect();
        candidate_score(&moved, &template_points, &template_mask, grid)
    };
    // Collected in candidate order either way, so both paths agree exactly.
    let scores: Vec<f64> = if parallel {
        candidates.par_iter().map(evaluate).collect()
    } else {
        candidates.iter().map(evaluate).collect()
    };
    scores.into_iter().fold(0.0, f64::max)
}

/// Scale-x × scale-y × shear-x grid. Scale is applied before shear.
fn candidates() -> Vec<Affine> {
    let mut out = Vec::with_capacity(SCALES.len() * SCALES.len() * SHEARS.len());
    for &sx in &SCALES {
        for &sy in &SCALES {
            for &shear in &SHEARS {
                out.push(Affine::skew(shear, 0.0) * Affine::scale_non_uniform(sx, sy));
            }
        }
    }
    out
}

fn candidate_score(ink: &[Point], template: &[Point], template_mask: &GrayImage, grid: u32) -> f64 {
    let ink_mask = rasterize(ink, grid);
    let ink_on = count_on(&ink_mask);
    let template_on = count_on(template_mask);
    let overlap = ink_mask
        .pixels()
        .zip(template_mask.pixels())
        .filter(|(a, b)| a.0[0] > 0 && b.0[0] > 0)
        .count();

    let overlap = overlap as f64;
    let precision = overlap / ink_on.max(1) as f64;
    let recall = overlap / template_on.max(1) as f64;
    let dice = 2.0 * overlap / (ink_on + template_on).max(1) as f64;
    let chamfer = (100.0 * (1.0 - chamfer_distance(ink, template) / CHAMFER_FALLOFF)).clamp(0.0, 100.0);

    (100.0 * (W_PRECISION * precision + W_RECALL * recall + W_DICE * dice) + W_CHAMFER * chamfer)
        .clamp(0.0, 100.0)
}

/// Mark each point's cell, then dilate into its 3×3 neighborhood.
fn rasterize(points: &[Point], grid: u32) -> GrayImage {
    let mut mask = GrayImage::new(grid, grid);
    for p in points {
        mask.put_pixel(cell(p.x, grid), cell(p.y, grid), Luma([255]));
    }
    dilate(&mask, Norm::LInf, 1)
}

fn count_on(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] > 0).count()
}

fn collect_points(descriptors: &[StrokeDescriptor]) -> Vec<Point> {
    descriptors
        .iter()
        .flat_map(|d| d.resampled.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(index: usize, a: (f64, f64), b: (f64, f64)) -> StrokeDescriptor {
        StrokeDescriptor::new(index, vec![Point::new(a.0, a.1), Point::new(b.0, b.1)], 24)
    }

    #[test]
    fn identical_glyph_scores_full() {
        let t = vec![stroke(0, (0.1, 0.3), (0.9, 0.3)), stroke(1, (0.5, 0.1), (0.5, 0.9))];
        let s = glyph_diff(&t, &t, 32, false);
        assert!((s - 100.0).abs() < 1e-9, "score {}", s);
    }

    #[test]
    fn parallel_matches_sequential() {
        let t = vec![stroke(0, (0.1, 0.3), (0.9, 0.3)), stroke(1, (0.5, 0.1), (0.5, 0.9))];
        let ink = vec![stroke(0, (0.15, 0.35), (0.8, 0.25)), stroke(1, (0.45, 0.15), (0.6, 0.85))];
        assert_eq!(glyph_diff(&ink, &t, 32, true), glyph_diff(&ink, &t, 32, false));
    }

    #[test]
    fn different_glyph_scores_lower() {
        let t = vec![stroke(0, (0.1, 0.5), (0.9, 0.5))];
        let ink = vec![stroke(0, (0.5, 0.1), (0.5, 0.9))];
        let s = glyph_diff(&ink, &t, 32, false);
        assert!(s < 60.0, "score {}", s);
    }

    #[test]
    fn there_are_27_candidates() {
        assert_eq!(candidates().len(), 27);
    }
}
