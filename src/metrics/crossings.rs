use kurbo::Point;

use crate::descriptor::StrokeDescriptor;
use crate::geom::segments_cross;

/// Crossing rate at which the score reaches zero.
const MAX_DENSITY: f64 = 0.22;

/// Rate of proper crossings among all ink segment pairs.
///
/// Consecutive segments of the same stroke share an endpoint and are
/// not compared. Legible characters cross themselves rarely; scribbles
/// cross constantly.
pub fn intersection_density(ink: &[StrokeDescriptor]) -> f64 {
    // (stroke, segment index within stroke, start, end)
    let segments: Vec<(usize, usize, Point, Point)> = ink
        .iter()
        .flat_map(|d| {
            d.resampled
                .windows(2)
                .enumerate()
                .map(move |(k, w)| (d.index, k, w[0], w[1]))
        })
        .collect();

    let mut comparisons = 0usize;
    let mut crossings = 0usize;
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            if a.0 == b.0 && a.1.abs_diff(b.1) == 1 {
                continue;
            }
            comparisons += 1;
            if segments_cross(a.2, a.3, b.2, b.3) {
                crossings += 1;
            }
        }
    }
    if comparisons == 0 {
        return 100.0;
    }
    let density = crossings as f64 / comparisons as f64;
    (100.0 * (1.0 - density / MAX_DENSITY)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_cross_is_clean() {
        let h = StrokeDescriptor::new(0, vec![Point::new(0.1, 0.5), Point::new(0.9, 0.5)], 24);
        let v = StrokeDescriptor::new(1, vec![Point::new(0.5, 0.1), Point::new(0.5, 0.9)], 24);
        let s = intersection_density(&[h, v]);
        assert!(s > 99.0, "score {}", s);
    }

    #[test]
    fn star_scribble_scores_zero() {
        // A star polygon: every chord crosses most of the others.
        let pts: Vec<Point> = (0..24)
            .map(|i| {
                let a = std::f64::consts::TAU * 7.0 * i as f64 / 23.0;
                Point::new(0.5 + 0.4 * a.cos(), 0.5 + 0.4 * a.sin())
            })
            .collect();
        let d = StrokeDescriptor {
            index: 0,
            resampled: pts.clone(),
            length: crate::geom::polyline_length(&pts),
            points: pts,
        };
        assert_eq!(intersection_density(&[d]), 0.0);
    }
}
