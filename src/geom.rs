//! Shared polyline utilities.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{coord, Line};
use kurbo::Point;

/// Guard for ratios whose denominator can collapse to zero.
pub const MIN_DENOMINATOR: f64 = 0.0001;

/// Total length of a polyline (sum of consecutive point distances).
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Resample a polyline to `n` points spaced uniformly along its arc length.
///
/// The first and last points are preserved exactly. A polyline with
/// zero length (or a single point) resamples to `n` copies of its first point.
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    let n = n.max(2);
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let last = points[points.len() - 1];

    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0);
    for w in points.windows(2) {
        let prev = cumulative[cumulative.len() - 1];
        cumulative.push(prev + w[0].distance(w[1]));
    }
    let total = cumulative[cumulative.len() - 1];
    if total < 1e-12 {
        return vec![first; n];
    }

    let mut out = Vec::with_capacity(n);
    out.push(first);
    let mut j = 1;
    for i in 1..n - 1 {
        let target = i as f64 / (n - 1) as f64 * total;
        while j < cumulative.len() - 1 && cumulative[j] < target {
            j += 1;
        }
        let seg = (cumulative[j] - cumulative[j - 1]).max(1e-12);
        let t = ((target - cumulative[j - 1]) / seg).clamp(0.0, 1.0);
        out.push(points[j - 1].lerp(points[j], t));
    }
    out.push(last);
    out
}

/// Mean of a point set; the origin for an empty set.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f64;
    Point::new(sx / n, sy / n)
}

/// Endpoint distance over path length: 1 for a straight line, near 0 for a closed loop.
pub fn straightness(points: &[Point], length: f64) -> f64 {
    match (points.first(), points.last()) {
        (Some(a), Some(b)) => (a.distance(*b) / length.max(MIN_DENOMINATOR)).min(1.0),
        _ => 0.0,
    }
}

/// Clamp a point into the unit square.
pub fn clamp_unit(p: Point) -> Point {
    Point::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0))
}

/// True when segments `a0-a1` and `b0-b1` cross at a single interior point.
///
/// Touching at an endpoint or overlapping collinearly does not count.
pub fn segments_cross(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let a = Line::new(coord! { x: a0.x, y: a0.y }, coord! { x: a1.x, y: a1.y });
    let b = Line::new(coord! { x: b0.x, y: b0.y }, coord! { x: b1.x, y: b1.y });
    matches!(
        line_intersection(a, b),
        Some(LineIntersection::SinglePoint { is_proper: true, .. })
    )
}

/// Mean distance from each point in `from` to its nearest point in `to`.
pub fn mean_nearest(from: &[Point], to: &[Point]) -> f64 {
    if from.is_empty() || to.is_empty() {
        return f64::INFINITY;
    }
    let sum: f64 = from
        .iter()
        .map(|a| {
            to.iter()
                .map(|b| a.distance(*b))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    sum / from.len() as f64
}

/// Symmetric chamfer distance: average of both directed mean-nearest distances.
pub fn chamfer_distance(a: &[Point], b: &[Point]) -> f64 {
    (mean_nearest(a, b) + mean_nearest(b, a)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_right_angle() {
        let pts = [Point::new(0.0, 0.0), Point::new(0.3, 0.0), Point::new(0.3, 0.4)];
        assert!((polyline_length(&pts) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn resample_keeps_endpoints_and_spacing() {
        let pts = [Point::new(0.1, 0.1), Point::new(0.2, 0.1), Point::new(0.9, 0.1)];
        let out = resample(&pts, 24);
        assert_eq!(out.len(), 24);
        assert_eq!(out[0], pts[0]);
        assert_eq!(out[23], pts[2]);
        let step = 0.8 / 23.0;
        for (i, p) in out.iter().enumerate() {
            assert!((p.x - (0.1 + step * i as f64)).abs() < 1e-9, "sample {} at {}", i, p.x);
        }
    }

    #[test]
    fn resample_degenerate_stroke() {
        let pts = [Point::new(0.5, 0.5), Point::new(0.5, 0.5)];
        let out = resample(&pts, 5);
        assert_eq!(out, vec![Point::new(0.5, 0.5); 5]);
    }

    #[test]
    fn crossing_requires_interior_point() {
        let o = Point::new(0.0, 0.0);
        assert!(segments_cross(o, Point::new(1.0, 1.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0)));
        // Shared endpoint.
        assert!(!segments_cross(o, Point::new(1.0, 0.0), o, Point::new(0.0, 1.0)));
        // Collinear overlap.
        assert!(!segments_cross(o, Point::new(1.0, 0.0), Point::new(0.5, 0.0), Point::new(2.0, 0.0)));
    }

    #[test]
    fn straightness_of_loop_is_low() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.01),
        ];
        let s = straightness(&pts, polyline_length(&pts));
        assert!(s < 0.01, "loop straightness {}", s);
    }
}
