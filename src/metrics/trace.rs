use std::collections::HashSet;

use crate::descriptor::StrokeDescriptor;

const MIN_UNIQUE_RATIO: f64 = 0.12;
const UNIQUE_RATIO_SPAN: f64 = 0.30;
const TRACE_FLOOR: f64 = 15.0;

/// Share of distinct grid cells visited by the resampled ink.
///
/// A scribble that keeps revisiting the same small region lands many
/// samples in few cells and scores low.
pub fn trace_efficiency(ink: &[StrokeDescriptor], grid: u32) -> f64 {
    let grid = grid.max(1);
    let mut cells: HashSet<(u32, u32)> = HashSet::new();
    let mut total = 0usize;
    for p in ink.iter().flat_map(|d| d.resampled.iter()) {
        cells.insert((cell(p.x, grid), cell(p.y, grid)));
        total += 1;
    }
    if total == 0 {
        return TRACE_FLOOR;
    }
    let ratio = cells.len() as f64 / total as f64;
    ((ratio - MIN_UNIQUE_RATIO) / UNIQUE_RATIO_SPAN * 100.0).clamp(TRACE_FLOOR, 100.0)
}

pub(crate) fn cell(v: f64, grid: u32) -> u32 {
    ((v.clamp(0.0, 1.0) * grid as f64) as u32).min(grid - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn long_line_is_efficient() {
        let d = StrokeDescriptor::new(0, vec![Point::new(0.05, 0.5), Point::new(0.95, 0.5)], 24);
        assert_eq!(trace_efficiency(&[d], 18), 100.0);
    }

    #[test]
    fn tight_loop_is_inefficient() {
        let pts: Vec<Point> = (0..200)
            .map(|i| {
                let a = i as f64 * 0.7;
                Point::new(0.53 + 0.01 * a.cos(), 0.53 + 0.01 * a.sin())
            })
            .collect();
        let d = StrokeDescriptor::new(0, pts, 24);
        assert_eq!(trace_efficiency(&[d], 18), TRACE_FLOOR);
    }

    #[test]
    fn cell_clamps_edges() {
        assert_eq!(cell(1.0, 18), 17);
        assert_eq!(cell(0.0, 18), 0);
    }
}
