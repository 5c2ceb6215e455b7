/// Lowest score any stroke-count mismatch can produce.
const COUNT_FLOOR: f64 = 24.0;
/// Per-stroke decay beyond the last entry of the absolute band table.
const ABSOLUTE_DECAY: f64 = 12.0;

/// Band for the absolute difference: 0 → 100, 1 → 92, 2 → 82, 3 → 70, then linear.
fn absolute_band(diff: usize) -> f64 {
    match diff {
        0 => 100.0,
        1 => 92.0,
        2 => 82.0,
        3 => 70.0,
        d => 70.0 - ABSOLUTE_DECAY * (d - 3) as f64,
    }
}

/// Band for the difference relative to the template count.
fn relative_band(relative: f64) -> f64 {
    if relative <= 0.25 {
        100.0
    } else if relative <= 0.45 {
        88.0
    } else if relative <= 0.7 {
        76.0
    } else if relative <= 1.1 {
        62.0
    } else {
        50.0
    }
}

/// Stroke-count agreement between ink and template.
pub fn count_alignment(ink_count: usize, template_count: usize) -> f64 {
    let diff = ink_count.abs_diff(template_count);
    let relative = diff as f64 / template_count.max(1) as f64;
    absolute_band(diff).min(relative_band(relative)).max(COUNT_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_count_is_full() {
        assert_eq!(count_alignment(4, 4), 100.0);
    }

    #[test]
    fn relative_band_dominates_small_templates() {
        // One extra stroke on a one-stroke character is a 100% error.
        assert_eq!(count_alignment(2, 1), 62.0);
        // The same absolute error on a ten-stroke character is mild.
        assert_eq!(count_alignment(11, 10), 92.0);
    }

    #[test]
    fn floor_holds_for_wild_counts() {
        assert_eq!(count_alignment(40, 3), COUNT_FLOOR);
        assert_eq!(count_alignment(0, 5), 46.0);
    }

    #[test]
    fn never_increases_with_distance() {
        for template in 1..12 {
            let mut prev = f64::INFINITY;
            for ink in template..template + 15 {
                let s = count_alignment(ink, template);
                assert!(s <= prev, "count {} vs {} rose to {}", ink, template, s);
                prev = s;
            }
        }
    }
}
