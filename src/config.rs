/// Tunable scoring parameters in one struct.
///
/// The defaults are empirically tuned; changing them shifts every
/// score, so adjust them together and re-check feedback thresholds.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    // -- Descriptors --
    /// Number of arc-length samples per stroke. Values below 2 are raised to 2.
    pub sample_count: usize,

    // -- Sanitize --
    /// Points closer than this to the previous kept point are dropped.
    pub dedupe_epsilon: f64,
    /// Maximum pen-lift gap (end of one stroke to start of the next)
    /// for two strokes to be merged.
    pub merge_gap: f64,
    /// A merge only happens when one of the two strokes is at most this long.
    pub merge_short_length: f64,
    /// Strokes shorter than this are dropped after merging.
    pub min_stroke_length: f64,

    // -- Aggregates --
    /// Cells per side of the trace-efficiency grid.
    pub trace_grid: u32,
    /// Cells per side of the glyph-diff masks.
    pub glyph_grid: u32,
    /// Evaluate glyph-diff transform candidates on the rayon pool.
    pub parallel_glyph_search: bool,
}

impl ScoringConfig {
    pub(crate) fn samples(&self) -> usize {
        self.sample_count.max(2)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sample_count: 24,
            dedupe_epsilon: 0.002,
            merge_gap: 0.08,
            merge_short_length: 0.11,
            min_stroke_length: 0.035,
            trace_grid: 18,
            glyph_grid: 32,
            parallel_glyph_search: true,
        }
    }
}
