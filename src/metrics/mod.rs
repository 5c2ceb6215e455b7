//! Whole-character sub-scores, each in `[0, 100]`.
//!
//! These look past individual stroke pairs: stroke count, drawing
//! order, fragmentation, template coverage, how much ground the pen
//! covers (trace efficiency), self-crossings, and a raster glyph diff.

mod count;
mod crossings;
mod glyph;
mod sequence;
mod trace;

pub use count::count_alignment;
pub use crossings::intersection_density;
pub use glyph::glyph_diff;
pub use sequence::{coverage, flow_quality, order_score};
pub use trace::trace_efficiency;
