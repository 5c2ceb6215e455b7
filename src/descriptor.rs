use kurbo::Point;

use crate::geom::{centroid, polyline_length, resample, straightness};

/// Per-stroke features shared by the matcher and the aggregate scorers.
#[derive(Debug, Clone)]
pub struct StrokeDescriptor {
    pub index: usize,
    /// Sanitized points, as drawn.
    pub points: Vec<Point>,
    /// Fixed-count arc-length resampling of `points`.
    pub resampled: Vec<Point>,
    pub length: f64,
}

impl StrokeDescriptor {
    pub fn new(index: usize, points: Vec<Point>, samples: usize) -> Self {
        let resampled = resample(&points, samples);
        let length = polyline_length(&points);
        Self {
            index,
            points,
            resampled,
            length,
        }
    }

    pub fn centroid(&self) -> Point {
        centroid(&self.resampled)
    }

    pub fn straightness(&self) -> f64 {
        straightness(&self.resampled, self.length)
    }

    /// Start-to-end displacement of the resampled stroke.
    pub fn chord(&self) -> kurbo::Vec2 {
        self.resampled[self.resampled.len() - 1] - self.resampled[0]
    }
}

pub fn build_descriptors(strokes: Vec<Vec<Point>>, samples: usize) -> Vec<StrokeDescriptor> {
    strokes
        .into_iter()
        .enumerate()
        .map(|(i, points)| StrokeDescriptor::new(i, points, samples))
        .collect()
}
