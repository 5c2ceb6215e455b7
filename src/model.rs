//! Input and output types for scoring.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::error::InkError;
use crate::fusion::FusionResult;

/// One pen-down-to-pen-up path, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a stroke from `(x, y)` tuples.
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }
}

/// Strokes as captured from the user, in canvas coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InkSample {
    pub strokes: Vec<Stroke>,
    /// Source canvas width. Used for normalization when it and the height are both > 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_height: Option<f64>,
}

impl InkSample {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self {
            strokes,
            canvas_width: None,
            canvas_height: None,
        }
    }

    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = Some(width);
        self.canvas_height = Some(height);
        self
    }

    /// True when no stroke carries any point.
    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(|s| s.points.is_empty())
    }

    pub fn from_json(json: &str) -> Result<Self, InkError> {
        let ink: InkSample = serde_json::from_str(json)?;
        ink.validate()?;
        Ok(ink)
    }

    /// Reject non-finite coordinates.
    pub fn validate(&self) -> Result<(), InkError> {
        check_finite(&self.strokes)
    }
}

/// Reference character: strokes already in unit-square coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeTemplate {
    pub id: String,
    pub symbol: String,
    pub expected_stroke_count: usize,
    /// Shape-match strictness; larger is more forgiving.
    pub tolerance: f64,
    pub strokes: Vec<Stroke>,
}

impl StrokeTemplate {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, tolerance: f64, strokes: Vec<Stroke>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            expected_stroke_count: strokes.len(),
            tolerance,
            strokes,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, InkError> {
        let template: StrokeTemplate = serde_json::from_str(json)?;
        template.validate()?;
        Ok(template)
    }

    pub fn validate(&self) -> Result<(), InkError> {
        if self.strokes.is_empty() {
            return Err(InkError::InvalidTemplate(format!("template '{}' has no strokes", self.id)));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(InkError::InvalidTemplate(format!(
                "template '{}' tolerance must be positive, got {}",
                self.id, self.tolerance
            )));
        }
        check_finite(&self.strokes)
    }
}

fn check_finite(strokes: &[Stroke]) -> Result<(), InkError> {
    for (si, stroke) in strokes.iter().enumerate() {
        if let Some(pi) = stroke.points.iter().position(|p| !p.is_finite()) {
            return Err(InkError::NonFinitePoint { stroke: si, point: pi });
        }
    }
    Ok(())
}

/// An (ink stroke, template stroke) pairing chosen by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedStroke {
    pub ink_index: usize,
    pub template_index: usize,
    /// Weighted combination of the five pair sub-scores.
    pub score: f64,
    pub shape_score: f64,
    pub direction_score: f64,
    pub length_score: f64,
    pub placement_score: f64,
    pub straightness_score: f64,
}

/// Every sub-score that went into a final score, all in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub geometry: f64,
    pub straightness: f64,
    pub count: f64,
    pub order: f64,
    pub flow: f64,
    pub coverage: f64,
    pub trace: f64,
    pub intersection: f64,
    pub glyph_diff: f64,
    /// Weighted sum before rounding and capping.
    pub raw: f64,
    /// Anti-scribble upper bound applied to the rounded raw score.
    pub cap: f64,
    pub ink_strokes: usize,
    pub template_strokes: usize,
    pub matches: Vec<MatchedStroke>,
}

/// Final score plus human-readable feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandwritingScore {
    pub score: u8,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognized_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fusion: Option<FusionResult>,
}

impl HandwritingScore {
    pub(crate) fn degenerate(feedback: &str) -> Self {
        Self {
            score: 0,
            feedback: feedback.to_string(),
            recognized_text: None,
            breakdown: None,
            fusion: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_serializes_as_point_list() {
        let stroke = Stroke::from_xy(&[(0.0, 0.5), (1.0, 0.25)]);
        let json = serde_json::to_string(&stroke).unwrap();
        assert_eq!(json, r#"[{"x":0.0,"y":0.5},{"x":1.0,"y":0.25}]"#);
    }

    #[test]
    fn ink_without_canvas_parses() {
        let ink = InkSample::from_json(r#"{"strokes":[[{"x":1,"y":2},{"x":3,"y":4}]]}"#).unwrap();
        assert_eq!(ink.strokes.len(), 1);
        assert!(ink.canvas_width.is_none());
    }

    #[test]
    fn template_without_strokes_is_rejected() {
        let json = r#"{"id":"t","symbol":"一","expected_stroke_count":1,"tolerance":0.1,"strokes":[]}"#;
        assert!(matches!(StrokeTemplate::from_json(json), Err(InkError::InvalidTemplate(_))));
    }

    #[test]
    fn non_finite_point_is_located() {
        let ink = InkSample::new(vec![
            Stroke::from_xy(&[(0.0, 0.0), (1.0, 1.0)]),
            Stroke::from_xy(&[(0.0, 0.0), (f64::NAN, 1.0)]),
        ]);
        match ink.validate() {
            Err(InkError::NonFinitePoint { stroke, point }) => assert_eq!((stroke, point), (1, 1)),
            other => panic!("expected NonFinitePoint, got {:?}", other),
        }
    }
}
