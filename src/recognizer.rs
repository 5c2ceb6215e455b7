//! External handwriting recognizer seam.
//!
//! The engine never talks to a recognition service itself. Callers
//! resolve the service (including any timeout or cancellation) and
//! hand the result in through [`Recognizer`].

use crate::model::InkSample;

/// What a recognizer reported for one ink sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    pub text: Option<String>,
    /// Raw confidence on any scale the service uses (0–1 or 0–100); may be NaN.
    pub confidence: Option<f64>,
}

impl Recognition {
    /// Confidence to fuse, given the character the user was asked to write.
    ///
    /// Dropped when the recognizer read a different character.
    pub fn confidence_for(&self, symbol: &str) -> Option<f64> {
        match &self.text {
            Some(text) if text.trim() != symbol.trim() => None,
            _ => self.confidence,
        }
    }
}

pub trait Recognizer {
    fn recognize(&self, ink: &InkSample) -> Recognition;
}

/// Recognizer that never reports anything; fusion falls back to quality alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecognizer;

impl Recognizer for NoRecognizer {
    fn recognize(&self, _ink: &InkSample) -> Recognition {
        Recognition::default()
    }
}

/// A fixed, already-resolved recognition result.
impl Recognizer for Recognition {
    fn recognize(&self, _ink: &InkSample) -> Recognition {
        self.clone()
    }
}
