use thiserror::Error;

/// Errors raised while loading or validating ink and templates.
///
/// Scoring itself never fails: degenerate input yields a zero score
/// with a message instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InkError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("non-finite coordinate in stroke {stroke}, point {point}")]
    NonFinitePoint { stroke: usize, point: usize },

    #[error("invalid template: {0}")]
    InvalidTemplate(String),
}
