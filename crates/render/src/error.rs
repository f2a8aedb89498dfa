use thiserror::Error;

/// Failures a renderer can report for a single frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(String),

    #[error("render backend error: {0}")]
    Backend(String),
}
