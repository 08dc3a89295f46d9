//! Error types for rendering

use thiserror::Error;

/// Errors that can occur while rendering a compiled template
#[derive(Debug, Error)]
pub enum RenderError {
    /// A lookup exhausted the context stack
    #[error("{name} is not defined")]
    UndefinedVariable { name: String },

    /// The output sink failed to write
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Name of the error kind as surfaced to hosts
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::UndefinedVariable { .. } => "UndefinedVariable",
            RenderError::Io(_) => "Io",
        }
    }
}
