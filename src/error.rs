//! Error types for template compilation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while compiling a template string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Invalid options, detected before tokenizing
    #[error("{message}")]
    Configuration { message: String },

    /// Unbalanced section/end directives
    #[error("{message}")]
    Syntax { span: Span, message: String },

    /// A formatter name not present in the merged registry
    #[error("{name} is not a valid formatter")]
    BadFormatter { name: String, span: Span },

    /// No formatter given while the default formatter is disabled
    #[error("This template requires explicit formatters.")]
    MissingFormatter { span: Span },
}

impl CompileError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn syntax(span: Span, message: impl Into<String>) -> Self {
        Self::Syntax {
            span,
            message: message.into(),
        }
    }

    /// Name of the error kind as surfaced to hosts
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Configuration { .. } => "ConfigurationError",
            CompileError::Syntax { .. } => "TemplateSyntaxError",
            CompileError::BadFormatter { .. } => "BadFormatter",
            CompileError::MissingFormatter { .. } => "MissingFormatter",
        }
    }

    /// Source location of the offending directive, if the error has one
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Configuration { .. } => None,
            CompileError::Syntax { span, .. }
            | CompileError::BadFormatter { span, .. }
            | CompileError::MissingFormatter { span } => Some(span.clone()),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let message = format!("{}: {}", self.kind(), self);
        let Some(span) = self.span() else {
            return format!("Error: {}\n", message);
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {}\n", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(CompileError::configuration("x").kind(), "ConfigurationError");
        assert_eq!(CompileError::syntax(0..1, "x").kind(), "TemplateSyntaxError");
        assert_eq!(
            CompileError::BadFormatter {
                name: "nope".into(),
                span: 0..1
            }
            .to_string(),
            "nope is not a valid formatter"
        );
    }

    #[test]
    fn test_format_points_at_directive() {
        let source = "Hello {name|nope}";
        let err = CompileError::BadFormatter {
            name: "nope".into(),
            span: 6..17,
        };
        let report = err.format(source, "greeting.jsont");
        assert!(report.contains("BadFormatter"));
        assert!(report.contains("greeting.jsont"));
    }

    #[test]
    fn test_format_without_span() {
        let err = CompileError::configuration("Only format characters : and | are accepted");
        assert_eq!(
            err.format("", "t"),
            "Error: ConfigurationError: Only format characters : and | are accepted\n"
        );
    }
}
