//! JSON Template - a minimal, declarative text templating engine
//!
//! Templates are compiled into a tree of sections once, then rendered against
//! any number of data trees.
//!
//! # Example
//!
//! ```rust
//! use json_template::{Template, Value};
//!
//! let template = Template::new("{.repeated section items}{@}{.alternates with}, {.end}").unwrap();
//! let data = Value::from_serialize(&serde_json::json!({"items": ["a", "b", "c"]})).unwrap();
//! assert_eq!(template.expand(&data).unwrap(), "a, b, c");
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod parser;
pub mod template;
pub mod value;

pub use config::{TemplateConfig, TemplateOptions};
pub use error::CompileError;
pub use executor::{RenderError, Sink, WriterSink};
pub use formatter::{formatter, Formatter};
pub use template::Template;
pub use value::Value;

use thiserror::Error;

/// Errors from the one-shot helpers and the command-line tool
#[derive(Debug, Error)]
pub enum Error {
    /// Error while compiling the template
    #[error("{}: {}", .0.kind(), .0)]
    Compile(#[from] CompileError),

    /// Error while rendering
    #[error("{}: {}", .0.kind(), .0)]
    Render(#[from] RenderError),

    /// Data that could not be converted into a [`Value`]
    #[error("invalid data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Compile `source` with default options and expand it against `data`
///
/// # Example
///
/// ```rust
/// use json_template::{expand, Value};
///
/// let data = Value::from_serialize(&serde_json::json!({"x": "<b>"})).unwrap();
/// assert_eq!(expand("{x|html}", &data).unwrap(), "&lt;b&gt;");
/// ```
pub fn expand(source: &str, data: &Value) -> Result<String, Error> {
    let template = Template::new(source)?;
    Ok(template.expand(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_text() {
        let out = expand("nothing to see", &Value::Null).unwrap();
        assert_eq!(out, "nothing to see");
    }

    #[test]
    fn test_expand_compile_error() {
        let err = expand("{.end}", &Value::Null).unwrap_err();
        assert!(matches!(err, Error::Compile(_)));
        assert_eq!(err.to_string(), "TemplateSyntaxError: Got too many {end} statements");
    }

    #[test]
    fn test_expand_render_error() {
        let err = expand("{missing}", &Value::Mapping(Default::default())).unwrap_err();
        assert!(matches!(err, Error::Render(RenderError::UndefinedVariable { .. })));
        assert_eq!(err.to_string(), "UndefinedVariable: missing is not defined");
    }
}
