//! Splits template text into literal and directive segments
//!
//! A single regex built from the delimiter pair finds directives. Matching is
//! non-greedy and does not cross lines, so adjacent directives stay separate.
//! A newline directly after a directive belongs to the directive segment.

use regex::Regex;

use crate::error::{CompileError, Span};

/// One piece of the flat token stream
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'s> {
    /// Text copied to the output as-is (may be empty)
    Literal { text: &'s str, span: Span },
    /// Raw directive text including its delimiters and optional trailing newline
    Directive { text: &'s str, span: Span },
}

impl<'s> Segment<'s> {
    pub fn text(&self) -> &'s str {
        match self {
            Segment::Literal { text, .. } | Segment::Directive { text, .. } => text,
        }
    }
}

/// Directive matcher for one delimiter pair
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new(meta_left: &str, meta_right: &str) -> Result<Self, CompileError> {
        let source = format!(
            "{}.+?{}\n?",
            regex::escape(meta_left),
            regex::escape(meta_right)
        );
        let pattern = Regex::new(&source).map_err(|e| {
            CompileError::configuration(format!("invalid delimiters {meta_left}{meta_right}: {e}"))
        })?;
        Ok(Self { pattern })
    }

    /// Split a template into segments
    ///
    /// Literals sit at even positions and directives at odd positions; the
    /// stream always starts and ends with a (possibly empty) literal.
    pub fn split<'s>(&self, template: &'s str) -> Vec<Segment<'s>> {
        let mut segments = Vec::new();
        let mut last = 0;

        for m in self.pattern.find_iter(template) {
            segments.push(Segment::Literal {
                text: &template[last..m.start()],
                span: last..m.start(),
            });
            segments.push(Segment::Directive {
                text: m.as_str(),
                span: m.range(),
            });
            last = m.end();
        }

        segments.push(Segment::Literal {
            text: &template[last..],
            span: last..template.len(),
        });
        segments
    }
}
