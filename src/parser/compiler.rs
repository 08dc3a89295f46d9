//! Block compiler: token stream to section tree
//!
//! Nesting is tracked with an explicit stack of open sections rather than
//! recursion. The root section sits at the bottom; `section` directives push,
//! `end` pops and attaches the finished section to its parent's current
//! clause. Compilation succeeds only when the root is the sole entry left.

use tracing::{debug, trace};

use crate::config::TemplateOptions;
use crate::error::{CompileError, Span};
use crate::formatter::{FormatterSet, NamedFormatter};
use crate::parser::ast::{Clause, Section, Statement, Substitution};
use crate::parser::grammar::{parse_keyword, Keyword};
use crate::parser::tokenizer::{Segment, Tokenizer};

/// A section still waiting for its `end`
struct OpenBlock {
    section: Section,
    repeated: bool,
    span: Span,
}

/// Compile a template string into its root section
pub fn compile(source: &str, options: &TemplateOptions) -> Result<Section, CompileError> {
    let (meta_left, meta_right) = options.delimiters()?;
    let tokenizer = Tokenizer::new(&meta_left, &meta_right)?;

    debug!(
        len = source.len(),
        meta_left = %meta_left,
        meta_right = %meta_right,
        "compiling template"
    );

    let compiler = Compiler {
        meta_left: &meta_left,
        meta_right: &meta_right,
        format_char: options.format_char,
        default_formatter: options.default_formatter.as_deref(),
        formatters: FormatterSet::new(&options.more_formatters),
    };
    compiler.run(tokenizer.split(source))
}

struct Compiler<'a> {
    meta_left: &'a str,
    meta_right: &'a str,
    format_char: char,
    default_formatter: Option<&'a str>,
    formatters: FormatterSet<'a>,
}

impl Compiler<'_> {
    fn run(&self, segments: Vec<Segment<'_>>) -> Result<Section, CompileError> {
        let mut stack = vec![OpenBlock {
            section: Section::new(None),
            repeated: false,
            span: 0..0,
        }];

        for segment in segments {
            match segment {
                Segment::Literal { text, .. } => {
                    if !text.is_empty() {
                        current(&mut stack).append(Statement::Literal(text.to_string()));
                    }
                }
                Segment::Directive { text, span } => {
                    self.directive(&mut stack, text, span)?;
                }
            }
        }

        if stack.len() != 1 {
            let span = stack.last().map(|b| b.span.clone()).unwrap_or(0..0);
            return Err(CompileError::syntax(span, "Got too few {end} statements"));
        }

        let root = stack.pop().map(|b| b.section).unwrap_or_default();
        debug!(
            statements = root.statements(Clause::Default).len(),
            "compiled template"
        );
        Ok(root)
    }

    fn directive(
        &self,
        stack: &mut Vec<OpenBlock>,
        raw: &str,
        span: Span,
    ) -> Result<(), CompileError> {
        let (raw, had_newline) = match raw.strip_suffix('\n') {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };
        let token = raw
            .strip_prefix(self.meta_left)
            .and_then(|t| t.strip_suffix(self.meta_right))
            .unwrap_or(raw);
        trace!(token, had_newline, "directive");

        if token.starts_with('#') {
            return Ok(());
        }

        let token = match token.strip_prefix('.') {
            Some(body) => match parse_keyword(body) {
                Some(keyword) => return self.keyword(stack, keyword, span),
                None => body,
            },
            None => token,
        };

        let substitution = self.substitution(token, &span)?;
        let block = current(stack);
        block.append(Statement::Substitute(substitution));
        if had_newline {
            block.append(Statement::Literal("\n".to_string()));
        }
        Ok(())
    }

    fn keyword(
        &self,
        stack: &mut Vec<OpenBlock>,
        keyword: Keyword,
        span: Span,
    ) -> Result<(), CompileError> {
        match keyword {
            Keyword::MetaLeft => {
                current(stack).append(Statement::Literal(self.meta_left.to_string()))
            }
            Keyword::MetaRight => {
                current(stack).append(Statement::Literal(self.meta_right.to_string()))
            }
            Keyword::Space => current(stack).append(Statement::Literal(" ".to_string())),
            Keyword::Section { repeated, name } => {
                trace!(repeated, name = ?name, "open section");
                stack.push(OpenBlock {
                    section: Section::new(name),
                    repeated,
                    span,
                });
            }
            Keyword::AlternatesWith => current(stack).new_clause(Clause::Alternate),
            Keyword::Or => current(stack).new_clause(Clause::Or),
            Keyword::End => {
                if stack.len() <= 1 {
                    return Err(CompileError::syntax(span, "Got too many {end} statements"));
                }
                if let Some(block) = stack.pop() {
                    let statement = if block.repeated {
                        Statement::RepeatedSection(block.section)
                    } else {
                        Statement::Section(block.section)
                    };
                    current(stack).append(statement);
                }
            }
        }
        Ok(())
    }

    fn substitution(&self, token: &str, span: &Span) -> Result<Substitution, CompileError> {
        let mut parts = token.split(self.format_char);
        let name = parts.next().unwrap_or_default().to_string();
        let named: Vec<&str> = parts.collect();

        let formatters = if named.is_empty() {
            let default = self
                .default_formatter
                .ok_or_else(|| CompileError::MissingFormatter { span: span.clone() })?;
            vec![self.formatter(default, span)?]
        } else {
            named
                .into_iter()
                .map(|f| self.formatter(f, span))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Substitution { name, formatters })
    }

    fn formatter(&self, name: &str, span: &Span) -> Result<NamedFormatter, CompileError> {
        self.formatters
            .get(name)
            .ok_or_else(|| CompileError::BadFormatter {
                name: name.to_string(),
                span: span.clone(),
            })
    }
}

/// The innermost open section
fn current(stack: &mut [OpenBlock]) -> &mut Section {
    let last = stack.len() - 1;
    &mut stack[last].section
}
