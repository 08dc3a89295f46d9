//! Executor: walks a compiled program against a scoped context
//!
//! Statements run in order. Literals go straight to the sink; substitutions,
//! sections and repeated sections dispatch to their handlers below.

mod context;
mod error;
pub mod sink;

pub use context::{ScopedContext, Step};
pub use error::RenderError;
pub use sink::{Sink, WriterSink};

use tracing::{debug, trace};

use crate::parser::ast::{Clause, Section, Statement, Substitution, CURSOR};
use crate::value::Value;

/// Execute a statement list
pub fn execute<S: Sink + ?Sized>(
    statements: &[Statement],
    context: &mut ScopedContext<'_>,
    sink: &mut S,
) -> Result<(), RenderError> {
    for statement in statements {
        match statement {
            Statement::Literal(text) => sink.accept(text)?,
            Statement::Substitute(sub) => do_substitute(sub, context, sink)?,
            Statement::Section(section) => do_section(section, context, sink)?,
            Statement::RepeatedSection(section) => do_repeated_section(section, context, sink)?,
        }
    }
    Ok(())
}

fn do_substitute<S: Sink + ?Sized>(
    sub: &Substitution,
    context: &mut ScopedContext<'_>,
    sink: &mut S,
) -> Result<(), RenderError> {
    trace!(name = %sub.name, "substitute");
    let value = if sub.is_cursor() {
        context.cursor_value()
    } else {
        context.lookup(&sub.name)?
    };

    let mut formatters = sub.formatters.iter();
    let Some(first) = formatters.next() else {
        return sink.accept(&value.to_string());
    };

    // Each formatter's output is the next one's input
    let mut text = first.apply(value);
    for formatter in formatters {
        text = formatter.apply(&Value::String(text));
    }
    sink.accept(&text)
}

fn do_section<S: Sink + ?Sized>(
    section: &Section,
    context: &mut ScopedContext<'_>,
    sink: &mut S,
) -> Result<(), RenderError> {
    debug!(name = ?section.name(), "section");
    let pushed = context.push_section(section.name());

    match pushed {
        Some(value) if value.is_truthy() => {
            let result = execute(section.statements(Clause::Default), context, sink);
            context.pop();
            result
        }
        Some(_) => {
            context.pop();
            execute(section.statements(Clause::Or), context, sink)
        }
        None => execute(section.statements(Clause::Or), context, sink),
    }
}

fn do_repeated_section<S: Sink + ?Sized>(
    section: &Section,
    context: &mut ScopedContext<'_>,
    sink: &mut S,
) -> Result<(), RenderError> {
    debug!(name = ?section.name(), "repeated section");

    // `@` iterates the value already on top of the stack
    let (items, pushed) = if section.name() == Some(CURSOR) {
        (Some(context.cursor_value()), false)
    } else {
        let items = context.push_section(section.name());
        (items, items.is_some())
    };

    let count = items.and_then(Value::as_sequence).map_or(0, |s| s.len());
    let result = if count > 0 {
        iterate(section, count, context, sink)
    } else {
        trace!("repeated section: or clause");
        execute(section.statements(Clause::Or), context, sink)
    };

    if pushed {
        context.pop();
    }
    result
}

fn iterate<S: Sink + ?Sized>(
    section: &Section,
    count: usize,
    context: &mut ScopedContext<'_>,
    sink: &mut S,
) -> Result<(), RenderError> {
    let statements = section.statements(Clause::Default);
    let alternate = section.statements(Clause::Alternate);
    let last = count - 1;

    context.begin_iteration();
    let mut i = 0;
    while context.next() == Step::Continue {
        execute(statements, context, sink)?;
        if i != last {
            execute(alternate, context, sink)?;
        }
        i += 1;
    }
    Ok(())
}
