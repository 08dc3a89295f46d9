//! Compiled template facade

use serde::Serialize;

use crate::config::TemplateOptions;
use crate::error::CompileError;
use crate::executor::{execute, RenderError, ScopedContext, Sink};
use crate::parser::{compile, Clause, Section};
use crate::value::Value;

/// A template compiled once and rendered against any number of data trees
///
/// The program is immutable, so a `Template` can be shared across threads;
/// every render builds its own context.
#[derive(Debug, Clone)]
pub struct Template {
    program: Section,
}

impl Template {
    /// Compile with default options
    pub fn new(source: &str) -> Result<Self, CompileError> {
        Self::with_options(source, &TemplateOptions::default())
    }

    pub fn with_options(source: &str, options: &TemplateOptions) -> Result<Self, CompileError> {
        Ok(Self {
            program: compile(source, options)?,
        })
    }

    /// The root section of the compiled program
    pub fn program(&self) -> &Section {
        &self.program
    }

    /// Stream output chunks to `sink` in program order
    ///
    /// Chunks emitted before an error stay delivered.
    pub fn render<S: Sink + ?Sized>(&self, data: &Value, sink: &mut S) -> Result<(), RenderError> {
        let mut context = ScopedContext::new(data);
        execute(self.program.statements(Clause::Default), &mut context, sink)
    }

    /// Render to a single string
    pub fn expand(&self, data: &Value) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render(data, &mut out)?;
        Ok(out)
    }

    /// Render any serializable value
    pub fn expand_serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, crate::Error> {
        let value = Value::from_serialize(data)?;
        Ok(self.expand(&value)?)
    }
}
