//! Compile options and their TOML form

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::CompileError;
use crate::formatter::Formatter;

/// Sentinel accepted in config files to disable the default formatter
pub const NO_DEFAULT_FORMATTER: &str = "none";

/// Errors that can occur when loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Options recognized when compiling a template
#[derive(Clone)]
pub struct TemplateOptions {
    /// Formatters merged over the built-ins
    pub more_formatters: HashMap<String, Formatter>,
    /// Formatter used when a substitution names none; `None` requires explicit ones
    pub default_formatter: Option<String>,
    /// Separator between a variable name and its formatters
    pub format_char: char,
    /// Delimiter marker, split into equal left/right halves
    pub meta: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            more_formatters: HashMap::new(),
            default_formatter: Some("str".to_string()),
            format_char: '|',
            meta: "{}".to_string(),
        }
    }
}

impl fmt::Debug for TemplateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.more_formatters.keys().collect();
        names.sort();
        f.debug_struct("TemplateOptions")
            .field("more_formatters", &names)
            .field("default_formatter", &self.default_formatter)
            .field("format_char", &self.format_char)
            .field("meta", &self.meta)
            .finish()
    }
}

impl TemplateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extra formatter
    pub fn with_formatter(mut self, name: impl Into<String>, formatter: Formatter) -> Self {
        self.more_formatters.insert(name.into(), formatter);
        self
    }

    pub fn with_default_formatter(mut self, name: impl Into<String>) -> Self {
        self.default_formatter = Some(name.into());
        self
    }

    /// Require every substitution to name its formatters
    pub fn without_default_formatter(mut self) -> Self {
        self.default_formatter = None;
        self
    }

    pub fn with_format_char(mut self, format_char: char) -> Self {
        self.format_char = format_char;
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = meta.into();
        self
    }

    /// Check the format char and split the meta marker into its two halves
    pub fn delimiters(&self) -> Result<(String, String), CompileError> {
        if self.format_char != ':' && self.format_char != '|' {
            return Err(CompileError::configuration(
                "Only format characters : and | are accepted",
            ));
        }

        let chars: Vec<char> = self.meta.chars().collect();
        if chars.is_empty() {
            return Err(CompileError::configuration("meta must not be empty"));
        }
        if chars.len() % 2 == 1 {
            return Err(CompileError::configuration(format!(
                "{} has an odd number of metacharacters",
                self.meta
            )));
        }

        let (left, right) = chars.split_at(chars.len() / 2);
        Ok((left.iter().collect(), right.iter().collect()))
    }
}

/// TOML structure for compile options
///
/// ```toml
/// format_char = ":"
/// meta = "[[]]"
/// default_formatter = "html"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    pub format_char: Option<char>,
    pub meta: Option<String>,
    pub default_formatter: Option<String>,
}

impl TemplateConfig {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load config from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the configured fields over default options
    pub fn into_options(self) -> TemplateOptions {
        let mut options = TemplateOptions::default();
        if let Some(c) = self.format_char {
            options.format_char = c;
        }
        if let Some(meta) = self.meta {
            options.meta = meta;
        }
        match self.default_formatter.as_deref() {
            Some(NO_DEFAULT_FORMATTER) => options.default_formatter = None,
            Some(name) => options.default_formatter = Some(name.to_string()),
            None => {}
        }
        options
    }
}
