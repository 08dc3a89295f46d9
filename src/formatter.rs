//! Formatter registry
//!
//! Formatters turn a resolved value into text. The built-in table (`html`,
//! `htmltag`, `str`, `raw`) is process-wide and read-only; callers layer their
//! own formatters over it per compile with [`FormatterSet`], which never writes
//! to the shared table.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::value::Value;

/// A named, pluggable `(value) -> string` function
pub type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

static DEFAULT_FORMATTERS: LazyLock<HashMap<&'static str, Formatter>> = LazyLock::new(|| {
    let mut table: HashMap<&'static str, Formatter> = HashMap::new();
    table.insert("html", Arc::new(|v: &Value| html_escape(&v.to_string())));
    table.insert("htmltag", Arc::new(|v: &Value| html_tag_escape(&v.to_string())));
    table.insert("str", Arc::new(|v: &Value| v.to_string()));
    table.insert("raw", Arc::new(|v: &Value| v.to_string()));
    table
});

/// Build a formatter from a closure
pub fn formatter<F>(f: F) -> Formatter
where
    F: Fn(&Value) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Escape text for an HTML body
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('>', "&gt;").replace('<', "&lt;")
}

/// Escape text for an HTML attribute value
pub fn html_tag_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}

/// A formatter resolved at compile time, kept with its name for debugging
#[derive(Clone)]
pub struct NamedFormatter {
    pub name: String,
    func: Formatter,
}

impl NamedFormatter {
    pub fn apply(&self, value: &Value) -> String {
        (self.func)(value)
    }
}

impl fmt::Debug for NamedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamedFormatter").field(&self.name).finish()
    }
}

/// Caller formatters merged over the built-ins
///
/// Caller entries win on name collision.
#[derive(Clone, Copy)]
pub struct FormatterSet<'a> {
    overrides: &'a HashMap<String, Formatter>,
}

impl<'a> FormatterSet<'a> {
    pub fn new(overrides: &'a HashMap<String, Formatter>) -> Self {
        Self { overrides }
    }

    pub fn get(&self, name: &str) -> Option<NamedFormatter> {
        self.overrides
            .get(name)
            .or_else(|| DEFAULT_FORMATTERS.get(name))
            .map(|func| NamedFormatter {
                name: name.to_string(),
                func: Arc::clone(func),
            })
    }
}
