//! Scoped data context
//!
//! A stack of frames over the input data. Sections push the value they name,
//! iteration pushes a placeholder frame that is overwritten with each element,
//! and lookups search from the top of the stack downward (dynamic scoping).

use tracing::trace;

use crate::value::Value;

use super::error::RenderError;

static NULL: Value = Value::Null;

/// Result of advancing an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The placeholder frame now holds the next element
    Continue,
    /// The sequence is exhausted and the placeholder frame is gone
    Done,
}

/// An active iteration
#[derive(Debug, Clone, Copy)]
struct Cursor {
    /// Stack position of the sequence being iterated
    sequence: usize,
    index: usize,
}

/// Runtime stack of data frames, created fresh for every render
#[derive(Debug)]
pub struct ScopedContext<'a> {
    stack: Vec<&'a Value>,
    cursors: Vec<Cursor>,
}

impl<'a> ScopedContext<'a> {
    pub fn new(data: &'a Value) -> Self {
        Self {
            stack: vec![data],
            cursors: Vec::new(),
        }
    }

    fn top(&self) -> &'a Value {
        self.stack.last().copied().unwrap_or(&NULL)
    }

    /// Enter the field `name` of the top value
    ///
    /// Pushes the field (or null when absent) and returns it. Without a name
    /// nothing is pushed and `None` is returned.
    pub fn push_section(&mut self, name: Option<&str>) -> Option<&'a Value> {
        let name = name?;
        let value = self.top().get(name).unwrap_or(&NULL);
        trace!(name, "push section");
        self.stack.push(value);
        Some(value)
    }

    /// Discard the top frame
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Start iterating the sequence on top of the stack
    ///
    /// Pushes a placeholder frame; each [`next`](Self::next) fills it with the
    /// following element.
    pub fn begin_iteration(&mut self) {
        self.cursors.push(Cursor {
            sequence: self.stack.len() - 1,
            index: 0,
        });
        self.stack.push(&NULL);
    }

    /// Advance the innermost iteration
    pub fn next(&mut self) -> Step {
        let Some(cursor) = self.cursors.last_mut() else {
            return Step::Done;
        };

        let sequence: &'a Value = self.stack[cursor.sequence];
        let items = sequence.as_sequence().unwrap_or(&[]);
        if cursor.index >= items.len() {
            trace!("next: done");
            self.cursors.pop();
            self.stack.pop();
            return Step::Done;
        }

        trace!(index = cursor.index, "next");
        let item = &items[cursor.index];
        cursor.index += 1;
        if let Some(slot) = self.stack.last_mut() {
            *slot = item;
        }
        Step::Continue
    }

    /// The value `@` refers to
    pub fn cursor_value(&self) -> &'a Value {
        self.top()
    }

    /// Resolve `name` against the nearest enclosing mapping that defines it
    ///
    /// Frames that are not mappings are skipped, as are null entries.
    pub fn lookup(&self, name: &str) -> Result<&'a Value, RenderError> {
        self.stack
            .iter()
            .rev()
            .copied()
            .filter_map(Value::as_mapping)
            .filter_map(|map| map.get(name))
            .find(|value| !value.is_null())
            .ok_or_else(|| RenderError::UndefinedVariable {
                name: name.to_string(),
            })
    }
}
