//! Compiled program types

use std::collections::HashMap;

use crate::formatter::NamedFormatter;

/// Variable name that refers to the current cursor value
pub const CURSOR: &str = "@";

/// One of a section's alternative statement lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Default,
    Alternate,
    Or,
}

/// A `{name|formatter...}` directive
#[derive(Debug, Clone)]
pub struct Substitution {
    pub name: String,
    pub formatters: Vec<NamedFormatter>,
}

impl Substitution {
    pub fn is_cursor(&self) -> bool {
        self.name == CURSOR
    }
}

/// An executable statement
#[derive(Debug, Clone)]
pub enum Statement {
    Literal(String),
    Substitute(Substitution),
    Section(Section),
    RepeatedSection(Section),
}

/// A named block of statements with per-clause bodies
///
/// The root of a program is an unnamed section.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: Option<String>,
    clauses: HashMap<Clause, Vec<Statement>>,
    current: Clause,
}

impl Default for Section {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Section {
    pub fn new(name: Option<String>) -> Self {
        let mut clauses = HashMap::new();
        clauses.insert(Clause::Default, Vec::new());
        Self {
            name,
            clauses,
            current: Clause::Default,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Statements of a clause; an unset clause is empty
    pub fn statements(&self, clause: Clause) -> &[Statement] {
        self.clauses.get(&clause).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Start a fresh statement list for `clause` and make it current
    pub fn new_clause(&mut self, clause: Clause) {
        self.clauses.insert(clause, Vec::new());
        self.current = clause;
    }

    /// Add a statement to the current clause
    pub fn append(&mut self, statement: Statement) {
        self.clauses.entry(self.current).or_default().push(statement);
    }

    /// Move child sections out of every clause
    fn take_children(&mut self, into: &mut Vec<Section>) {
        for statements in self.clauses.values_mut() {
            for statement in std::mem::take(statements) {
                match statement {
                    Statement::Section(child) | Statement::RepeatedSection(child) => {
                        into.push(child)
                    }
                    Statement::Literal(_) | Statement::Substitute(_) => {}
                }
            }
        }
    }
}

// Nesting depth is unbounded, so children are freed from a worklist instead
// of through the recursive drop glue.
impl Drop for Section {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut section) = pending.pop() {
            section.take_children(&mut pending);
        }
    }
}
