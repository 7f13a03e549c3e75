//! Line-keyed diagnostics collected during validation

use crate::logging::Code;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A user-facing message tied to a 1-based source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub code: Code,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, code: Code, message: impl Into<String>) -> Self {
        Self {
            line,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Append-only diagnostics sink.
///
/// Entries keep their reporting order. Several entries may share a line and
/// none ever replaces another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: usize, code: Code, message: impl Into<String>) {
        self.entries.push(Diagnostic::new(line, code, message));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics for one line, in reporting order
    pub fn for_line(&self, line: usize) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.line == line)
    }

    /// Group by line; each group keeps reporting order
    pub fn by_line(&self) -> BTreeMap<usize, Vec<&Diagnostic>> {
        let mut grouped: BTreeMap<usize, Vec<&Diagnostic>> = BTreeMap::new();
        for diagnostic in &self.entries {
            grouped.entry(diagnostic.line).or_default().push(diagnostic);
        }
        grouped
    }

    /// Diagnostics whose line falls outside `1..=line_count`
    pub fn outside(&self, line_count: usize) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(move |d| d.line == 0 || d.line > line_count)
    }

    pub fn count_with_code(&self, code: Code) -> usize {
        self.entries.iter().filter(|d| d.code == code).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
