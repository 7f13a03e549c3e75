//! Ordered recognition rules
//!
//! Rules are tried in registration order and earlier rules win overlaps, so
//! the order below is part of the tokenizer's behavior. `End While` must never
//! produce a `While` token, which holds because every opening keyword rule is
//! anchored at the first non-blank character of the line.

use super::analyzer::LexerError;
use crate::tokens::TokenCategory;
use regex::Regex;

/// One `(pattern, category)` pair
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    category: TokenCategory,
}

impl Rule {
    pub fn category(&self) -> TokenCategory {
        self.category
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Byte ranges of every non-overlapping match on `line`
    pub(crate) fn find_all<'a>(&'a self, line: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.pattern.find_iter(line).map(|m| (m.start(), m.end()))
    }
}

/// Ordered rule list; index order is priority order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard dialect rules, highest priority first
    pub fn standard() -> Result<Self, LexerError> {
        let mut set = Self::empty();

        // Comments and strings are case-sensitive by nature
        set.register(r"^\s*'.*", TokenCategory::Comment)?;
        set.register(r#"^"(?:[^"\\]|\\.)*""#, TokenCategory::StringLiteral)?;

        set.register(r"(?i)^\s*Module\s+Program\b", TokenCategory::ModuleOpen)?;
        set.register(r"(?i)^\s*End\s+Module\b", TokenCategory::ModuleClose)?;
        set.register(r"(?i)^\s*Imports\s+\w[.\w]*.*", TokenCategory::Import)?;
        set.register(r"(?i)^\s*Sub\s+Main\b.*", TokenCategory::SubMainOpen)?;
        set.register(r"(?i)^\s*End\s+Sub\b", TokenCategory::SubClose)?;
        set.register(r"(?i)^\s*While\b", TokenCategory::While)?;
        set.register(r"(?i)^\s*End\s+While\b", TokenCategory::WhileEnd)?;
        set.register(r"(?i)^\s*Try\b", TokenCategory::TryOpen)?;
        set.register(r"(?i)^\s*Catch\b.*", TokenCategory::Catch)?;
        set.register(r"(?i)^\s*End\s+Try\b", TokenCategory::TryEnd)?;
        set.register(r"(?i)^\s*Dim\b.*", TokenCategory::DimDeclaration)?;
        set.register(r"^\s*[A-Za-z_]\w*\s*=.*", TokenCategory::Assignment)?;

        Ok(set)
    }

    /// Append a rule at the lowest priority
    pub fn register(&mut self, pattern: &str, category: TokenCategory) -> Result<(), LexerError> {
        let regex = Regex::new(pattern).map_err(|e| LexerError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        self.rules.push(Rule {
            pattern: regex,
            category,
        });
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
