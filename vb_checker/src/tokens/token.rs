//! Token categories and the position-tagged token record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of lexical categories recognized by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenCategory {
    ModuleOpen,
    ModuleClose,
    Import,
    DimDeclaration,
    SubMainOpen,
    SubClose,
    While,
    WhileEnd,
    TryOpen,
    Catch,
    TryEnd,
    Comment,
    StringLiteral,
    Assignment,
    /// Reserved; no rule produces it
    Other,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 15] = [
        TokenCategory::ModuleOpen,
        TokenCategory::ModuleClose,
        TokenCategory::Import,
        TokenCategory::DimDeclaration,
        TokenCategory::SubMainOpen,
        TokenCategory::SubClose,
        TokenCategory::While,
        TokenCategory::WhileEnd,
        TokenCategory::TryOpen,
        TokenCategory::Catch,
        TokenCategory::TryEnd,
        TokenCategory::Comment,
        TokenCategory::StringLiteral,
        TokenCategory::Assignment,
        TokenCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModuleOpen => "MODULE",
            Self::ModuleClose => "END_MODULE",
            Self::Import => "IMPORT",
            Self::DimDeclaration => "DIM",
            Self::SubMainOpen => "SUB_MAIN",
            Self::SubClose => "END_SUB",
            Self::While => "WHILE",
            Self::WhileEnd => "END_WHILE",
            Self::TryOpen => "TRY",
            Self::Catch => "CATCH",
            Self::TryEnd => "END_TRY",
            Self::Comment => "COMMENT",
            Self::StringLiteral => "STRING",
            Self::Assignment => "ASSIGNMENT",
            Self::Other => "OTHER",
        }
    }

    /// Tokens permitted ahead of `Module Program`
    pub fn allowed_before_module(&self) -> bool {
        matches!(self, Self::Import | Self::Comment)
    }

    /// Tokens permitted after `End Module`
    pub fn allowed_after_module(&self) -> bool {
        matches!(self, Self::Comment)
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based line, 0-based character column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A recognized span of source text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    category: TokenCategory,
    text: String,
    line: usize,
    column: usize,
}

impl Token {
    /// Build a token. `line` is clamped to at least 1.
    pub fn new(category: TokenCategory, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            category,
            text: text.into(),
            line: line.max(1),
            column,
        }
    }

    pub fn category(&self) -> TokenCategory {
        self.category
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is(&self, category: TokenCategory) -> bool {
        self.category == category
    }

    /// Width of the match in characters
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at {}:{}",
            self.category, self.text, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_accessors() {
        let token = Token::new(TokenCategory::While, "While", 3, 4);

        assert_eq!(token.category(), TokenCategory::While);
        assert_eq!(token.text(), "While");
        assert_eq!(token.position(), Position::new(3, 4));
        assert!(token.is(TokenCategory::While));
        assert_eq!(token.to_string(), "WHILE 'While' at 3:4");
    }

    #[test]
    fn test_line_is_never_zero() {
        assert_eq!(Token::new(TokenCategory::Comment, "'", 0, 0).line(), 1);
    }

    #[test]
    fn test_module_boundary_permissions() {
        let before: Vec<_> = TokenCategory::ALL
            .iter()
            .filter(|c| c.allowed_before_module())
            .collect();
        assert_eq!(before, vec![&TokenCategory::Import, &TokenCategory::Comment]);

        assert!(TokenCategory::Comment.allowed_after_module());
        assert!(!TokenCategory::Import.allowed_after_module());
    }

    #[test]
    fn test_width_counts_characters() {
        let token = Token::new(TokenCategory::Comment, "' señal", 1, 0);
        assert_eq!(token.width(), 7);
    }
}
