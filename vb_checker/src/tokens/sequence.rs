//! Line-ordered, read-only token sequence produced by the tokenizer

use super::token::{Token, TokenCategory};
use serde::Serialize;

/// Tokens ordered by line, then by column within a line.
///
/// Built once by the lexical analyzer and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Wrap tokens, restoring (line, column) order if needed
    pub fn new(mut tokens: Vec<Token>) -> Self {
        tokens.sort_by_key(|t| (t.line(), t.column()));
        Self { tokens }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Tokens that start on `line`, in column order
    pub fn on_line(&self, line: usize) -> impl Iterator<Item = &Token> {
        // Sorted by line, so a binary search finds the first token of the line
        let start = self.tokens.partition_point(|t| t.line() < line);
        self.tokens[start..]
            .iter()
            .take_while(move |t| t.line() == line)
    }

    pub fn count_of(&self, category: TokenCategory) -> usize {
        self.tokens.iter().filter(|t| t.is(category)).count()
    }

    /// First token of a category, if any
    pub fn first_of(&self, category: TokenCategory) -> Option<&Token> {
        self.tokens.iter().find(|t| t.is(category))
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenSequence {
        TokenSequence::new(vec![
            Token::new(TokenCategory::SubMainOpen, "Sub Main()", 2, 4),
            Token::new(TokenCategory::ModuleOpen, "Module Program", 1, 0),
            Token::new(TokenCategory::StringLiteral, "\"x\"", 3, 0),
            Token::new(TokenCategory::Comment, "' trailing", 3, 10),
        ])
    }

    #[test]
    fn test_new_sorts_by_line_then_column() {
        let lines: Vec<_> = sample().iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(lines, vec![(1, 0), (2, 4), (3, 0), (3, 10)]);
    }

    #[test]
    fn test_on_line() {
        let seq = sample();
        let third: Vec<_> = seq.on_line(3).map(|t| t.category()).collect();
        assert_eq!(
            third,
            vec![TokenCategory::StringLiteral, TokenCategory::Comment]
        );
        assert_eq!(seq.on_line(9).count(), 0);
    }

    #[test]
    fn test_counts_and_lookup() {
        let seq = sample();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.count_of(TokenCategory::Comment), 1);
        assert_eq!(seq.count_of(TokenCategory::While), 0);
        assert_eq!(
            seq.first_of(TokenCategory::SubMainOpen).map(|t| t.line()),
            Some(2)
        );
    }
}
