//! Line-oriented rule tokenizer with FileProcessingResult integration
//!
//! Every rule is applied to every line in priority order. A candidate match is
//! accepted only if it does not overlap a match already accepted on the same
//! line; overlapping candidates are dropped whole, never shortened. Accepted
//! tokens of a line are then ordered by starting column.

use super::rules::RuleSet;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{Position, Token, TokenCategory, TokenSequence};
use crate::{log_debug, log_success};
use std::collections::BTreeMap;

/// Lexical analysis errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid recognition pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidPattern { .. } => codes::lexical::INVALID_PATTERN,
        }
    }
}

/// Counters gathered over one tokenization run
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub lines_scanned: usize,
    pub lines_with_tokens: usize,
    pub total_tokens: usize,
    pub discarded_overlaps: usize,
    pub per_category: BTreeMap<TokenCategory, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;
        *self.per_category.entry(token.category()).or_insert(0) += 1;
    }

    pub fn count_of(&self, category: TokenCategory) -> usize {
        self.per_category.get(&category).copied().unwrap_or(0)
    }
}

/// Half-open byte range of an accepted match on the current line
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Ordered-rule tokenizer
pub struct LexicalAnalyzer {
    rules: RuleSet,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    /// Analyzer over the standard rules
    pub fn new() -> Result<Self, LexerError> {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Result<Self, LexerError> {
        Ok(Self::with_rules(RuleSet::standard()?, preferences))
    }

    /// Analyzer over a caller-supplied rule list
    pub fn with_rules(rules: RuleSet, preferences: LexicalPreferences) -> Self {
        Self {
            rules,
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize a processed file with file-aware logging
    pub fn tokenize_file_result(
        &mut self,
        file_result: &FileProcessingResult,
    ) -> TokenSequence {
        let file_path = file_result.metadata.path.display().to_string();

        log_debug!("Starting lexical analysis",
            "file" => file_path.as_str(),
            "line_count" => file_result.line_count(),
            "char_count" => file_result.char_count(),
            "rule_count" => self.rules.len()
        );

        let tokens = self.tokenize_lines(&file_result.lines);

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "file" => file_path.as_str(),
            "token_count" => tokens.len(),
            "lines_scanned" => self.metrics.lines_scanned,
            "lines_with_tokens" => self.metrics.lines_with_tokens,
            "discarded_overlaps" => self.metrics.discarded_overlaps,
            "comments" => self.metrics.count_of(TokenCategory::Comment)
        );

        tokens
    }

    /// Tokenize lines; index 0 is line 1. Unrecognized text is skipped, so
    /// this never fails.
    pub fn tokenize_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> TokenSequence {
        self.metrics = LexicalMetrics::default();
        let mut tokens = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;
            let line = line.as_ref();

            let before = tokens.len();
            self.scan_line(line, line_number, &mut tokens);
            self.metrics.lines_scanned += 1;
            if tokens.len() > before {
                self.metrics.lines_with_tokens += 1;
            }
        }

        // Lines are visited in order and each line is column-sorted already
        TokenSequence::new(tokens)
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    // ========================================================================
    // Per-line matching
    // ========================================================================

    fn scan_line(&mut self, line: &str, line_number: usize, out: &mut Vec<Token>) {
        let mut accepted: Vec<(Span, TokenCategory)> = Vec::new();

        for rule in self.rules.iter() {
            for (start, end) in rule.find_all(line) {
                let candidate = Span { start, end };

                if accepted.iter().any(|(span, _)| span.overlaps(&candidate)) {
                    self.metrics.discarded_overlaps += 1;
                    if self.preferences.log_discarded_overlaps {
                        log_debug!("Discarded overlapping match",
                            at = Position::new(line_number, column_of(line, start)),
                            "category" => rule.category(),
                            "text" => &line[start..end]
                        );
                    }
                    continue;
                }

                accepted.push((candidate, rule.category()));
            }
        }

        accepted.sort_by_key(|(span, _)| span.start);

        for (span, category) in accepted {
            let token = Token::new(
                category,
                &line[span.start..span.end],
                line_number,
                column_of(line, span.start),
            );

            if self.preferences.trace_matches {
                log_debug!("Token accepted",
                    at = token.position(),
                    "category" => category,
                    "width" => token.width()
                );
            }

            self.metrics.record_token(&token);
            out.push(token);
        }
    }
}

/// Character column of a byte offset
fn column_of(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn analyzer() -> LexicalAnalyzer {
        LexicalAnalyzer::with_preferences(LexicalPreferences {
            trace_matches: false,
            log_discarded_overlaps: false,
        })
        .unwrap()
    }

    fn categories(lines: &[&str]) -> Vec<TokenCategory> {
        analyzer()
            .tokenize_lines(lines)
            .iter()
            .map(Token::category)
            .collect()
    }

    #[test]
    fn test_comment_shadows_dim() {
        let mut lexer = analyzer();
        let tokens = lexer.tokenize_lines(&["   ' Dim x As String"]);

        assert_eq!(tokens.len(), 1);
        let token = tokens.get(0).unwrap();
        assert_eq!(token.category(), TokenCategory::Comment);
        assert_eq!(token.column(), 0);
        assert_eq!(lexer.metrics().discarded_overlaps, 0);
    }

    #[test]
    fn test_end_while_is_single_token() {
        assert_eq!(categories(&["    End While"]), vec![TokenCategory::WhileEnd]);
        assert_eq!(categories(&["End Try"]), vec![TokenCategory::TryEnd]);
        assert_eq!(categories(&["End Sub"]), vec![TokenCategory::SubClose]);
    }

    #[test]
    fn test_dim_with_assignment_is_one_token() {
        let mut lexer = analyzer();
        let tokens = lexer.tokenize_lines(&["Dim total As Integer = 0"]);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get(0).unwrap().category(), TokenCategory::DimDeclaration);
    }

    #[test]
    fn test_overlap_is_discarded_not_truncated() {
        // Dim rule and assignment rule both cover this line; only the earlier wins
        let mut lexer = analyzer();
        let tokens = lexer.tokenize_lines(&["Dim = 5"]);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get(0).unwrap().text(), "Dim = 5");
        assert_eq!(lexer.metrics().discarded_overlaps, 1);
    }

    #[test]
    fn test_lines_and_columns() {
        let mut lexer = analyzer();
        let tokens = lexer.tokenize_lines(&["Module Program", "", "    Sub Main()"]);

        let positions: Vec<_> = tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(positions, vec![(1, 0), (3, 0)]);
        assert_eq!(lexer.metrics().lines_scanned, 3);
        assert_eq!(lexer.metrics().lines_with_tokens, 2);
    }

    #[test]
    fn test_unrecognized_lines_yield_nothing() {
        assert!(categories(&["Console.WriteLine(x)", "   ", "Next"]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let source = [
            "Imports System",
            "Module Program",
            "Sub Main()",
            "Dim a As Integer",
            "a = 1",
            "End Sub",
            "End Module",
        ];

        let first = analyzer().tokenize_lines(&source);
        let second = analyzer().tokenize_lines(&source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_very_long_line_is_tokenized() {
        let line = format!("x = \"{}\"", "a".repeat(70_000));
        let tokens = analyzer().tokenize_lines(&[line.as_str()]);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get(0).unwrap().category(), TokenCategory::Assignment);
    }

    #[test]
    fn test_custom_rules() {
        let mut rules = RuleSet::empty();
        rules.register(r"^Next\b", TokenCategory::Other).unwrap();

        let mut lexer = LexicalAnalyzer::with_rules(rules, LexicalPreferences::default());
        let tokens = lexer.tokenize_lines(&["Next", "Module Program"]);

        assert_eq!(tokens.len(), 1);
        assert_eq!(lexer.metrics().count_of(TokenCategory::Other), 1);
    }

    #[test]
    fn test_error_codes() {
        let mut rules = RuleSet::empty();
        let error = rules.register(r"^(Next", TokenCategory::Other).unwrap_err();

        assert_matches!(error, LexerError::InvalidPattern { ref pattern, .. } if pattern == "^(Next");
        assert_eq!(error.error_code(), codes::lexical::INVALID_PATTERN);
    }
}
