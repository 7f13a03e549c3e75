//! Lexical analysis module with FileProcessingResult integration
//!
//! Turns source lines into a [`TokenSequence`] using an ordered list of
//! recognition rules. Unrecognized text produces no token.

pub mod analyzer;
pub mod rules;

use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::tokens::TokenSequence;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use rules::{Rule, RuleSet};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize a processed file with default preferences
pub fn tokenize_file_result(file_result: &FileProcessingResult) -> Result<TokenSequence, LexerError> {
    Ok(LexicalAnalyzer::new()?.tokenize_file_result(file_result))
}

/// Tokenize a processed file with custom runtime preferences
pub fn tokenize_file_result_with_preferences(
    file_result: &FileProcessingResult,
    preferences: LexicalPreferences,
) -> Result<TokenSequence, LexerError> {
    Ok(LexicalAnalyzer::with_preferences(preferences)?.tokenize_file_result(file_result))
}

/// Tokenize in-memory text, splitting on line terminators
pub fn tokenize_source(source: &str) -> Result<TokenSequence, LexerError> {
    let lines: Vec<&str> = source.lines().collect();
    Ok(LexicalAnalyzer::new()?.tokenize_lines(&lines))
}

// ============================================================================
// MODULE VALIDATION
// ============================================================================

/// Check that the standard rules compile and the lexical code is registered
pub fn validate_tokenization() -> Result<(), String> {
    let rules = RuleSet::standard().map_err(|e| e.to_string())?;
    if rules.is_empty() {
        return Err("Standard rule set is empty".to_string());
    }

    let code = crate::logging::codes::lexical::INVALID_PATTERN;
    if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
        return Err(format!(
            "Lexical error code {} not found in metadata registry",
            code.as_str()
        ));
    }

    Ok(())
}
