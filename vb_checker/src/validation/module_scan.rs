//! Module-boundary scan
//!
//! Runs over the whole token sequence before the main pass. Each token is put
//! through every check independently, so one token may yield several
//! findings (a `Module Program` after `End Module` is both out of place and a
//! duplicate).

use super::error::Violation;
use super::types::ValidationOutcome;
use crate::log_debug;
use crate::tokens::{TokenCategory, TokenSequence};

/// Lines of the first module open and close tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleBounds {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

pub fn scan_module_boundaries(tokens: &TokenSequence, outcome: &mut ValidationOutcome) -> ModuleBounds {
    let mut bounds = ModuleBounds::default();

    for token in tokens {
        let category = token.category();
        let line = token.line();

        if bounds.end.is_some() && !category.allowed_after_module() {
            outcome.record(line, Violation::TokenAfterEndModule);
        }

        match category {
            TokenCategory::ModuleOpen if bounds.start.is_some() => {
                outcome.record(line, Violation::DuplicateModuleOpen);
            }
            TokenCategory::ModuleOpen => bounds.start = Some(line),
            TokenCategory::ModuleClose if bounds.end.is_some() => {
                outcome.record(line, Violation::DuplicateModuleClose);
            }
            TokenCategory::ModuleClose => bounds.end = Some(line),
            _ => {}
        }

        if bounds.start.is_none() && !category.allowed_before_module() {
            let violation = if category == TokenCategory::ModuleClose {
                Violation::EndModuleBeforeModule
            } else {
                Violation::TokenBeforeModule
            };
            outcome.record(line, violation);
        }
    }

    if bounds.start.is_none() {
        outcome.record(1, Violation::MissingModuleOpen);
    }
    if bounds.end.is_none() {
        outcome.record(1, Violation::MissingModuleClose);
    }

    log_debug!("Module boundary scan finished",
        "start" => format!("{:?}", bounds.start),
        "end" => format!("{:?}", bounds.end)
    );

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_source;

    fn scan(source: &str) -> (ModuleBounds, Vec<(usize, String)>) {
        let tokens = tokenize_source(source).unwrap();
        let mut outcome = ValidationOutcome::new();
        let bounds = scan_module_boundaries(&tokens, &mut outcome);
        let found = outcome
            .diagnostics
            .iter()
            .map(|d| (d.line, d.message.clone()))
            .collect();
        (bounds, found)
    }

    #[test]
    fn test_well_formed_module() {
        let (bounds, found) = scan("Imports System\n' header\nModule Program\nEnd Module\n' trailer");
        assert_eq!(bounds.start, Some(3));
        assert_eq!(bounds.end, Some(4));
        assert!(found.is_empty());
    }

    #[test]
    fn test_token_before_module() {
        let (_, found) = scan("x = 1\nModule Program\nEnd Module");
        assert_eq!(found, vec![(1, Violation::TokenBeforeModule.to_string())]);
    }

    #[test]
    fn test_end_module_before_module() {
        let (_, found) = scan("End Module\nModule Program");
        assert_eq!(
            found,
            vec![
                (1, Violation::EndModuleBeforeModule.to_string()),
                (2, Violation::TokenAfterEndModule.to_string()),
            ]
        );
    }

    #[test]
    fn test_after_end_module_and_duplicates() {
        let (_, found) = scan("Module Program\nEnd Module\n' ok\nEnd Module\nDim x As Integer");
        assert_eq!(
            found,
            vec![
                (4, Violation::TokenAfterEndModule.to_string()),
                (4, Violation::DuplicateModuleClose.to_string()),
                (5, Violation::TokenAfterEndModule.to_string()),
            ]
        );
    }

    #[test]
    fn test_second_module_program() {
        let (bounds, found) = scan("Module Program\nModule Program\nEnd Module");
        assert_eq!(bounds.start, Some(1));
        assert_eq!(found, vec![(2, Violation::DuplicateModuleOpen.to_string())]);
    }

    #[test]
    fn test_missing_both_reported_at_line_one() {
        let (bounds, found) = scan("' only a comment");
        assert_eq!(bounds, ModuleBounds::default());
        assert_eq!(
            found,
            vec![
                (1, Violation::MissingModuleOpen.to_string()),
                (1, Violation::MissingModuleClose.to_string()),
            ]
        );
    }
}
