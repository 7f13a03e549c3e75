//! Main validation pass
//!
//! One forward walk over the tokens. Each category updates its counter and
//! may push or pop one of three stacks. Whatever is left on a stack after the
//! last token is reported once, at the line of the top entry.

use super::error::{OpenBlock, Violation};
use super::shape::ShapeRules;
use super::types::ValidationOutcome;
use crate::log_debug;
use crate::tokens::{Token, TokenCategory, TokenSequence};

/// Entry on the try/catch stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    Try,
    Catch,
}

/// Stack state for one walk. Never outlives [`MainPass::run`].
#[derive(Debug, Default)]
pub(crate) struct MainPass {
    subs: Vec<usize>,
    handlers: Vec<(Handler, usize)>,
    loops: Vec<usize>,
}

impl MainPass {
    pub(crate) fn run(
        tokens: &TokenSequence,
        shapes: &ShapeRules,
        trace_tokens: bool,
        outcome: &mut ValidationOutcome,
    ) {
        let mut pass = Self::default();

        for token in tokens {
            if trace_tokens {
                log_debug!("Visiting token",
                    at = token.position(),
                    "category" => token.category(),
                    "sub_depth" => pass.subs.len(),
                    "handler_depth" => pass.handlers.len(),
                    "while_depth" => pass.loops.len()
                );
            }
            pass.visit(token, shapes, outcome);
        }

        pass.finish(outcome);
    }

    fn visit(&mut self, token: &Token, shapes: &ShapeRules, outcome: &mut ValidationOutcome) {
        let line = token.line();
        let stats = &mut outcome.statistics;

        match token.category() {
            TokenCategory::Comment => stats.comments += 1,

            TokenCategory::DimDeclaration => {
                stats.dim_declarations += 1;
                let outside_module = stats.module_open < 1;
                if outside_module {
                    outcome.record(line, Violation::DimBeforeModule);
                }
                if !shapes.is_valid_dim(token.text()) {
                    outcome.record(line, Violation::MalformedDim);
                }
            }

            TokenCategory::ModuleOpen => stats.module_open += 1,
            TokenCategory::ModuleClose => stats.module_close += 1,

            TokenCategory::Import => {
                stats.imports += 1;
                let inside_module = stats.module_open >= 1;
                if inside_module {
                    outcome.record(line, Violation::ImportAfterModule);
                }
            }

            TokenCategory::SubMainOpen => {
                stats.sub_open += 1;
                self.subs.push(line);
                if !shapes.is_valid_sub_main(token.text()) {
                    outcome.record(line, Violation::MalformedSubMain);
                }
            }

            TokenCategory::SubClose => {
                stats.sub_close += 1;
                if self.subs.pop().is_none() {
                    outcome.record(line, Violation::EndSubWithoutSub);
                }
            }

            TokenCategory::TryOpen => {
                stats.try_open += 1;
                self.handlers.push((Handler::Try, line));
            }

            TokenCategory::Catch => {
                stats.catch += 1;
                if !shapes.is_valid_catch(token.text()) {
                    outcome.record(line, Violation::MalformedCatch);
                }
                match self.handlers.last() {
                    Some((Handler::Try, _)) => {
                        self.handlers.pop();
                        self.handlers.push((Handler::Catch, line));
                    }
                    _ => outcome.record(line, Violation::CatchWithoutTry),
                }
            }

            TokenCategory::TryEnd => {
                stats.try_close += 1;
                match self.handlers.last() {
                    Some((Handler::Catch, _)) => {
                        self.handlers.pop();
                    }
                    _ => outcome.record(line, Violation::EndTryWithoutCatch),
                }
            }

            TokenCategory::While => {
                stats.while_open += 1;
                self.loops.push(line);
            }

            TokenCategory::WhileEnd => {
                stats.while_close += 1;
                if self.loops.pop().is_none() {
                    outcome.record(line, Violation::EndWhileWithoutWhile);
                }
            }

            TokenCategory::StringLiteral | TokenCategory::Assignment | TokenCategory::Other => {}
        }
    }

    fn finish(self, outcome: &mut ValidationOutcome) {
        if let Some(&line) = self.subs.last() {
            outcome.record(line, Violation::Unclosed { block: OpenBlock::SubMain });
        }

        if let Some(&(handler, line)) = self.handlers.last() {
            let block = match handler {
                Handler::Try => OpenBlock::Try,
                Handler::Catch => OpenBlock::Catch,
            };
            outcome.record(line, Violation::Unclosed { block });
        }

        if let Some(&line) = self.loops.last() {
            outcome.record(line, Violation::Unclosed { block: OpenBlock::While });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_source;

    fn run(source: &str) -> ValidationOutcome {
        let tokens = tokenize_source(source).unwrap();
        let shapes = ShapeRules::compile().unwrap();
        let mut outcome = ValidationOutcome::new();
        MainPass::run(&tokens, &shapes, false, &mut outcome);
        outcome
    }

    fn found(outcome: &ValidationOutcome) -> Vec<(usize, String)> {
        outcome
            .diagnostics
            .iter()
            .map(|d| (d.line, d.message.clone()))
            .collect()
    }

    #[test]
    fn test_balanced_blocks_have_no_pairing_findings() {
        let outcome = run(concat!(
            "Module Program\n",
            "Sub Main()\n",
            "Try\n",
            "While x\n",
            "While y\n",
            "End While\n",
            "End While\n",
            "Catch ex As Exception\n",
            "End Try\n",
            "End Sub\n",
            "End Module\n",
        ));

        assert!(outcome.is_clean(), "{:?}", found(&outcome));
        assert_eq!(outcome.statistics.while_open, 2);
        assert_eq!(outcome.statistics.while_close, 2);
        assert_eq!(outcome.statistics.catch, 1);
    }

    #[test]
    fn test_unclosed_try_reported_once_at_try_line() {
        let outcome = run("Module Program\nSub Main()\nTry\nx = 1\nEnd Sub\nEnd Module");
        assert_eq!(
            found(&outcome),
            vec![(3, Violation::Unclosed { block: OpenBlock::Try }.to_string())]
        );
    }

    #[test]
    fn test_unclosed_catch_names_catch() {
        let outcome = run("Try\nCatch ex As Exception");
        assert_eq!(
            found(&outcome),
            vec![(2, "Unclosed 'Catch'.".to_string())]
        );
    }

    #[test]
    fn test_catch_before_try_does_not_corrupt_later_block() {
        let outcome = run(concat!(
            "Catch ex As Exception\n",
            "Try\n",
            "Catch ex As Exception\n",
            "End Try\n",
        ));

        assert_eq!(
            found(&outcome),
            vec![(1, Violation::CatchWithoutTry.to_string())]
        );
        assert_eq!(outcome.statistics.try_open, 1);
        assert_eq!(outcome.statistics.catch, 2);
        assert_eq!(outcome.statistics.try_close, 1);
    }

    #[test]
    fn test_end_try_without_catch() {
        let outcome = run("Try\nEnd Try");
        assert_eq!(
            found(&outcome),
            vec![
                (2, Violation::EndTryWithoutCatch.to_string()),
                (1, Violation::Unclosed { block: OpenBlock::Try }.to_string()),
            ]
        );
    }

    #[test]
    fn test_stray_closers() {
        let outcome = run("End Sub\nEnd While");
        assert_eq!(
            found(&outcome),
            vec![
                (1, Violation::EndSubWithoutSub.to_string()),
                (2, Violation::EndWhileWithoutWhile.to_string()),
            ]
        );
    }

    #[test]
    fn test_dim_and_import_ordering() {
        let outcome = run("Dim a As Integer\nModule Program\nImports System\nDim 1x As String");
        assert_eq!(
            found(&outcome),
            vec![
                (1, Violation::DimBeforeModule.to_string()),
                (3, Violation::ImportAfterModule.to_string()),
                (4, Violation::MalformedDim.to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_sub_main_still_pushed() {
        let outcome = run("Sub Main(\nEnd Sub");
        assert_eq!(
            found(&outcome),
            vec![(1, Violation::MalformedSubMain.to_string())]
        );
    }

    #[test]
    fn test_unclosed_uses_innermost_line() {
        let outcome = run("While a\nWhile b\n");
        assert_eq!(
            found(&outcome),
            vec![(2, Violation::Unclosed { block: OpenBlock::While }.to_string())]
        );
    }
}
