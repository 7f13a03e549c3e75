//! Sub-grammar checks for Dim, Catch and Sub Main token text

use super::error::ValidationError;
use regex::Regex;

const DIM_SHAPE: &str =
    r"(?i)^\s*Dim\s+[A-Za-z]\w*\s+As\s+(New\s+)?[A-Za-z][\w.]*(\(.*\))?(\s*=.*)?(\s*'.*)?\s*$";
const CATCH_SHAPE: &str = r"(?i)^\s*Catch\s+[A-Za-z]\w*\s+As\s+Exception(\s*'.*)?\s*$";
const SUB_MAIN_HEAD: &str = r"(?i)^\s*Sub\s+Main\s*\(";

/// Compiled shape patterns
#[derive(Debug, Clone)]
pub struct ShapeRules {
    dim: Regex,
    catch: Regex,
    sub_main_head: Regex,
}

impl ShapeRules {
    pub fn compile() -> Result<Self, ValidationError> {
        Ok(Self {
            dim: compile(DIM_SHAPE)?,
            catch: compile(CATCH_SHAPE)?,
            sub_main_head: compile(SUB_MAIN_HEAD)?,
        })
    }

    /// `Dim <identifier> As <type>`, optionally `New`, array suffix, initializer
    /// and a trailing `'` comment
    pub fn is_valid_dim(&self, text: &str) -> bool {
        self.dim.is_match(text)
    }

    /// `Catch <identifier> As Exception`, optionally followed by a `'` comment
    pub fn is_valid_catch(&self, text: &str) -> bool {
        self.catch.is_match(text)
    }

    /// `Sub Main(` followed by a balanced parameter list.
    ///
    /// The running parenthesis depth may never go negative. Once the opening
    /// parenthesis is closed only blanks or a trailing `'` comment may follow.
    pub fn is_valid_sub_main(&self, text: &str) -> bool {
        let Some(head) = self.sub_main_head.find(text) else {
            return false;
        };

        // The head match ends just past the opening parenthesis
        let params_start = head.end() - 1;
        let mut depth: usize = 0;

        for (offset, ch) in text[params_start..].char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    let Some(next) = depth.checked_sub(1) else {
                        return false;
                    };
                    depth = next;
                    if depth == 0 {
                        let rest = text[params_start + offset + 1..].trim_start();
                        return rest.is_empty() || rest.starts_with('\'');
                    }
                }
                _ => {}
            }
        }

        false
    }
}

fn compile(pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(pattern).map_err(|e| ValidationError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}
