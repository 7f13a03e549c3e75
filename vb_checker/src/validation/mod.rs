//! Structural validation of the token sequence
//!
//! Runs the module-boundary scan, then the main pass with its end-of-stream
//! checks. Findings are collected as diagnostics and never stop the walk.

pub mod error;
pub mod module_scan;
mod pass;
pub mod shape;
pub mod types;

pub use error::{OpenBlock, ValidationError, Violation, ViolationCategory, ViolationStatistics};
pub use module_scan::{scan_module_boundaries, ModuleBounds};
pub use shape::ShapeRules;
pub use types::ValidationOutcome;

use crate::config::runtime::ValidationPreferences;
use crate::logging::codes;
use crate::tokens::TokenSequence;
use crate::{log_debug, log_info, log_success};
use pass::MainPass;
use std::time::Instant;

/// Validator over a token sequence
#[derive(Debug, Clone)]
pub struct StructuralValidator {
    shapes: ShapeRules,
    preferences: ValidationPreferences,
}

impl StructuralValidator {
    pub fn new() -> Result<Self, ValidationError> {
        Self::with_preferences(ValidationPreferences::default())
    }

    pub fn with_preferences(preferences: ValidationPreferences) -> Result<Self, ValidationError> {
        Ok(Self {
            shapes: ShapeRules::compile()?,
            preferences,
        })
    }

    pub fn preferences(&self) -> &ValidationPreferences {
        &self.preferences
    }

    /// Validate a complete token sequence
    pub fn validate(&self, tokens: &TokenSequence) -> ValidationOutcome {
        let start_time = Instant::now();
        let mut outcome = ValidationOutcome::new();

        log_info!("Starting structural validation", "tokens" => tokens.len());

        let bounds = scan_module_boundaries(tokens, &mut outcome);
        log_debug!("Module scan findings", "count" => outcome.diagnostic_count());

        MainPass::run(tokens, &self.shapes, self.preferences.trace_tokens, &mut outcome);

        log_success!(codes::success::STRUCTURE_VALIDATION_COMPLETE,
            "Structural validation completed",
            "tokens" => tokens.len(),
            "diagnostics" => outcome.diagnostic_count(),
            "module_start" => bounds.start.map_or_else(|| "none".to_string(), |l| l.to_string()),
            "breakdown" => outcome.violations.summary(),
            "duration_ms" => format!("{:.3}", start_time.elapsed().as_secs_f64() * 1000.0)
        );

        outcome
    }
}

/// Validate with default preferences
pub fn validate_tokens(tokens: &TokenSequence) -> Result<ValidationOutcome, ValidationError> {
    Ok(StructuralValidator::new()?.validate(tokens))
}
