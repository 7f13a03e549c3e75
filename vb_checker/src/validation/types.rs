//! Validation outcome shared by the module scan and the main pass

use super::error::{Violation, ViolationStatistics};
use crate::diagnostics::Diagnostics;
use crate::log_debug;
use crate::statistics::Statistics;

/// Statistics and diagnostics produced by one validation run
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub statistics: Statistics,
    pub diagnostics: Diagnostics,
    pub violations: ViolationStatistics,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a 1-based line
    pub(crate) fn record(&mut self, line: usize, violation: Violation) {
        log_debug!("Structural violation",
            "line" => line,
            "code" => violation.error_code(),
            "type" => violation.error_type(),
            "category" => violation.category().as_str()
        );

        self.violations.record(&violation);
        self.diagnostics
            .report(line, violation.error_code(), violation.to_string());
    }

    /// True when no diagnostic was recorded
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_record_keeps_message_and_code() {
        let mut outcome = ValidationOutcome::new();
        outcome.record(3, Violation::MalformedDim);

        let diagnostic = outcome.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.line, 3);
        assert_eq!(diagnostic.code, codes::shape::MALFORMED_DIM);
        assert_eq!(diagnostic.message, Violation::MalformedDim.to_string());
        assert_eq!(outcome.violations.shape_count, 1);
        assert!(!outcome.is_clean());
    }
}
