//! Consolidated error codes and classification system
//!
//! Single source of truth for every code the checker emits, its metadata,
//! and the classification functions used by events and the pipeline.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
    pub const LINE_TOO_LONG: Code = Code::new("E014");
}

/// Tokenizer error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_PATTERN: Code = Code::new("E020");
}

/// Validator setup error codes
pub mod validation {
    use super::Code;

    pub const INVALID_SHAPE_PATTERN: Code = Code::new("E025");
}

/// Ordering violations around the module boundary
pub mod order {
    use super::Code;

    pub const TOKEN_BEFORE_MODULE: Code = Code::new("E030");
    pub const END_MODULE_BEFORE_MODULE: Code = Code::new("E031");
    pub const TOKEN_AFTER_END_MODULE: Code = Code::new("E032");
    pub const DIM_BEFORE_MODULE: Code = Code::new("E033");
    pub const IMPORT_AFTER_MODULE: Code = Code::new("E034");
}

/// Cardinality violations (missing or repeated module boundaries)
pub mod cardinality {
    use super::Code;

    pub const DUPLICATE_MODULE_OPEN: Code = Code::new("E040");
    pub const DUPLICATE_MODULE_CLOSE: Code = Code::new("E041");
    pub const MISSING_MODULE_OPEN: Code = Code::new("E042");
    pub const MISSING_MODULE_CLOSE: Code = Code::new("E043");
}

/// Statement shape violations
pub mod shape {
    use super::Code;

    pub const MALFORMED_DIM: Code = Code::new("E050");
    pub const MALFORMED_SUB_MAIN: Code = Code::new("E051");
    pub const MALFORMED_CATCH: Code = Code::new("E052");
}

/// Block pairing violations
pub mod pairing {
    use super::Code;

    pub const END_SUB_WITHOUT_SUB: Code = Code::new("E060");
    pub const CATCH_WITHOUT_TRY: Code = Code::new("E061");
    pub const END_TRY_WITHOUT_CATCH: Code = Code::new("E062");
    pub const END_WHILE_WITHOUT_WHILE: Code = Code::new("E063");
    pub const UNCLOSED_BLOCK: Code = Code::new("E064");
}

/// Counter consistency findings
pub mod summary {
    use super::Code;

    pub const COUNT_MISMATCH: Code = Code::new("E070");
    pub const MISSING_CONSTRUCT: Code = Code::new("E071");
    pub const DUPLICATE_CONSTRUCT: Code = Code::new("E072");
    pub const MISSING_CLOSE: Code = Code::new("E073");
    pub const MISSING_OPEN: Code = Code::new("E074");
}

/// Report output error codes
pub mod report {
    use super::Code;

    pub const REPORT_WRITE_FAILED: Code = Code::new("E080");
    pub const OUTPUT_SERIALIZATION_FAILED: Code = Code::new("E081");
}

/// Pipeline orchestration error codes
pub mod pipeline {
    use super::Code;

    pub const PIPELINE_FAILURE: Code = Code::new("E090");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const STRUCTURE_VALIDATION_COMPLETE: Code = Code::new("I030");
    pub const SUMMARY_CHECK_COMPLETE: Code = Code::new("I031");
    pub const REPORT_WRITTEN: Code = Code::new("I080");
    pub const PIPELINE_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Something wrong in the checked source. Reported, never halts the run.
const fn finding(
    code: &'static str,
    category: &'static str,
    severity: Severity,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata::new(code, category, severity, true, false, description, recommended_action)
}

/// The run cannot produce a report
const fn fatal(
    code: &'static str,
    category: &'static str,
    severity: Severity,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata::new(code, category, severity, false, true, description, recommended_action)
}

const fn milestone(code: &'static str, description: &'static str) -> ErrorMetadata {
    ErrorMetadata::new(code, "Success", Severity::Low, true, false, description, "None")
}

use Severity::{Critical, High, Low, Medium};

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    // System
    fatal("ERR001", "System", Critical, "Internal checker error", "File a bug report with the input"),
    fatal("ERR002", "System", Critical, "Logging could not start", "Check logging preferences"),
    fatal(
        "ERR003",
        "System",
        High,
        "Runtime configuration could not be loaded",
        "Fix the file named by VBC_RUNTIME_CONFIG or unset it",
    ),
    // File processing
    fatal("E005", "FileProcessing", High, "Input file not found", "Check the path argument"),
    fatal(
        "E006",
        "FileProcessing",
        Medium,
        "Input file does not have the .vb extension",
        "Rename the file or unset VBC_REQUIRE_VB_EXTENSION",
    ),
    fatal(
        "E007",
        "FileProcessing",
        High,
        "Input file exceeds the configured size limit",
        "Split the source or raise max_file_size in the build profile",
    ),
    fatal("E009", "FileProcessing", High, "Permission denied on input", "Check file permissions"),
    fatal("E010", "FileProcessing", High, "Input is not valid UTF-8", "Re-encode the source"),
    fatal("E011", "FileProcessing", High, "I/O error reading input", "Retry the run"),
    fatal("E012", "FileProcessing", Medium, "Input is not a regular file", "Pass a source file"),
    fatal(
        "E013",
        "FileProcessing",
        High,
        "Input file exceeds the configured line limit",
        "Split the source or raise max_line_count in the build profile",
    ),
    fatal(
        "E014",
        "FileProcessing",
        High,
        "Input line exceeds the configured length limit",
        "Break the line or raise max_line_length in the build profile",
    ),
    // Lexical
    fatal("E020", "Lexical", Critical, "Recognition pattern rejected", "Fix the rule pattern"),
    // Validator setup
    fatal("E025", "Validation", Critical, "Shape pattern rejected", "Fix the shape pattern"),
    // Order
    finding("E030", "Order", Medium, "Statement before 'Module Program'", "Move it inside"),
    finding("E031", "Order", Medium, "'End Module' before 'Module Program'", "Open first"),
    finding("E032", "Order", Medium, "Statement after 'End Module'", "Move it inside"),
    finding("E033", "Order", Medium, "'Dim' outside the module", "Declare inside the module"),
    finding("E034", "Order", Medium, "'Imports' after 'Module Program'", "Move imports up"),
    // Cardinality
    finding("E040", "Cardinality", Medium, "Repeated 'Module Program'", "Keep one module"),
    finding("E041", "Cardinality", Medium, "Repeated 'End Module'", "Keep one terminator"),
    finding("E042", "Cardinality", High, "'Module Program' is missing", "Open the module"),
    finding("E043", "Cardinality", High, "'End Module' is missing", "Close the module"),
    // Shape
    finding("E050", "Shape", Low, "Malformed Dim", "Use 'Dim <identifier> As <type>'"),
    finding("E051", "Shape", Low, "Malformed Sub Main", "Balance the parameter parentheses"),
    finding("E052", "Shape", Low, "Malformed Catch", "Use 'Catch <identifier> As Exception'"),
    // Pairing
    finding("E060", "Pairing", Medium, "'End Sub' with no open routine", "Remove or open it"),
    finding("E061", "Pairing", Medium, "'Catch' with no open 'Try'", "Open a 'Try' first"),
    finding("E062", "Pairing", Medium, "'End Try' with no 'Catch'", "Add a 'Catch' clause"),
    finding("E063", "Pairing", Medium, "'End While' with no open loop", "Remove or open it"),
    finding("E064", "Pairing", Medium, "Block open at end of file", "Add the terminator"),
    // Summary
    finding("E070", "Summary", Medium, "Opening and closing counts differ", "Pair them up"),
    finding("E071", "Summary", High, "Required construct never appears", "Add it"),
    finding("E072", "Summary", Medium, "Construct appears more than once", "Keep one"),
    finding("E073", "Summary", Medium, "More openings than terminators", "Add a terminator"),
    finding("E074", "Summary", Medium, "More terminators than openings", "Add an opening"),
    // Report
    fatal("E080", "Report", High, "Report could not be written", "Check directory permissions"),
    fatal("E081", "Report", Medium, "JSON output could not be serialized", "File a bug report"),
    // Pipeline
    fatal("E090", "Pipeline", High, "Pipeline failure", "Check preceding log events"),
    // Success
    milestone("I001", "Operation completed successfully"),
    milestone("I004", "Logging system initialized"),
    milestone("I006", "Source file read"),
    milestone("I020", "Tokenization completed"),
    milestone("I030", "Structural validation completed"),
    milestone("I031", "Summary consistency checks completed"),
    milestone("I080", "Report written"),
    milestone("I090", "Pipeline completed"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| REGISTRY_ENTRIES.iter().map(|m| (m.code, m)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    registry().get(code).copied()
}

/// Unregistered codes classify as medium severity
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code).map_or(Severity::Medium, |m| m.severity)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code).map_or(true, |m| m.recoverable)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code).is_some_and(|m| m.requires_halt)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown error", |m| m.description)
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code).map_or("No specific action available", |m| m.recommended_action)
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown", |m| m.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_codes_are_unique() {
        let mut seen = HashSet::new();
        for entry in REGISTRY_ENTRIES {
            assert!(seen.insert(entry.code), "duplicate code {}", entry.code);
        }
    }

    #[test]
    fn test_violation_codes_never_halt() {
        for code in [
            order::TOKEN_BEFORE_MODULE,
            cardinality::MISSING_MODULE_CLOSE,
            shape::MALFORMED_DIM,
            pairing::UNCLOSED_BLOCK,
            summary::COUNT_MISMATCH,
        ] {
            assert!(is_recoverable(code.as_str()));
            assert!(!requires_halt(code.as_str()));
        }
    }

    #[test]
    fn test_read_failures_halt() {
        assert!(requires_halt(file_processing::FILE_NOT_FOUND.as_str()));
        assert_eq!(get_category("E005"), "FileProcessing");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert!(get_error_metadata("Z999").is_none());
        assert!(!requires_halt("Z999"));
    }

    #[test]
    fn test_every_constant_is_registered() {
        for code in [
            system::CONFIGURATION_ERROR,
            file_processing::LINE_TOO_LONG,
            lexical::INVALID_PATTERN,
            validation::INVALID_SHAPE_PATTERN,
            order::IMPORT_AFTER_MODULE,
            pairing::END_TRY_WITHOUT_CATCH,
            summary::MISSING_OPEN,
            report::OUTPUT_SERIALIZATION_FAILED,
            success::SUMMARY_CHECK_COMPLETE,
        ] {
            assert!(get_error_metadata(code.as_str()).is_some(), "{}", code);
        }
    }
}
