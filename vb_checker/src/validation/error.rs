//! Structural findings reported by the validator
//!
//! A [`Violation`] is not a Rust error: it never aborts the pass. Its
//! `Display` text is exactly the message shown in the report.

use crate::logging::codes;
use std::fmt;
use thiserror::Error;

/// Kind of construct left open at end of stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenBlock {
    SubMain,
    Try,
    Catch,
    While,
}

impl OpenBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubMain => "Sub Main",
            Self::Try => "Try",
            Self::Catch => "Catch",
            Self::While => "While",
        }
    }
}

impl fmt::Display for OpenBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violation taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViolationCategory {
    /// Token in a position the module layout forbids
    Order,
    /// Closing construct without an open, or open never closed
    Pairing,
    /// Recognized keyword whose text does not fit its sub-grammar
    Shape,
    /// Construct that must appear exactly once
    Cardinality,
}

impl ViolationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "Order",
            Self::Pairing => "Pairing",
            Self::Shape => "Shape",
            Self::Cardinality => "Cardinality",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Invalid token found before 'Module Program'. Only 'Imports' and comments are allowed.")]
    TokenBeforeModule,

    #[error("'End Module' found before 'Module Program'.")]
    EndModuleBeforeModule,

    #[error("Invalid token found after 'End Module'. Only comments are allowed.")]
    TokenAfterEndModule,

    #[error("Duplicate 'Module Program' declaration.")]
    DuplicateModuleOpen,

    #[error("Duplicate 'End Module' declaration.")]
    DuplicateModuleClose,

    #[error("'Module Program' declaration is missing.")]
    MissingModuleOpen,

    #[error("'End Module' declaration is missing.")]
    MissingModuleClose,

    #[error("'Dim' declared before 'Module Program'.")]
    DimBeforeModule,

    #[error("'Imports' must precede 'Module Program'.")]
    ImportAfterModule,

    #[error("Malformed Dim statement. Expected 'Dim <identifier> As <type>'.")]
    MalformedDim,

    #[error("Malformed Sub Main declaration.")]
    MalformedSubMain,

    #[error("Malformed Catch clause. Expected 'Catch <identifier> As Exception'.")]
    MalformedCatch,

    #[error("'End Sub' without matching 'Sub Main'.")]
    EndSubWithoutSub,

    #[error("'Catch' without preceding 'Try'.")]
    CatchWithoutTry,

    #[error("'End Try' without Try/Catch.")]
    EndTryWithoutCatch,

    #[error("'End While' without matching 'While'.")]
    EndWhileWithoutWhile,

    #[error("Unclosed '{block}'.")]
    Unclosed { block: OpenBlock },
}

impl Violation {
    pub fn category(&self) -> ViolationCategory {
        match self {
            Self::TokenBeforeModule
            | Self::EndModuleBeforeModule
            | Self::TokenAfterEndModule
            | Self::DimBeforeModule
            | Self::ImportAfterModule => ViolationCategory::Order,
            Self::DuplicateModuleOpen
            | Self::DuplicateModuleClose
            | Self::MissingModuleOpen
            | Self::MissingModuleClose => ViolationCategory::Cardinality,
            Self::MalformedDim | Self::MalformedSubMain | Self::MalformedCatch => {
                ViolationCategory::Shape
            }
            Self::EndSubWithoutSub
            | Self::CatchWithoutTry
            | Self::EndTryWithoutCatch
            | Self::EndWhileWithoutWhile
            | Self::Unclosed { .. } => ViolationCategory::Pairing,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::TokenBeforeModule => codes::order::TOKEN_BEFORE_MODULE,
            Self::EndModuleBeforeModule => codes::order::END_MODULE_BEFORE_MODULE,
            Self::TokenAfterEndModule => codes::order::TOKEN_AFTER_END_MODULE,
            Self::DimBeforeModule => codes::order::DIM_BEFORE_MODULE,
            Self::ImportAfterModule => codes::order::IMPORT_AFTER_MODULE,
            Self::DuplicateModuleOpen => codes::cardinality::DUPLICATE_MODULE_OPEN,
            Self::DuplicateModuleClose => codes::cardinality::DUPLICATE_MODULE_CLOSE,
            Self::MissingModuleOpen => codes::cardinality::MISSING_MODULE_OPEN,
            Self::MissingModuleClose => codes::cardinality::MISSING_MODULE_CLOSE,
            Self::MalformedDim => codes::shape::MALFORMED_DIM,
            Self::MalformedSubMain => codes::shape::MALFORMED_SUB_MAIN,
            Self::MalformedCatch => codes::shape::MALFORMED_CATCH,
            Self::EndSubWithoutSub => codes::pairing::END_SUB_WITHOUT_SUB,
            Self::CatchWithoutTry => codes::pairing::CATCH_WITHOUT_TRY,
            Self::EndTryWithoutCatch => codes::pairing::END_TRY_WITHOUT_CATCH,
            Self::EndWhileWithoutWhile => codes::pairing::END_WHILE_WITHOUT_WHILE,
            Self::Unclosed { .. } => codes::pairing::UNCLOSED_BLOCK,
        }
    }

    /// Short variant name for log context
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::TokenBeforeModule => "TokenBeforeModule",
            Self::EndModuleBeforeModule => "EndModuleBeforeModule",
            Self::TokenAfterEndModule => "TokenAfterEndModule",
            Self::DuplicateModuleOpen => "DuplicateModuleOpen",
            Self::DuplicateModuleClose => "DuplicateModuleClose",
            Self::MissingModuleOpen => "MissingModuleOpen",
            Self::MissingModuleClose => "MissingModuleClose",
            Self::DimBeforeModule => "DimBeforeModule",
            Self::ImportAfterModule => "ImportAfterModule",
            Self::MalformedDim => "MalformedDim",
            Self::MalformedSubMain => "MalformedSubMain",
            Self::MalformedCatch => "MalformedCatch",
            Self::EndSubWithoutSub => "EndSubWithoutSub",
            Self::CatchWithoutTry => "CatchWithoutTry",
            Self::EndTryWithoutCatch => "EndTryWithoutCatch",
            Self::EndWhileWithoutWhile => "EndWhileWithoutWhile",
            Self::Unclosed { .. } => "Unclosed",
        }
    }
}

/// Failure to set up the validator. Findings never produce this.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid shape pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl ValidationError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::InvalidPattern { .. } => codes::validation::INVALID_SHAPE_PATTERN,
        }
    }
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Per-category counts for a set of violations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViolationStatistics {
    pub total_count: usize,
    pub order_count: usize,
    pub pairing_count: usize,
    pub shape_count: usize,
    pub cardinality_count: usize,
}

impl ViolationStatistics {
    pub fn record(&mut self, violation: &Violation) {
        self.total_count += 1;
        match violation.category() {
            ViolationCategory::Order => self.order_count += 1,
            ViolationCategory::Pairing => self.pairing_count += 1,
            ViolationCategory::Shape => self.shape_count += 1,
            ViolationCategory::Cardinality => self.cardinality_count += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Order: {}, Pairing: {}, Shape: {}, Cardinality: {}",
            self.total_count,
            self.order_count,
            self.pairing_count,
            self.shape_count,
            self.cardinality_count
        )
    }
}
