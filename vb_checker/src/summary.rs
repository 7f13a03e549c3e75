//! Counter-based consistency checks run after validation
//!
//! These findings come from counter arithmetic alone. They often repeat what
//! the per-token diagnostics already located, and both are reported.

use crate::logging::{codes, Code};
use crate::statistics::Statistics;
use crate::{log_debug, log_success};
use serde::Serialize;
use std::fmt;

/// Paired constructs checked by count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Construct {
    Module,
    Sub,
    Try,
    While,
}

impl Construct {
    pub const ALL: [Construct; 4] = [Self::Module, Self::Sub, Self::Try, Self::While];

    pub fn opener(&self) -> &'static str {
        match self {
            Self::Module => "Module Program",
            Self::Sub => "Sub Main",
            Self::Try => "Try",
            Self::While => "While",
        }
    }

    pub fn closer(&self) -> &'static str {
        match self {
            Self::Module => "End Module",
            Self::Sub => "End Sub",
            Self::Try => "End Try",
            Self::While => "End While",
        }
    }

    /// Module and Sub must occur exactly once
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::Module | Self::Sub)
    }

    pub fn counts(&self, stats: &Statistics) -> (usize, usize) {
        match self {
            Self::Module => (stats.module_open, stats.module_close),
            Self::Sub => (stats.sub_open, stats.sub_close),
            Self::Try => (stats.try_open, stats.try_close),
            Self::While => (stats.while_open, stats.while_close),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingKind {
    /// Singular construct never opened
    Absent,
    /// Singular construct opened more than once
    Duplicate,
    Mismatch,
    MissingClose,
    MissingOpen,
}

/// One counter-derived finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyFinding {
    pub construct: Construct,
    pub kind: FindingKind,
}

impl ConsistencyFinding {
    pub fn code(&self) -> Code {
        match self.kind {
            FindingKind::Absent => codes::summary::MISSING_CONSTRUCT,
            FindingKind::Duplicate => codes::summary::DUPLICATE_CONSTRUCT,
            FindingKind::Mismatch => codes::summary::COUNT_MISMATCH,
            FindingKind::MissingClose => codes::summary::MISSING_CLOSE,
            FindingKind::MissingOpen => codes::summary::MISSING_OPEN,
        }
    }

    pub fn message(&self) -> String {
        let open = self.construct.opener();
        let close = self.construct.closer();
        match self.kind {
            FindingKind::Absent => format!("No '{}' declaration found.", open),
            FindingKind::Duplicate => format!("Multiple '{}' declarations found.", open),
            FindingKind::Mismatch => {
                format!("Mismatch between '{}' and '{}' counts.", open, close)
            }
            FindingKind::MissingClose => format!("Missing '{}'.", close),
            FindingKind::MissingOpen => format!("Missing '{}'.", open),
        }
    }
}

impl fmt::Display for ConsistencyFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Derive findings for every construct, in construct order
pub fn check_consistency(stats: &Statistics) -> Vec<ConsistencyFinding> {
    let mut findings = Vec::new();

    for construct in Construct::ALL {
        let (open, close) = construct.counts(stats);
        let mut push = |kind| findings.push(ConsistencyFinding { construct, kind });

        if construct.is_singular() {
            if open == 0 {
                push(FindingKind::Absent);
            } else if open > 1 {
                push(FindingKind::Duplicate);
            }
        }

        if open != close {
            push(FindingKind::Mismatch);
        }

        if open > close {
            push(FindingKind::MissingClose);
        } else if open < close {
            push(FindingKind::MissingOpen);
        }

        log_debug!("Consistency checked",
            "construct" => construct.opener(),
            "open" => open,
            "close" => close
        );
    }

    log_success!(codes::success::SUMMARY_CHECK_COMPLETE,
        "Summary consistency check completed",
        "findings" => findings.len()
    );

    findings
}
