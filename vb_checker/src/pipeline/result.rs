use crate::diagnostics::Diagnostics;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::statistics::Statistics;
use crate::summary::ConsistencyFinding;
use crate::validation::ValidationOutcome;
use std::path::PathBuf;
use std::time::Duration;

/// Complete result of checking one file
#[derive(Debug)]
pub struct PipelineResult {
    pub file_metadata: FileMetadata,
    pub lines: Vec<String>,
    pub lexical_metrics: LexicalMetrics,
    pub token_count: usize,
    pub outcome: ValidationOutcome,
    pub findings: Vec<ConsistencyFinding>,
    /// Set once the report has been written
    pub report_path: Option<PathBuf>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn statistics(&self) -> &Statistics {
        &self.outcome.statistics
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.outcome.diagnostics
    }

    /// Per-line diagnostics plus summary findings
    pub fn error_count(&self) -> usize {
        self.outcome.diagnostic_count() + self.findings.len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn log_success(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let lines_per_sec = if seconds > 0.0 {
            self.lines.len() as f64 / seconds
        } else {
            0.0
        };

        crate::log_performance!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "VB structural check completed",
            duration = self.processing_duration,
            "file" => file_path,
            "lines" => self.lines.len(),
            "tokens" => self.token_count,
            "diagnostics" => self.outcome.diagnostic_count(),
            "findings" => self.findings.len(),
            "processing_rate_lines_per_sec" => format!("{:.0}", lines_per_sec)
        );
    }
}
