use super::{PipelineError, PipelineResult};
use crate::diagnostics::Diagnostic;
use crate::statistics::Statistics;
use crate::summary::ConsistencyFinding;
use serde::Serialize;

/// Machine-readable view of a pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    pub file: String,
    pub line_count: usize,
    pub token_count: usize,
    pub statistics: Statistics,
    pub diagnostics: Vec<Diagnostic>,
    pub findings: Vec<FindingOutput>,
    pub report_path: Option<String>,
    pub has_errors: bool,
}

/// Summary finding with its rendered message
#[derive(Debug, Serialize)]
pub struct FindingOutput {
    #[serde(flatten)]
    pub finding: ConsistencyFinding,
    pub code: crate::logging::Code,
    pub message: String,
}

impl PipelineOutput {
    pub fn from_result(result: &PipelineResult) -> Self {
        Self {
            file: result.file_metadata.path.display().to_string(),
            line_count: result.lines.len(),
            token_count: result.token_count,
            statistics: *result.statistics(),
            diagnostics: result.diagnostics().iter().cloned().collect(),
            findings: result
                .findings
                .iter()
                .map(|finding| FindingOutput {
                    finding: finding.clone(),
                    code: finding.code(),
                    message: finding.message(),
                })
                .collect(),
            report_path: result
                .report_path
                .as_ref()
                .map(|p| p.display().to_string()),
            has_errors: result.has_errors(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, PipelineError> {
        serde_json::to_string_pretty(self).map_err(|e| PipelineError::Serialization {
            message: e.to_string(),
        })
    }
}
