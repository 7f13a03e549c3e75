//! Report generation
//!
//! The report sits next to the input: the input's extension is dropped and
//! the configured suffix appended (`prog.vb` becomes `prog-Errores.txt` with
//! the default profile).

pub mod writer;

use crate::config::compile_time::report::OUTPUT_SUFFIX;
use crate::config::runtime::ReportPreferences;
use crate::logging::codes;
use crate::{log_error, log_success};
use std::path::{Path, PathBuf};

pub use writer::{ReportInput, ReportWriter};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {message}")]
    Write { path: String, message: String },
}

impl ReportError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ReportError::Write { .. } => codes::report::REPORT_WRITE_FAILED,
        }
    }
}

/// Output location for an input path
pub fn report_path_for(input: &Path) -> PathBuf {
    let mut name = input.with_extension("").into_os_string();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Render the report for `input` into any writer
pub fn render_report<W: std::io::Write>(
    input: &ReportInput<'_>,
    preferences: &ReportPreferences,
    out: &mut W,
) -> std::io::Result<()> {
    ReportWriter::new(preferences.clone()).render(input, out)
}

/// Write the report for `input` next to its source and return the output path
pub fn write_report(
    input: &ReportInput<'_>,
    preferences: &ReportPreferences,
) -> Result<PathBuf, ReportError> {
    let target = report_path_for(input.source_path);

    match ReportWriter::new(preferences.clone()).write_to_path(input, &target) {
        Ok(()) => {
            log_success!(codes::success::REPORT_WRITTEN,
                "Report written",
                "path" => target.display(),
                "lines" => input.lines.len(),
                "diagnostics" => input.diagnostics.len(),
                "findings" => input.findings.len()
            );
            Ok(target)
        }
        Err(error) => {
            log_error!(error.error_code(), "Report could not be written",
                "path" => target.display(),
                "error" => &error
            );
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::statistics::Statistics;

    #[test]
    fn test_report_path_strips_extension() {
        let path = report_path_for(Path::new("samples/prog.vb"));
        assert_eq!(
            path,
            PathBuf::from(format!("samples/prog{}", OUTPUT_SUFFIX))
        );
    }

    #[test]
    fn test_report_path_without_extension() {
        let path = report_path_for(Path::new("prog"));
        assert_eq!(path, PathBuf::from(format!("prog{}", OUTPUT_SUFFIX)));
    }

    #[test]
    fn test_render_report_to_buffer() {
        let lines = vec!["Dim x As Integer".to_string()];
        let statistics = Statistics {
            dim_declarations: 1,
            ..Statistics::default()
        };
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(
            1,
            codes::order::DIM_BEFORE_MODULE,
            "'Dim' declared before 'Module Program'.",
        );

        let input = ReportInput {
            source_path: Path::new("dim.vb"),
            lines: &lines,
            statistics: &statistics,
            diagnostics: &diagnostics,
            findings: &[],
        };
        let mut buffer = Vec::new();
        render_report(&input, &ReportPreferences::default(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with(&format!("{} dim.vb\n", crate::config::compile_time::report::TITLE)));
        assert!(text.contains("0001 Dim x As Integer\nError: 'Dim' declared before 'Module Program'.\n"));
    }

    #[test]
    fn test_write_report_next_to_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("main.vb");
        let lines = vec!["Module Program".to_string(), "End Module".to_string()];
        let statistics = Statistics {
            module_open: 1,
            module_close: 1,
            ..Statistics::default()
        };
        let diagnostics = Diagnostics::new();

        let input = ReportInput {
            source_path: &source,
            lines: &lines,
            statistics: &statistics,
            diagnostics: &diagnostics,
            findings: &[],
        };
        let written = write_report(&input, &ReportPreferences::default()).unwrap();

        assert_eq!(written, report_path_for(&source));
        let text = std::fs::read_to_string(written).unwrap();
        assert!(text.contains("0002 End Module"));
    }
}
