//! End-to-end check of one source file
//!
//! file -> tokens -> module scan + main pass -> summary findings -> report

mod error;
mod info;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::{FileProcessingResult, FileProcessor};
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::report::{self, ReportInput};
use crate::summary::check_consistency;
use crate::validation::StructuralValidator;
use std::path::PathBuf;
use std::time::Instant;

/// Check a file and write its report, using environment-derived preferences
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

/// Check a file and write its report
pub fn process_file_with_config(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), || {
        crate::log_info!("Starting VB structural check", "file" => file_path);

        // Stage 1: File processing
        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;

        // Stages 2-4: Tokens, validation, summary
        let mut result = analyze(file_result, config)?;

        // Stage 5: Report
        let input = ReportInput {
            source_path: &result.file_metadata.path,
            lines: &result.lines,
            statistics: &result.outcome.statistics,
            diagnostics: &result.outcome.diagnostics,
            findings: &result.findings,
        };
        let report_path = report::write_report(&input, &config.report)?;
        result.report_path = Some(report_path);

        result.log_success(file_path);
        Ok(result)
    })
}

/// Run every analysis stage on already-read lines. Writes nothing.
pub fn analyze(
    file_result: FileProcessingResult,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone())?;
    let tokens = analyzer.tokenize_file_result(&file_result);

    let validator = StructuralValidator::with_preferences(config.validation.clone())?;
    let outcome = validator.validate(&tokens);

    let findings = check_consistency(&outcome.statistics);

    let FileProcessingResult {
        lines,
        metadata,
        processing_duration,
    } = file_result;

    Ok(PipelineResult {
        file_metadata: metadata,
        lines,
        lexical_metrics: analyzer.metrics().clone(),
        token_count: tokens.len(),
        outcome,
        findings,
        report_path: None,
        processing_duration: processing_duration + start_time.elapsed(),
    })
}

/// Analyze in-memory source text under a display path
pub fn analyze_source(path: &str, source: &str) -> Result<PipelineResult, PipelineError> {
    analyze(
        FileProcessingResult::from_source(path, source),
        &RuntimeConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::file_processor::FileProcessorError;
    use crate::summary::{Construct, FindingKind};
    use std::fs;

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
        assert!(!error.is_read_failure());
    }

    #[test]
    fn test_open_program_findings() {
        let result = analyze_source("open.vb", "Module Program\nSub Main()").unwrap();

        let lines: Vec<_> = result.diagnostics().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert!(result.findings.contains(&crate::summary::ConsistencyFinding {
            construct: Construct::Module,
            kind: FindingKind::MissingClose,
        }));
        assert!(result.has_errors());
    }

    #[test]
    fn test_clean_program() {
        let result =
            analyze_source("ok.vb", "Module Program\nSub Main()\nEnd Sub\nEnd Module\n").unwrap();

        assert!(!result.has_errors());
        assert_eq!(result.token_count, 4);
        assert_eq!(result.statistics().total(), 4);
    }

    #[test]
    fn test_process_file_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("prog.vb");
        fs::write(&source, "Module Program\nImports System\nEnd Module\n").unwrap();

        let result = process_file(source.to_str().unwrap()).unwrap();
        let report_path = result.report_path.clone().unwrap();

        assert_eq!(report_path, crate::report::report_path_for(&source));
        let text = fs::read_to_string(report_path).unwrap();
        assert!(text.contains("0002 Imports System\nError: 'Imports' must precede 'Module Program'.\n"));
    }

    #[test]
    fn test_missing_file_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.vb");

        let error = process_file(missing.to_str().unwrap()).unwrap_err();
        assert!(error.is_read_failure());
        assert_matches!(
            error,
            PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. })
        );
    }

    #[test]
    fn test_long_line_does_not_stop_analysis() {
        let source = format!(
            "Module Program\nSub Main()\nx = \"{}\"\nEnd Sub\nEnd Module",
            "a".repeat(70_000)
        );

        let result = analyze_source("long.vb", &source).unwrap();

        assert!(!result.has_errors());
        assert_eq!(result.token_count, 5);
    }

    #[test]
    fn test_over_long_line_in_file_is_read_failure() {
        use crate::config::compile_time::file_processing::MAX_LINE_LENGTH;

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("wide.vb");
        fs::write(&source, format!("Module Program\n'{}\nEnd Module\n", "-".repeat(MAX_LINE_LENGTH))).unwrap();

        let error = process_file(source.to_str().unwrap()).unwrap_err();
        assert!(error.is_read_failure());
        assert_matches!(
            error,
            PipelineError::FileProcessing(FileProcessorError::LineTooLong { line: 2, .. })
        );
        assert!(!crate::report::report_path_for(&source).exists());
    }

    #[test]
    fn test_pipeline_emits_stage_milestones() {
        use crate::logging::{codes, LogLevel, LoggingService, MemoryLogger};
        use std::sync::Arc;

        let memory = Arc::new(MemoryLogger::with_capacity(100_000));
        logging::install(LoggingService::new(memory.clone(), LogLevel::Info)).unwrap();

        analyze_source("milestones.vb", "Module Program\nEnd Module").unwrap();

        for code in [
            codes::success::TOKENIZATION_COMPLETE,
            codes::success::STRUCTURE_VALIDATION_COMPLETE,
            codes::success::SUMMARY_CHECK_COMPLETE,
        ] {
            assert!(memory.has_code(code), "missing {}", code);
        }
    }

    #[test]
    fn test_json_output() {
        let result = analyze_source("j.vb", "Module Program\nImports System\nEnd Module").unwrap();
        let json = PipelineOutput::from_result(&result).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["statistics"]["imports"], 1);
        assert_eq!(value["diagnostics"][0]["line"], 2);
        assert_eq!(value["has_errors"], true);
    }
}
