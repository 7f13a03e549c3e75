use crate::logging::codes;

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating complete pipeline configuration");

    crate::logging::config::validate_config()?;
    crate::lexical::validate_tokenization()?;
    crate::validation::ShapeRules::compile().map_err(|e| e.to_string())?;

    let stage_codes = [
        codes::file_processing::LINE_TOO_LONG,
        codes::validation::INVALID_SHAPE_PATTERN,
        codes::report::REPORT_WRITE_FAILED,
        codes::report::OUTPUT_SERIALIZATION_FAILED,
        codes::pipeline::PIPELINE_FAILURE,
        codes::success::TOKENIZATION_COMPLETE,
        codes::success::STRUCTURE_VALIDATION_COMPLETE,
        codes::success::SUMMARY_CHECK_COMPLETE,
        codes::success::REPORT_WRITTEN,
        codes::success::PIPELINE_COMPLETE,
    ];

    for code in &stage_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Pipeline code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Complete pipeline validation succeeded",
        "codes_checked" => stage_codes.len(),
        "build_profile" => crate::config::build_info::profile()
    );

    Ok(())
}
