use crate::config::compile_time::{file_processing, report};

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub stages: Vec<&'static str>,
    pub rule_count: usize,
    pub max_file_size: u64,
    pub max_line_count: usize,
    pub max_line_length: usize,
    pub output_suffix: &'static str,
    pub default_input_path: &'static str,
    pub build_profile: &'static str,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "VB Structural Checker Pipeline:\n\
             - Stages: {}\n\
             - Recognition Rules: {}\n\
             - Max File Size: {} KB\n\
             - Max Line Count: {}\n\
             - Max Line Length: {}\n\
             - Report Suffix: {}\n\
             - Default Input: {}\n\
             - Build Profile: {}",
            self.stages.join(" -> "),
            self.rule_count,
            self.max_file_size / 1024,
            self.max_line_count,
            self.max_line_length,
            self.output_suffix,
            self.default_input_path,
            self.build_profile
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage VB structural checker writing '*{}' reports",
            self.stages.len(),
            self.output_suffix
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        stages: vec![
            "file processing",
            "tokenization",
            "module scan",
            "main pass",
            "summary check",
            "report",
        ],
        rule_count: crate::lexical::RuleSet::standard()
            .map(|rules| rules.len())
            .unwrap_or(0),
        max_file_size: file_processing::MAX_FILE_SIZE,
        max_line_count: file_processing::MAX_LINE_COUNT,
        max_line_length: file_processing::MAX_LINE_LENGTH,
        output_suffix: report::OUTPUT_SUFFIX,
        default_input_path: report::DEFAULT_INPUT_PATH,
        build_profile: crate::config::build_info::profile(),
    }
}
