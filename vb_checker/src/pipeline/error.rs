use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::codes;
use crate::report::ReportError;
use crate::validation::ValidationError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Structural validation setup failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("Output serialization failed: {message}")]
    Serialization { message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::LexicalAnalysis(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Serialization { .. } => codes::report::OUTPUT_SERIALIZATION_FAILED,
            Self::Pipeline { .. } => codes::pipeline::PIPELINE_FAILURE,
        }
    }

    /// The input could not be read; nothing was analyzed
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::FileProcessing(_))
    }
}
