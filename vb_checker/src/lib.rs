// Internal modules
pub mod config;
pub mod diagnostics;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod statistics;
pub mod summary;
pub mod tokens;
pub mod validation;

// Re-export key types for library consumers
pub use diagnostics::{Diagnostic, Diagnostics};
pub use pipeline::{PipelineError, PipelineResult};
pub use statistics::Statistics;

// Re-export pipeline output for JSON consumers
pub use pipeline::output::PipelineOutput;
