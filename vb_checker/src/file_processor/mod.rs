//! Input reading
//!
//! Turns an input path into ordered source lines, enforcing the build
//! profile's size and line limits. Any failure here is fatal to the run; the
//! pipeline maps it to a distinct exit status.

mod processor;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};
