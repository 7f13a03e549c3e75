//! Reads one source file into lines

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT, MAX_LINE_LENGTH};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_performance, log_success};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Why an input could not be read. Every variant is fatal to the run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("No such file: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    InvalidPath { path: String },

    #[error("{path}: expected a .vb file, found {found:?}")]
    InvalidExtension { path: String, found: Option<String> },

    #[error("{path}: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("{path}: {lines} lines exceeds the {limit} line limit")]
    TooManyLines { path: String, lines: usize, limit: usize },

    #[error("{path}: line {line} is {length} characters, over the {limit} character limit")]
    LineTooLong {
        path: String,
        line: usize,
        length: usize,
        limit: usize,
    },

    #[error("{path}: permission denied")]
    PermissionDenied { path: String },

    #[error("{path}: not valid UTF-8")]
    InvalidEncoding { path: String },

    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        use codes::file_processing::*;
        match self {
            Self::FileNotFound { .. } => FILE_NOT_FOUND,
            Self::InvalidPath { .. } => INVALID_PATH,
            Self::InvalidExtension { .. } => INVALID_EXTENSION,
            Self::FileTooLarge { .. } => FILE_TOO_LARGE,
            Self::TooManyLines { .. } => TOO_MANY_LINES,
            Self::LineTooLong { .. } => LINE_TOO_LONG,
            Self::PermissionDenied { .. } => PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => INVALID_ENCODING,
            Self::Io { .. } => IO_ERROR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    fn from_io(path: &Path, error: &std::io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => Self::FileNotFound { path },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io {
                path,
                message: error.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Path as given by the caller; the report is written next to it
    pub path: PathBuf,
    pub size: u64,
    /// Lower-cased
    pub extension: Option<String>,
    pub line_count: usize,
}

impl FileMetadata {
    fn new(path: PathBuf, size: u64, line_count: usize) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        Self {
            path,
            size,
            extension,
            line_count,
        }
    }

    pub fn is_vb_file(&self) -> bool {
        self.extension.as_deref() == Some("vb")
    }
}

/// Source lines plus metadata for one input file
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// Lines without terminators; index 0 is line 1
    pub lines: Vec<String>,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    /// Wrap in-memory text without touching the file system
    pub fn from_source(path: impl Into<PathBuf>, source: &str) -> Self {
        let lines = split_lines(source);
        Self {
            metadata: FileMetadata::new(path.into(), source.len() as u64, lines.len()),
            lines,
            processing_duration: Duration::ZERO,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum()
    }

    /// Text of a 1-based line
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }
}

/// `\n` and `\r\n` both end a line; a final terminator adds no empty line
fn split_lines(source: &str) -> Vec<String> {
    source.lines().map(str::to_string).collect()
}

#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    pub require_vb_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_vb_extension: prefs.require_vb_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_vb_extension_required(mut self, required: bool) -> Self {
        self.require_vb_extension = required;
        self
    }

    /// Read `file_path` into lines. Empty files are accepted.
    pub fn process_file(&self, file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
        let started = Instant::now();
        log_debug!("Reading source", "file" => file_path);

        let result = self.read_lines(file_path).map_err(|error| {
            log_error!(error.error_code(), "Source could not be read",
                "file" => file_path,
                "error" => &error
            );
            error
        })?;

        let result = FileProcessingResult {
            processing_duration: started.elapsed(),
            ..result
        };

        if self.enable_performance_logging {
            log_performance!(codes::success::FILE_PROCESSING_SUCCESS, "Source read",
                duration = result.processing_duration,
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.line_count()
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Source read",
                "file" => file_path,
                "lines" => result.line_count()
            );
        }

        Ok(result)
    }

    fn read_lines(&self, file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
        let path = Path::new(file_path);
        let not_a_file = || FileProcessorError::InvalidPath {
            path: file_path.to_string(),
        };

        if file_path.trim().is_empty() {
            return Err(not_a_file());
        }

        let stat = fs::metadata(path).map_err(|e| FileProcessorError::from_io(path, &e))?;
        if !stat.is_file() {
            return Err(not_a_file());
        }
        if stat.len() > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                path: file_path.to_string(),
                size: stat.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let metadata = FileMetadata::new(path.to_path_buf(), stat.len(), 0);
        if self.require_vb_extension && !metadata.is_vb_file() {
            return Err(FileProcessorError::InvalidExtension {
                path: file_path.to_string(),
                found: metadata.extension,
            });
        }

        let bytes = fs::read(path).map_err(|e| FileProcessorError::from_io(path, &e))?;
        let source = String::from_utf8(bytes).map_err(|_| FileProcessorError::InvalidEncoding {
            path: file_path.to_string(),
        })?;

        let lines = split_lines(&source);
        if lines.len() > MAX_LINE_COUNT {
            return Err(FileProcessorError::TooManyLines {
                path: file_path.to_string(),
                lines: lines.len(),
                limit: MAX_LINE_COUNT,
            });
        }

        let too_long = lines
            .iter()
            .enumerate()
            .map(|(index, text)| (index + 1, text.chars().count()))
            .find(|&(_, length)| length > MAX_LINE_LENGTH);
        if let Some((line, length)) = too_long {
            return Err(FileProcessorError::LineTooLong {
                path: file_path.to_string(),
                line,
                length,
                limit: MAX_LINE_LENGTH,
            });
        }

        Ok(FileProcessingResult {
            metadata: FileMetadata {
                line_count: lines.len(),
                ..metadata
            },
            lines,
            processing_duration: Duration::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn write_source(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_crlf_source() {
        let dir = tempdir().unwrap();
        let path = write_source(&dir, "program.vb", b"Module Program\r\nEnd Module\n");

        let result = FileProcessor::new()
            .process_file(path.to_str().unwrap())
            .unwrap();

        assert_eq!(result.lines, vec!["Module Program", "End Module"]);
        assert_eq!(result.metadata.line_count, 2);
        assert!(result.metadata.is_vb_file());
        assert_eq!(result.line(2), Some("End Module"));
        assert_eq!(result.line(0), None);
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let path = write_source(&dir, "empty.vb", b"");

        let result = FileProcessor::new()
            .process_file(path.to_str().unwrap())
            .unwrap();

        assert_eq!(result.line_count(), 0);
        assert_eq!(result.metadata.size, 0);
    }

    #[test]
    fn test_missing_file() {
        let result = FileProcessor::new().process_file("does/not/exist.vb");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { ref path }) if path == "does/not/exist.vb");
    }

    #[test]
    fn test_directory_and_blank_paths_are_rejected() {
        let dir = tempdir().unwrap();
        let processor = FileProcessor::new();

        assert_matches!(
            processor.process_file(dir.path().to_str().unwrap()),
            Err(FileProcessorError::InvalidPath { .. })
        );
        assert_matches!(
            processor.process_file("  "),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let path = write_source(&dir, "program.txt", b"Module Program\n");

        let result = FileProcessor::new()
            .with_vb_extension_required(true)
            .process_file(path.to_str().unwrap());

        assert_matches!(
            result,
            Err(FileProcessorError::InvalidExtension { found: Some(ref ext), .. }) if ext == "txt"
        );
    }

    #[test]
    fn test_extension_not_required_by_default() {
        let dir = tempdir().unwrap();
        let path = write_source(&dir, "program.bas", b"Module Program\n");

        assert!(FileProcessor::new().process_file(path.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = write_source(&dir, "latin1.vb", &[0x27, 0x20, 0xE9, 0xFF, 0x0A]);

        let result = FileProcessor::new().process_file(path.to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_too_many_lines() {
        let dir = tempdir().unwrap();
        let path = write_source(&dir, "many.vb", "'\n".repeat(MAX_LINE_COUNT + 1).as_bytes());

        let result = FileProcessor::new().process_file(path.to_str().unwrap());

        assert_matches!(
            result,
            Err(FileProcessorError::TooManyLines { lines, limit, .. })
                if lines == MAX_LINE_COUNT + 1 && limit == MAX_LINE_COUNT
        );
    }

    #[test]
    fn test_line_too_long_is_read_failure() {
        let dir = tempdir().unwrap();
        let source = format!("Module Program\nx = \"{}\"\nEnd Module\n", "a".repeat(MAX_LINE_LENGTH));
        let path = write_source(&dir, "long.vb", source.as_bytes());

        let error = FileProcessor::new()
            .process_file(path.to_str().unwrap())
            .unwrap_err();

        assert_matches!(
            error,
            FileProcessorError::LineTooLong { line: 2, length, limit, .. }
                if length == MAX_LINE_LENGTH + 6 && limit == MAX_LINE_LENGTH
        );
        assert!(error.requires_halt());
        assert_eq!(error.error_code(), codes::file_processing::LINE_TOO_LONG);
    }

    #[test]
    fn test_error_classification() {
        let error = FileProcessorError::FileNotFound {
            path: "test.vb".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert!(error.requires_halt());
        assert_eq!(error.to_string(), "No such file: test.vb");
    }

    #[test]
    fn test_from_source() {
        let result = FileProcessingResult::from_source("memo.VB", "a\n\nb");
        assert_eq!(result.line_count(), 3);
        assert!(result.metadata.is_vb_file());
        assert_eq!(result.line(2), Some(""));
        assert_eq!(result.char_count(), 2);
    }
}
