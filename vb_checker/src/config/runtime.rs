//! Runtime preferences
//!
//! Every field defaults from a `VBC_*` environment variable. A TOML file named
//! by `VBC_RUNTIME_CONFIG` overrides whichever keys it sets.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub use crate::logging::LogLevel;

/// Boolean from the environment. Unset or unparseable values use `default`.
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Reject inputs without the .vb extension
    pub require_vb_extension: bool,
    /// Log read timings and sizes
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_vb_extension: env_flag(env_vars::REQUIRE_VB_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Debug event for every accepted match
    pub trace_matches: bool,
    /// Debug event for every candidate dropped by an earlier overlapping match
    pub log_discarded_overlaps: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            trace_matches: env_flag(env_vars::LEXICAL_TRACE_MATCHES, true),
            log_discarded_overlaps: env_flag(env_vars::LEXICAL_LOG_DISCARDED, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPreferences {
    /// Debug event for every token the main pass visits
    pub trace_tokens: bool,
}

impl Default for ValidationPreferences {
    fn default() -> Self {
        Self {
            trace_tokens: env_flag(env_vars::VALIDATION_TRACE_TOKENS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPreferences {
    /// Print the analysis date under the title
    pub include_timestamp: bool,
    /// List every counter in the summary block
    pub include_counters: bool,
}

impl Default for ReportPreferences {
    fn default() -> Self {
        Self {
            include_timestamp: env_flag(env_vars::REPORT_INCLUDE_TIMESTAMP, true),
            include_counters: env_flag(env_vars::REPORT_INCLUDE_COUNTERS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// JSON lines instead of plain text
    pub use_structured_logging: bool,
    pub enable_console_logging: bool,
    /// Never more permissive than the build profile's security level
    pub min_log_level: LogLevel,
    /// Attach the checked file to every event
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

/// Failure while loading a runtime preferences file
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Cannot read runtime config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid runtime config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub validation: ValidationPreferences,
    pub report: ReportPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text. Missing tables and keys keep their
    /// environment-derived defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, RuntimeConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| RuntimeConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from the file named by `VBC_RUNTIME_CONFIG`, or fall back to
    /// environment defaults when it is unset.
    pub fn from_env() -> Result<Self, RuntimeConfigError> {
        match env::var(env_vars::RUNTIME_CONFIG) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const RUNTIME_CONFIG: &str = "VBC_RUNTIME_CONFIG";

    // File Processor
    pub const REQUIRE_VB_EXTENSION: &str = "VBC_REQUIRE_VB_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "VBC_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_TRACE_MATCHES: &str = "VBC_LEXICAL_TRACE_MATCHES";
    pub const LEXICAL_LOG_DISCARDED: &str = "VBC_LEXICAL_LOG_DISCARDED";

    // Validation
    pub const VALIDATION_TRACE_TOKENS: &str = "VBC_VALIDATION_TRACE_TOKENS";

    // Report
    pub const REPORT_INCLUDE_TIMESTAMP: &str = "VBC_REPORT_INCLUDE_TIMESTAMP";
    pub const REPORT_INCLUDE_COUNTERS: &str = "VBC_REPORT_INCLUDE_COUNTERS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "VBC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "VBC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "VBC_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "VBC_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_env_flag_falls_back_on_garbage() {
        assert!(env_flag("VBC_TEST_FLAG_THAT_IS_NEVER_SET", true));
        assert!(!env_flag("VBC_TEST_FLAG_THAT_IS_NEVER_SET", false));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let result = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"verbose\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_overrides_only_named_keys() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [report]
            include_timestamp = false

            [logging]
            min_log_level = "Debug"
            "#,
        )
        .unwrap();

        assert!(!config.report.include_timestamp);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report\ninclude_timestamp = ").unwrap();

        let result = RuntimeConfig::load_from_file(file.path());
        assert_matches!(result, Err(RuntimeConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = RuntimeConfig::load_from_file(Path::new("/nonexistent/vbc.toml"));
        assert_matches!(result, Err(RuntimeConfigError::Read { .. }));
    }
}
