//! Logging settings
//!
//! Limits are compile-time constants from the build profile. Preferences are
//! installed once per process from `LoggingPreferences`; until then the
//! environment-derived defaults apply.

use super::events::LogLevel;
use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH, SECURITY_MIN_LOG_LEVEL,
};
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install preferences. Must run before `init_global_logging`.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

// ============================================================================
// ACCESSORS
// ============================================================================

/// Minimum level to emit. Never stricter than the profile's security level.
pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level.max(get_security_log_level())
}

/// Level at or below which events are always emitted
pub fn get_security_log_level() -> LogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => LogLevel::Error,
        1 => LogLevel::Warning,
        _ => LogLevel::Info,
    }
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

pub fn include_file_context() -> bool {
    preferences().include_file_context
}

pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Reject profiles whose limits would make logging useless
pub fn validate_config() -> Result<(), String> {
    if !(10..=100_000).contains(&LOG_BUFFER_SIZE) {
        return Err(format!(
            "Log buffer size {} outside 10..=100000",
            LOG_BUFFER_SIZE
        ));
    }

    if MAX_LOG_MESSAGE_LENGTH < 80 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

/// Effective settings, for `--help`
pub fn get_config_summary() -> String {
    let preferences = preferences();

    format!(
        "Logging:\n\
         - Min level: {} (profile floor {})\n\
         - Console: {}, structured: {}\n\
         - File context: {}\n\
         - Buffer size: {}, max message length: {}",
        get_min_log_level().as_str(),
        get_security_log_level().as_str(),
        preferences.enable_console_logging,
        preferences.use_structured_logging,
        preferences.include_file_context,
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_min_level_respects_security_floor() {
        assert!(get_min_log_level() >= get_security_log_level());
    }

    #[test]
    fn test_summary_names_levels() {
        let summary = get_config_summary();
        assert!(summary.contains("Min level"));
        assert!(summary.contains(get_security_log_level().as_str()));
    }
}
