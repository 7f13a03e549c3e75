//! Global logging for the VB checker
//!
//! One process-wide `LoggingService` filters events by level and fans them
//! out to the sinks the runtime preferences enable. The file being checked is
//! tracked per thread and attached to every event.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::OnceLock;

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleFormat, ConsoleLogger, Logger, LoggingService, MemoryLogger, MultiLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<LoggingService> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install the configured service. Fails if called twice.
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    install(LoggingService::with_config())?;

    emit(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));
    Ok(())
}

/// Install a caller-built service, e.g. one backed by a `MemoryLogger`
pub fn install(service: LoggingService) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

// ============================================================================
// FILE CONTEXT
// ============================================================================

/// Run `f` with `file_path` attached to every event it emits on this thread
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| ctx.replace(Some(file_path)));
    let result = f();
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

pub fn current_file() -> Option<PathBuf> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// EMISSION
// ============================================================================

/// Whether debug events would reach any logger
pub fn debug_enabled() -> bool {
    GLOBAL_LOGGER
        .get()
        .is_some_and(|logger| logger.should_log(LogLevel::Debug))
}

/// Attach file context and hand the event to the global logger. A no-op
/// until logging is initialized.
pub fn emit(event: LogEvent) {
    let Some(logger) = GLOBAL_LOGGER.get() else {
        return;
    };

    let event = match current_file() {
        Some(path) if config::include_file_context() => {
            event.with_context("file", &path.display().to_string())
        }
        _ => event,
    };

    logger.log_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_file_context_scopes_path() {
        assert!(current_file().is_none());

        let result = with_file_context(PathBuf::from("nested/test.vb"), || {
            assert_eq!(current_file(), Some(PathBuf::from("nested/test.vb")));
            42
        });

        assert_eq!(result, 42);
        assert!(current_file().is_none());
    }

    #[test]
    fn test_nested_file_context_restores_outer() {
        with_file_context(PathBuf::from("outer.vb"), || {
            with_file_context(PathBuf::from("inner.vb"), || {
                assert_eq!(current_file(), Some(PathBuf::from("inner.vb")));
            });
            assert_eq!(current_file(), Some(PathBuf::from("outer.vb")));
        });
    }

    #[test]
    fn test_emit_without_logger_is_silent() {
        emit(LogEvent::error(codes::system::INTERNAL_ERROR, "Test error"));
    }
}
