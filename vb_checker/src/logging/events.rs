//! Log events emitted while checking a file

use super::codes::{self, Code};
use crate::tokens::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const WARNING_CODE: Code = Code::new("W000");
const INFO_CODE: Code = Code::new("I000");
const DEBUG_CODE: Code = Code::new("D000");

/// Log severity levels, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum LogLevel {
    Error = 0,
    #[serde(rename = "WARN")]
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Case-insensitive name or numeric level (`"warn"`, `"Debug"`, `"0"`)
    pub fn parse(level: &str) -> Option<Self> {
        match level.trim().to_lowercase().as_str() {
            "error" | "0" => Some(LogLevel::Error),
            "warning" | "warn" | "1" => Some(LogLevel::Warning),
            "info" | "2" => Some(LogLevel::Info),
            "debug" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        Self::parse(&value).ok_or_else(|| format!("unknown log level '{}'", value))
    }
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub position: Option<Position>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn build(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: truncate_message(message),
            position: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Error, error_code, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::build(LogLevel::Warning, WARNING_CODE, message)
    }

    pub fn info(message: &str) -> Self {
        Self::build(LogLevel::Info, INFO_CODE, message)
    }

    /// Info-level event carrying a registered milestone code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::build(LogLevel::Debug, DEBUG_CODE, message)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    /// One JSON object per event. Errors carry their registry metadata.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&JsonEvent::from(self))
    }
}

impl fmt::Display for LogEvent {
    /// `[LEVEL] CODE - message at line:col (key=value, ...)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.level.as_str(), self.code, self.message)?;

        if let Some(position) = self.position {
            write!(f, " at {}:{}", position.line, position.column)?;
        }

        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            write!(f, " ({})", pairs.join(", "))?;
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    timestamp: u64,
    level: LogLevel,
    code: Code,
    message: &'a str,
    category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_metadata: Option<JsonErrorMetadata>,
}

#[derive(Serialize)]
struct JsonErrorMetadata {
    severity: &'static str,
    recoverable: bool,
    requires_halt: bool,
    description: &'static str,
    recommended_action: &'static str,
}

impl<'a> From<&'a LogEvent> for JsonEvent<'a> {
    fn from(event: &'a LogEvent) -> Self {
        let error_metadata = if event.is_error() {
            codes::get_error_metadata(event.code.as_str()).map(|m| JsonErrorMetadata {
                severity: m.severity.as_str(),
                recoverable: m.recoverable,
                requires_halt: m.requires_halt,
                description: m.description,
                recommended_action: m.recommended_action,
            })
        } else {
            None
        };

        Self {
            timestamp: event
                .timestamp
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            level: event.level,
            code: event.code,
            message: &event.message,
            category: event.category(),
            position: event.position,
            context: (!event.context.is_empty()).then_some(&event.context),
            error_metadata,
        }
    }
}

/// Clamp a message to the compile-time length limit on a char boundary
fn truncate_message(message: &str) -> String {
    let limit = super::config::get_max_log_message_length();
    if message.len() <= limit {
        return message.to_string();
    }

    let mut end = limit;
    while end > 0 && !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}
