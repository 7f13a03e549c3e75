//! Annotated report rendering

use super::ReportError;
use crate::config::compile_time::report::{SEPARATOR_WIDTH, TITLE};
use crate::config::runtime::ReportPreferences;
use crate::diagnostics::Diagnostics;
use crate::statistics::Statistics;
use crate::summary::ConsistencyFinding;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the report is built from
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub source_path: &'a Path,
    pub lines: &'a [String],
    pub statistics: &'a Statistics,
    pub diagnostics: &'a Diagnostics,
    pub findings: &'a [ConsistencyFinding],
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    preferences: ReportPreferences,
    analysis_time: DateTime<Local>,
}

impl ReportWriter {
    pub fn new(preferences: ReportPreferences) -> Self {
        Self {
            preferences,
            analysis_time: Local::now(),
        }
    }

    /// Fix the date printed in the header
    pub fn with_analysis_time(mut self, time: DateTime<Local>) -> Self {
        self.analysis_time = time;
        self
    }

    pub fn render<W: Write>(&self, input: &ReportInput<'_>, out: &mut W) -> io::Result<()> {
        let separator = "-".repeat(SEPARATOR_WIDTH);

        writeln!(out, "{} {}", TITLE, input.source_path.display())?;
        if self.preferences.include_timestamp {
            writeln!(out, "Analysis date: {}", self.analysis_time.format(DATE_FORMAT))?;
        }
        writeln!(out, "{}", separator)?;

        let by_line = input.diagnostics.by_line();
        for (index, text) in input.lines.iter().enumerate() {
            let line = index + 1;
            writeln!(out, "{:04} {}", line, text)?;
            for diagnostic in by_line.get(&line).into_iter().flatten() {
                writeln!(out, "Error: {}", diagnostic.message)?;
            }
        }

        for diagnostic in input.diagnostics.outside(input.lines.len()) {
            writeln!(out, "{:04} Error: {}", diagnostic.line, diagnostic.message)?;
        }

        writeln!(out, "{}", separator)?;
        writeln!(out, "Analysis summary:")?;
        if self.preferences.include_counters {
            for (label, count) in input.statistics.entries() {
                writeln!(out, "{}: {}", label, count)?;
            }
        }
        for finding in input.findings {
            writeln!(out, "Error: {}", finding)?;
        }
        writeln!(out, "{}", separator)?;

        Ok(())
    }

    /// Render into a file, replacing any previous report
    pub fn write_to_path(&self, input: &ReportInput<'_>, path: &Path) -> Result<(), ReportError> {
        let to_error = |e: io::Error| ReportError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let file = File::create(path).map_err(to_error)?;
        let mut out = BufWriter::new(file);
        self.render(input, &mut out).map_err(to_error)?;
        out.flush().map_err(to_error)
    }
}
