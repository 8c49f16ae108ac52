//! Structured logging for conformance suite runs.
//!
//! Provides:
//! - [`LogEntry`]: canonical JSONL log record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file or stdout.
//! - [`validate_log_line`]: validates a single JSONL line against the schema.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Scenario outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `level`, `event`. Optional fields carry
/// scenario context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogEntry {
    /// Creates an entry stamped with the current unix time.
    #[must_use]
    pub fn new(level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: unix_timestamp(),
            level,
            event: event.into(),
            scenario: None,
            outcome: None,
            detail: None,
        }
    }

    /// Attaches a scenario name and outcome.
    #[must_use]
    pub fn with_scenario(mut self, scenario: impl Into<String>, outcome: Outcome) -> Self {
        self.scenario = Some(scenario.into());
        self.outcome = Some(outcome);
        self
    }

    /// Attaches free-form detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Renders the entry as one JSONL line (no trailing newline).
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

/// Seconds since the unix epoch, as a string.
#[must_use]
pub fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

enum Sink {
    Stdout,
    File(File),
}

/// Writes JSONL log lines to stdout or a file.
pub struct LogEmitter {
    sink: Sink,
}

impl LogEmitter {
    /// Emitter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self { sink: Sink::Stdout }
    }

    /// Emitter appending to the file at `path`, created if absent.
    pub fn to_file(path: &Path) -> std::io::Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self {
            sink: Sink::File(file),
        })
    }

    /// Writes one entry as a JSONL line.
    pub fn emit(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        let line = entry.to_jsonl();
        match &mut self.sink {
            Sink::Stdout => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{line}")
            }
            Sink::File(file) => writeln!(file, "{line}"),
        }
    }
}

/// Validates one JSONL line against the [`LogEntry`] schema.
pub fn validate_log_line(line: &str) -> Result<LogEntry, serde_json::Error> {
    serde_json::from_str(line)
}
