// crates/deploy-canary-core/src/log.rs
// ============================================================================
// Module: Hook Logging
// Description: Structured JSON-line log records and sinks.
// Purpose: Emit leveled hook logs without a logging framework dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every log line is a single JSON object with a stable `event` label, so
//! CloudWatch metric filters can match on fields rather than message text.
//! [`HookLogger`] stamps the timestamp and drops records below its minimum
//! level before they reach a [`LogSink`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Log severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Step-by-step tracing, enabled by `DEBUG=true`.
    Debug,
    /// Normal progress.
    Info,
    /// Validation or reporting failures.
    Error,
}

/// Structured log record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Stable event label.
    pub event: &'static str,
    /// Record timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Record severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
    /// Optional structured context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for log records.
pub trait LogSink: Send + Sync {
    /// Record a log entry.
    fn record(&self, record: &LogRecord);
}

/// Sink that logs JSON lines to stderr.
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn record(&self, record: &LogRecord) {
        if let Ok(payload) = serde_json::to_string(record) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that logs JSON lines to an arbitrary writer.
pub struct WriterLogSink<W: Write + Send> {
    /// Writer guarded for shared use.
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterLogSink<W> {
    /// Creates a sink writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> LogSink for WriterLogSink<W> {
    fn record(&self, record: &LogRecord) {
        if let Ok(payload) = serde_json::to_string(record)
            && let Ok(mut writer) = self.writer.lock()
        {
            let _ = writeln!(writer, "{payload}");
            let _ = writer.flush();
        }
    }
}

/// No-op log sink.
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn record(&self, _record: &LogRecord) {}
}

// ============================================================================
// SECTION: Logger
// ============================================================================

/// Level-filtering front end over a [`LogSink`].
#[derive(Clone)]
pub struct HookLogger {
    /// Destination sink.
    sink: Arc<dyn LogSink>,
    /// Records below this level are dropped.
    min_level: LogLevel,
}

impl HookLogger {
    /// Creates a logger over `sink` that keeps records at or above `min_level`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>, min_level: LogLevel) -> Self {
        Self {
            sink,
            min_level,
        }
    }

    /// Creates a stderr logger.
    #[must_use]
    pub fn stderr(min_level: LogLevel) -> Self {
        Self::new(Arc::new(StderrLogSink), min_level)
    }

    /// Creates a logger that discards everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Arc::new(NoopLogSink), LogLevel::Error)
    }

    /// Returns the minimum retained level.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Returns true when records at `level` are retained.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Records a message with optional structured detail.
    pub fn log(
        &self,
        level: LogLevel,
        event: &'static str,
        message: impl Into<String>,
        detail: Option<Value>,
    ) {
        if !self.enabled(level) {
            return;
        }
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        self.sink.record(&LogRecord {
            event,
            timestamp_ms,
            level,
            message: message.into(),
            detail,
        });
    }

    /// Records a debug message.
    pub fn debug(&self, event: &'static str, message: impl Into<String>) {
        self.log(LogLevel::Debug, event, message, None);
    }

    /// Records an info message.
    pub fn info(&self, event: &'static str, message: impl Into<String>) {
        self.log(LogLevel::Info, event, message, None);
    }

    /// Records an error message.
    pub fn error(&self, event: &'static str, message: impl Into<String>) {
        self.log(LogLevel::Error, event, message, None);
    }
}
