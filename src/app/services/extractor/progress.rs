//! Progress and log reporting through an injected sink
//!
//! The engine never talks to a terminal or UI directly. Callers pass a
//! [`ProgressSink`]; the engine calls it synchronously from the worker
//! thread. Sink failures are logged and otherwise ignored so a broken
//! observer can never abort an extraction.

use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Severity of a log event sent to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Receiver of progress and log events
pub trait ProgressSink: Send + Sync {
    /// Progress in percent (0.0..=100.0) with a short status message
    fn on_progress(&self, percent: f64, message: &str) -> anyhow::Result<()>;

    /// A log line addressed to the user
    fn on_log(&self, level: LogLevel, message: &str) -> anyhow::Result<()>;

    /// Whether the caller has stopped listening
    ///
    /// A `true` answer lets the job discard its work before persisting
    /// anything. The default sink never abandons.
    fn is_abandoned(&self) -> bool {
        false
    }
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_progress(&self, _percent: f64, _message: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_log(&self, _level: LogLevel, _message: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Maps the 0-100 range of one phase onto a slice of the overall job
pub struct ScaledSink<'a> {
    inner: &'a dyn ProgressSink,
    offset: f64,
    span: f64,
}

impl<'a> ScaledSink<'a> {
    /// Phase covering `start..end` percent of the overall job
    pub fn new(inner: &'a dyn ProgressSink, start: f64, end: f64) -> Self {
        Self {
            inner,
            offset: start,
            span: (end - start).max(0.0),
        }
    }
}

impl ProgressSink for ScaledSink<'_> {
    fn on_progress(&self, percent: f64, message: &str) -> anyhow::Result<()> {
        let scaled = self.offset + self.span * percent.clamp(0.0, 100.0) / 100.0;
        self.inner.on_progress(scaled, message)
    }

    fn on_log(&self, level: LogLevel, message: &str) -> anyhow::Result<()> {
        self.inner.on_log(level, message)
    }

    fn is_abandoned(&self) -> bool {
        self.inner.is_abandoned()
    }
}

/// Convenience front end used by the services
///
/// Every log event is mirrored to `tracing` at the matching level before it
/// is handed to the sink.
#[derive(Clone, Copy)]
pub struct Reporter<'a> {
    sink: &'a dyn ProgressSink,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self { sink }
    }

    pub fn progress(&self, percent: f64, message: impl AsRef<str>) {
        let message = message.as_ref();
        if let Err(e) = self.sink.on_progress(percent.clamp(0.0, 100.0), message) {
            debug!("Progress sink rejected progress event: {}", e);
        }
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let message = message.as_ref();
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warn => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
        if let Err(e) = self.sink.on_log(level, message) {
            debug!("Progress sink rejected log event: {}", e);
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn is_abandoned(&self) -> bool {
        self.sink.is_abandoned()
    }
}
