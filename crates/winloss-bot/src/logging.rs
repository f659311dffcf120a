//! Log sink: level-filtered, line-formatted append-only log file.
//!
//! Crate code logs with the `tracing` macros. [`init_logging`] installs a
//! subscriber with two layers: the fmt layer for coloured console output and
//! a [`LogFileLayer`] that hands every event to [`LogSink::record`], which
//! renders `[timestamp] [LEVEL] message args…` and appends it to the file.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{info, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use winloss_types::LogLevel;

use crate::fs::{OpenAppendFile, ReadFile, WriteFile};

/// Lines returned by `recent` when the caller has no preference.
pub const DEFAULT_RECENT_LINES: usize = 50;

pub struct LogSink<F> {
    fs: F,
    path: PathBuf,
    threshold: LogLevel,
}

impl<F> LogSink<F>
where
    F: OpenAppendFile + ReadFile + WriteFile,
{
    pub fn new(fs: F, path: impl Into<PathBuf>, threshold: LogLevel) -> Self {
        Self {
            fs,
            path: path.into(),
            threshold,
        }
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format and append one record.
    ///
    /// Records less severe than the threshold are dropped. Write failures
    /// go to stderr only. Returns true if the line reached the file.
    pub fn record(&self, level: LogLevel, message: &str, args: &[Value]) -> bool {
        if !level.passes(self.threshold) {
            return false;
        }
        let line = format_line(Utc::now(), level, message, args);
        match self.append(&line) {
            Ok(()) => true,
            Err(e) => {
                // A tracing call here would re-enter the file layer.
                eprintln!("Failed to write to log file {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self.fs.open_append(&self.path)?;
        writeln!(writer, "{line}")
    }

    /// Truncate the log file, then log a confirmation through `tracing` so
    /// it reaches the console as well as the fresh file.
    pub fn clear(&self) -> bool {
        if let Err(e) = self.fs.write(&self.path, "") {
            eprintln!("Failed to clear log file {}: {}", self.path.display(), e);
            return false;
        }
        info!("Log file cleared");
        true
    }

    /// The last `lines` non-blank lines, oldest first.
    pub fn recent(&self, lines: usize) -> String {
        match self.fs.read_to_string(&self.path) {
            Ok(content) => {
                let kept: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
                let start = kept.len().saturating_sub(lines);
                kept[start..].join("\n")
            }
            Err(e) => format!("Error reading logs: {e}"),
        }
    }
}

/// `[2024-01-01T00:00:00.000Z] [INFO] message arg1 arg2`
pub fn format_line(
    timestamp: DateTime<Utc>,
    level: LogLevel,
    message: &str,
    args: &[Value],
) -> String {
    let mut line = format!(
        "[{}] [{}] {}",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        level.label(),
        message
    );
    for arg in args {
        line.push(' ');
        match arg {
            Value::String(s) => line.push_str(s),
            other => line.push_str(&other.to_string()),
        }
    }
    line
}

pub fn level_from_tracing(level: &Level) -> LogLevel {
    match *level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warn,
        Level::INFO => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

/// Forwards tracing events to a [`LogSink`].
pub struct LogFileLayer<F> {
    sink: Arc<LogSink<F>>,
}

impl<F> LogFileLayer<F> {
    pub fn new(sink: Arc<LogSink<F>>) -> Self {
        Self { sink }
    }
}

impl<S, F> Layer<S> for LogFileLayer<F>
where
    S: Subscriber,
    F: OpenAppendFile + ReadFile + WriteFile + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        self.sink.record(
            level_from_tracing(event.metadata().level()),
            &fields.message,
            &fields.args,
        );
    }
}

#[derive(Default)]
struct EventFields {
    message: String,
    args: Vec<Value>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.args
                .push(Value::String(format!("{}={}", field.name(), value)));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.args
                .push(Value::String(format!("{}={:?}", field.name(), value)));
        }
    }
}

/// Filter directives used when `RUST_LOG` is unset: `level` for this bot's
/// crates, and `level` capped at `warn` for dependencies.
pub fn default_directives(level: LogLevel) -> String {
    let dependencies = level.min(LogLevel::Warn);
    format!("winloss_bot={level},winloss_types={level},{dependencies}")
}

/// Install the global subscriber: `RUST_LOG` if set, otherwise
/// [`default_directives`] for the sink's threshold.
pub fn init_logging<F>(sink: Arc<LogSink<F>>)
where
    F: OpenAppendFile + ReadFile + WriteFile + Send + Sync + 'static,
{
    let level = sink.threshold();
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(LogFileLayer::new(sink))
        .init();
}

impl<F> crate::commands::LogControl for LogSink<F>
where
    F: OpenAppendFile + ReadFile + WriteFile + Send + Sync,
{
    fn recent(&self, lines: usize) -> String {
        LogSink::recent(self, lines)
    }

    fn clear(&self) -> bool {
        LogSink::clear(self)
    }
}
