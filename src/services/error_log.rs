//! Append-only error log handle.
//!
//! The handle is created once at process start with [`ErrorLog::open`], passed to
//! every component that reports failures, and closed at shutdown. Entries are
//! emitted through a `tracing` dispatcher scoped to the handle, so nothing is
//! installed as the global subscriber.

use std::fmt;

use chrono::Local;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::domain::{AppError, ConfigError, LoggingSettings};
use crate::services::RotatingFile;

/// Cloneable handle to the rotating error log.
#[derive(Clone)]
pub struct ErrorLog {
    sink: Option<Sink>,
}

#[derive(Clone)]
struct Sink {
    dispatch: Dispatch,
    file: RotatingFile,
}

impl fmt::Debug for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sink {
            Some(sink) => f.debug_struct("ErrorLog").field("file", &sink.file).finish(),
            None => f.write_str("ErrorLog(disabled)"),
        }
    }
}

impl ErrorLog {
    /// Open the log file described by `settings`.
    pub fn open(settings: &LoggingSettings) -> Result<Self, AppError> {
        let level = parse_level(&settings.level)?;
        let file = RotatingFile::open(&settings.path, settings.max_bytes, settings.backup_count)?;

        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(level)
            .event_format(LineFormat)
            .with_writer(file.clone())
            .finish();

        Ok(Self { sink: Some(Sink { dispatch: Dispatch::new(subscriber), file }) })
    }

    /// A handle that discards every entry.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn error(&self, message: &str) {
        self.emit(|| tracing::error!("{message}"));
    }

    pub fn warning(&self, message: &str) {
        self.emit(|| tracing::warn!("{message}"));
    }

    pub fn info(&self, message: &str) {
        self.emit(|| tracing::info!("{message}"));
    }

    /// Flush buffered output to disk.
    pub fn flush(&self) -> std::io::Result<()> {
        match &self.sink {
            Some(sink) => {
                use std::io::Write;
                use tracing_subscriber::fmt::MakeWriter;
                sink.file.make_writer().flush()
            }
            None => Ok(()),
        }
    }

    /// Flush and release this handle.
    pub fn close(self) -> std::io::Result<()> {
        self.flush()
    }

    fn emit(&self, event: impl FnOnce()) {
        if let Some(sink) = &self.sink {
            tracing::dispatcher::with_default(&sink.dispatch, event);
        }
    }
}

/// Map a configured level name onto a filter. Python-style `warning` is accepted.
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.to_ascii_lowercase().as_str() {
        "error" => Ok(LevelFilter::ERROR),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        _ => Err(ConfigError::Parse(format!("unrecognised log level '{level}'"))),
    }
}

/// `2024-05-01 13:45:12,034 ERROR: message`
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = match *event.metadata().level() {
            Level::ERROR => "ERROR",
            Level::WARN => "WARNING",
            Level::INFO => "INFO",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
        };
        write!(writer, "{} {}: ", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"), level)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
