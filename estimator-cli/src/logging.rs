//! Process-wide log setup for the `estimator` binary.
//!
//! Events pass one global level filter and then fan out to the console
//! (stderr, mutable with `--quiet`) and to an optional log file that can be
//! attached after startup.

use anyhow::{Result, anyhow};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";

/// `HH:MM:SS.mmm LEVEL crate: fields`, dimmed and colored on a terminal.
struct ConsoleFormat;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let target = meta.target().split("::").next().unwrap_or_default();

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{target}\x1b[0m: ",
                level_color(*meta.level()),
                meta.level()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} {target}: ", meta.level())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type LogFile = Arc<Mutex<Option<File>>>;

/// Writer for the file layer. Records are dropped until a file is attached.
#[derive(Clone)]
struct LogFileSlot(LogFile);

struct LogFileGuard<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFileSlot {
    type Writer = LogFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Runtime switches captured when the subscriber is installed. The reload
/// handles are generic over the subscriber type, so they are kept as
/// closures.
struct LogControls {
    set_level: Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>,
    set_console: Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>,
    file: LogFile,
}

static CONTROLS: OnceLock<LogControls> = OnceLock::new();

fn controls() -> Result<&'static LogControls> {
    CONTROLS
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

/// Replaces the global filter. Accepts a bare level (`debug`) or any
/// `EnvFilter` directive list (`info,estimator_core=trace`).
pub fn set_log_level(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives)
        .map_err(|e| anyhow!("invalid log level '{directives}': {e}"))?;
    (controls()?.set_level)(filter)
}

/// Mutes or restores console output. File output is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    let gate = if enabled { "trace" } else { "off" };
    (controls()?.set_console)(EnvFilter::new(gate))
}

/// Appends log records to `path`, replacing any file attached earlier.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    let slot = &controls()?.file;
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber. `RUST_LOG` overrides the default
/// `info` filter. Later calls are no-ops.
pub fn init_default_logging() {
    INIT.get_or_init(install);
}

fn install() {
    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (level_layer, level_handle) = reload::Layer::new(initial);
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let file: LogFile = Arc::new(Mutex::new(None));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_ansi(false)
        .with_writer(LogFileSlot(file.clone()));

    let installed = tracing_subscriber::registry()
        .with(level_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init();
    if installed.is_err() {
        return;
    }

    let _ = CONTROLS.set(LogControls {
        set_level: Box::new(move |filter| {
            level_handle
                .reload(filter)
                .map_err(|e| anyhow!("filter reload failed: {e}"))
        }),
        set_console: Box::new(move |filter| {
            console_handle
                .reload(filter)
                .map_err(|e| anyhow!("console reload failed: {e}"))
        }),
        file,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_can_be_changed_after_initialization() {
        init_default_logging();

        assert!(set_log_level("warn").is_ok());
        assert!(set_log_level("estimator_core=loud").is_err());
        assert!(set_console_enabled(true).is_ok());
    }

    #[test]
    fn repeated_initialization_is_harmless() {
        init_default_logging();
        init_default_logging();

        assert!(set_log_level("info").is_ok());
    }

    #[test]
    fn file_logging_reports_unopenable_path() {
        init_default_logging();

        let err = enable_file_logging(Path::new("/nonexistent-dir/estimator.log")).unwrap_err();

        assert!(err.to_string().contains("cannot open log file"));
    }
}
