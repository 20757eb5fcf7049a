//! Diagnostic logging for the `buyer-price` binary.
//!
//! Records go to stderr so stdout only ever carries rendered output, and can
//! additionally be appended to a file chosen after start-up.

use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, LineWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use thiserror::Error;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    filter::ParseError,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::{SubscriberInitExt, TryInitError},
};

/// Filter used when neither `RUST_LOG` nor a configured level is present.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level '{level}': {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("log filter reload failed: {0}")]
    Reload(#[from] reload::Error),

    #[error("cannot open log file '{path}': {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global logger is already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

// --- Formatter ---

/// `12:04:05.123  WARN pricing_core::session: message key=value`
struct CliFormat;

fn level_style(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for CliFormat
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
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                level_style(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- File sink ---

/// Log file that can be opened after the subscriber is installed.
/// Records are dropped while it is empty.
#[derive(Clone, Default)]
struct FileSlot(Arc<Mutex<Option<LineWriter<File>>>>);

impl FileSlot {
    fn replace(
        &self,
        file: File,
    ) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(LineWriter::new(file));
    }
}

struct SlotWriter<'a>(MutexGuard<'a, Option<LineWriter<File>>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |f| f.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |f| f.flush())
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// --- Installed logger ---

/// Control over the installed subscriber.
pub struct Logging {
    level: reload::Handle<EnvFilter, Registry>,
    file: FileSlot,
}

/// Installs the global subscriber. Call once at startup.
///
/// The level starts at `RUST_LOG` when set, [`DEFAULT_FILTER`] otherwise.
/// Stderr output is colored only when stderr is a terminal.
pub fn init_logging() -> Result<Logging, LoggingError> {
    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (level_filter, level) = reload::Layer::new(initial);
    let file = FileSlot::default();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CliFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(CliFormat)
        .with_ansi(false)
        .with_writer(file.clone());

    tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(Logging { level, file })
}

impl Logging {
    /// Replaces the active filter. Accepts a bare level (`warn`, `debug`) or
    /// any `EnvFilter` directive.
    pub fn set_level(
        &self,
        level: &str,
    ) -> Result<(), LoggingError> {
        self.level.reload(parse_filter(level)?)?;
        Ok(())
    }

    /// Applies the level precedence: `flag`, then `RUST_LOG`, then `configured`.
    pub fn apply_level(
        &self,
        flag: Option<&str>,
        configured: Option<&str>,
    ) -> Result<(), LoggingError> {
        match chosen_level(flag, configured, env_filter_present()) {
            Some(level) => self.set_level(level),
            None => Ok(()),
        }
    }

    /// Starts appending records to `path` in addition to stderr. The parent
    /// directory must already exist.
    pub fn log_to_file(
        &self,
        path: &Path,
    ) -> Result<(), LoggingError> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggingError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;
        self.file.replace(file);
        Ok(())
    }
}

fn parse_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidLevel {
        level: level.to_string(),
        source,
    })
}

fn env_filter_present() -> bool {
    std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
}

fn chosen_level<'a>(
    flag: Option<&'a str>,
    configured: Option<&'a str>,
    env_set: bool,
) -> Option<&'a str> {
    match (flag, configured) {
        (Some(level), _) => Some(level),
        (None, Some(level)) if !env_set => Some(level),
        _ => None,
    }
}
