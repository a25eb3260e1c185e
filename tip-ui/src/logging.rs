//! Process-wide logging for the terminal calculator.
//!
//! Log records go to stderr so they never interleave with the calculator
//! output on stdout. A file layer can be attached after start-up.

use anyhow::Result;
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tokio::task::JoinError;
use tracing::{Event, Level, Subscriber, debug, error};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info,tip_ui=debug";

// --- Formatter ---

struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
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
        let ansi = writer.has_ansi_escapes();

        if ansi {
            write!(writer, "\x1b[2m")?
        }
        write!(writer, "{} ", Local::now().format("%H:%M:%S%.3f"))?;
        if ansi {
            write!(writer, "\x1b[0m")?
        }

        let (pre, post) = if ansi {
            match *meta.level() {
                Level::ERROR => ("\x1b[1;31m", "\x1b[0m"),
                Level::WARN => ("\x1b[1;33m", "\x1b[0m"),
                Level::INFO => ("\x1b[1;32m", "\x1b[0m"),
                Level::DEBUG => ("\x1b[1;34m", "\x1b[0m"),
                Level::TRACE => ("\x1b[1;35m", "\x1b[0m"),
            }
        } else {
            ("", "")
        };
        write!(writer, "{}{:>5}{} ", pre, meta.level(), post)?;

        if ansi {
            write!(writer, "\x1b[36m{}\x1b[0m ", meta.target())?;
        } else {
            write!(writer, "{} ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

/// A MakeWriter that can be pointed at a file after initialization.
/// While no file is set, all writes are discarded.
#[derive(Clone)]
struct FileSlot(Arc<Mutex<Option<File>>>);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(lock_slot(&self.0))
    }
}

fn lock_slot(slot: &Mutex<Option<File>>) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

// --- Statics ---

type SetStrFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static SET_LOG_LEVEL: OnceLock<SetStrFn> = OnceLock::new();
static FILE_SLOT: OnceLock<Arc<Mutex<Option<File>>>> = OnceLock::new();

fn parse_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))
}

/// `RUST_LOG` wins, then the configured level, then the built-in default.
/// An unparsable configured level is reported on stderr.
fn make_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match level.map(parse_filter) {
        Some(Ok(filter)) => filter,
        Some(Err(error)) => {
            eprintln!("{error}; falling back to '{DEFAULT_FILTER}'");
            EnvFilter::new(DEFAULT_FILTER)
        }
        None => EnvFilter::new(DEFAULT_FILTER),
    })
}

fn store_level_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = SET_LOG_LEVEL.set(Box::new(move |level_str: &str| {
        let filter = parse_filter(level_str)?;
        handle
            .reload(filter)
            .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
    }));
}

// --- Public API ---

/// Changes the active log filter at runtime.
/// Accepts a bare level ("error", "warn", "info", "debug", "trace")
/// or any full EnvFilter directive.
pub fn set_log_level(level: &str) -> Result<()> {
    match SET_LOG_LEVEL.get() {
        Some(f) => f(level),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Starts appending log output to `path`. If a file is already open it is
/// replaced. The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            *lock_slot(slot) = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Closes the current log file. Later records go to stderr only.
pub fn disable_file_logging() {
    if let Some(slot) = FILE_SLOT.get() {
        *lock_slot(slot) = None;
    }
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped.
/// - File: inactive until `enable_file_logging()` is called.
/// - Level: `RUST_LOG` if set, else `level`, else `info,tip_ui=debug`.
pub fn init_default_logging(level: Option<&str>) {
    let file_inner: Arc<Mutex<Option<File>>> = Arc::new(Mutex::new(None));
    let _ = FILE_SLOT.set(file_inner.clone());

    let (level_filter, level_handle) = reload::Layer::new(make_filter(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file_inner));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_level_handle(level_handle);
    }
}

/// Logs how a background task ended. Cancellation is expected at shutdown
/// and only shows at debug level; a panic is an error.
pub fn log_task_error(
    task_name: &'static str,
    result: Result<(), JoinError>,
) {
    match result {
        Ok(()) => {}
        Err(join_error) if join_error.is_cancelled() => {
            debug!(task = task_name, "background task cancelled");
        }
        Err(join_error) => error!(task = task_name, error = %join_error, "background task failed"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&lock_captured(&self.0)).into_owned()
        }
    }

    impl Write for Captured {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            lock_captured(&self.0).extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lock_captured(buf: &Mutex<Vec<u8>>) -> MutexGuard<'_, Vec<u8>> {
        buf.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn init_capturing_tracing(captured: &Captured) -> tracing::subscriber::DefaultGuard {
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[tokio::test]
    async fn panicked_task_is_logged_as_an_error() {
        let captured = Captured::default();
        let _guard = init_capturing_tracing(&captured);

        let result = tokio::spawn(async {
            panic!("calculation blew up");
        })
        .await;
        log_task_error("combine_latest", result);

        let text = captured.text();
        assert!(text.contains("ERROR"), "{text}");
        assert!(text.contains("background task failed"), "{text}");
        assert!(text.contains("combine_latest"), "{text}");
    }

    #[tokio::test]
    async fn cancelled_task_is_not_an_error() {
        let captured = Captured::default();
        let _guard = init_capturing_tracing(&captured);

        let task = tokio::spawn(std::future::pending::<()>());
        task.abort();
        log_task_error("bill_normalizer", task.await);

        let text = captured.text();
        assert!(!text.contains("ERROR"), "{text}");
        assert!(text.contains("background task cancelled"), "{text}");
    }

    #[test]
    fn finished_task_logs_nothing() {
        let captured = Captured::default();
        let _guard = init_capturing_tracing(&captured);

        log_task_error("reset_coordinator", Ok(()));

        assert_eq!(captured.text(), "");
    }

    #[test]
    fn bad_level_is_rejected() {
        let error = parse_filter("tip_ui=loud").err().map(|e| e.to_string());

        assert!(
            error
                .as_deref()
                .is_some_and(|e| e.starts_with("invalid log level 'tip_ui=loud'")),
            "{error:?}"
        );
        assert!(parse_filter("warn,tip_core=debug").is_ok());
    }
}
