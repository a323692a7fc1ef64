//! Tracing subscriber setup: console formatter, resource file layer, and initialisation.
use std::io::Write as _;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use tracing_subscriber::{Registry, reload};

use super::utils::{format_utc_time, strip_ansi};
use crate::resources::LogSink;

/// Target for stage headers (bold on the console, `==>` in files).
pub const STAGE_TARGET: &str = "realize::stage";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends events to the `logs` and
/// `errors` resource files with timestamps and ANSI codes stripped.
///
/// The logs sink receives every event at `DEBUG` and above; the errors sink
/// receives `WARN` and `ERROR` only.
#[derive(Debug)]
pub struct SinkLayer {
    logs: Option<Mutex<LogSink>>,
    errors: Option<Mutex<LogSink>>,
}

impl SinkLayer {
    /// Create a layer writing to the given sinks.
    #[must_use]
    pub fn new(logs: Option<LogSink>, errors: Option<LogSink>) -> Self {
        Self {
            logs: logs.map(Mutex::new),
            errors: errors.map(Mutex::new),
        }
    }

    fn append(sink: Option<&Mutex<LogSink>>, line: &str) {
        if let Some(sink) = sink
            && let Ok(mut f) = sink.lock()
        {
            writeln!(f, "{line}").ok();
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SinkLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let level = *metadata.level();
        if level == tracing::Level::TRACE {
            return;
        }

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match (level, metadata.target()) {
            (tracing::Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
            (tracing::Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
            (tracing::Level::DEBUG, _) => format!("[{ts}]     [debug] {msg}"),
            _ => format!("[{ts}]     {msg}"),
        };

        Self::append(self.logs.as_ref(), &line);
        if level <= tracing::Level::WARN {
            Self::append(self.errors.as_ref(), &line);
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits realize-style
/// console output.
struct RealizeFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for RealizeFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if metadata.target() == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Handle for attaching resource sinks to the running subscriber.
#[derive(Debug, Clone)]
pub struct LogHandle {
    inner: reload::Handle<Option<SinkLayer>, Registry>,
}

impl LogHandle {
    /// Route subsequent events to `logs` and `errors`, replacing any sinks
    /// attached earlier.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscriber has been dropped.
    pub fn attach(&self, logs: Option<LogSink>, errors: Option<LogSink>) -> Result<()> {
        let layer = (logs.is_some() || errors.is_some()).then(|| SinkLayer::new(logs, errors));
        self.inner
            .reload(layer)
            .context("attaching resource files to the logger")
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a console layer that formats events in the realize output style
/// (warnings and errors to stderr, everything else to stdout) and an empty
/// file layer that [`LogHandle::attach`] fills in once the resource files
/// are open. Must be called once at program startup, before any logging.
#[must_use]
pub fn init_subscriber(verbose: bool) -> LogHandle {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(RealizeFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let (file_layer, inner) = reload::Layer::new(None::<SinkLayer>);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    LogHandle { inner }
}
