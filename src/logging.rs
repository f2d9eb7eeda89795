//! Log output: a compact formatter that stamps every line with the simulation frame.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Frame number shown in log lines, published by the scheduler.
static FRAME: AtomicU64 = AtomicU64::new(0);

/// Frames wrap at 16 bits in the log prefix.
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

static SUBSCRIBER_INIT: Once = Once::new();

pub fn set_frame(frame: u64) {
    FRAME.store(frame, Ordering::Relaxed);
}

pub fn frame() -> u64 {
    FRAME.load(Ordering::Relaxed)
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Only the first call has any effect.
pub fn setup_logging(default_filter: &str) {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(true)
            .event_format(FrameFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Could not install log subscriber: {e}");
        }
    });
}

/// `HH:MM:SS.ffff 0xFRAME LEVEL span{fields}: target: fields`
pub struct FrameFormatter;

impl<S, N> FormatEvent<S, N> for FrameFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        write_dimmed(&mut writer, timestamp)?;
        writer.write_char(' ')?;
        write_dimmed(&mut writer, format_args!("0x{:04X}", frame() & FRAME_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        write_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.metadata().name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                writer.write_str(": ")?;
            }
        }

        write_dimmed(&mut writer, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn write_level(writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
    let (color, text) = match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    };
    if writer.has_ansi_escapes() {
        write!(writer, "{color}{text}\x1b[0m")
    } else {
        writer.write_str(text)
    }
}

fn write_dimmed(writer: &mut Writer<'_>, s: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "\x1b[2m{s}\x1b[0m")
    } else {
        write!(writer, "{s}")
    }
}
