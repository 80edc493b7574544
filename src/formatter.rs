//! Custom tracing formatter that stamps every line with the current game tick.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

use crate::constants::Ticks;

/// The game tick most recently published by the host loop.
static CURRENT_TICK: AtomicU64 = AtomicU64::new(0);

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

/// ANSI styles used by the formatter.
#[derive(Clone, Copy)]
enum Style {
    Dimmed,
    Bold,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Dimmed => "\x1b[2m",
            Style::Bold => "\x1b[1m",
        }
    }
}

fn write_styled(writer: &mut Writer<'_>, style: Style, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{}{}\x1b[0m", style.code(), value)
    } else {
        write!(writer, "{}", value)
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
        write!(writer, "{}{}\x1b[0m", color, text)
    } else {
        writer.write_str(text)
    }
}

/// Formats events as `time tick LEVEL spans: target: fields`.
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        write_styled(&mut writer, Style::Dimmed, timestamp)?;
        writer.write_char(' ')?;

        write_styled(&mut writer, Style::Dimmed, format_args!("#{:06}", tick()))?;
        writer.write_char(' ')?;

        write_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            let mut any = false;
            for span in scope.from_root() {
                write_styled(&mut writer, Style::Bold, span.metadata().name())?;
                if let Some(fields) = span.extensions().get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write_styled(&mut writer, Style::Bold, format_args!("{{{}}}", fields))?;
                    }
                }
                write_styled(&mut writer, Style::Dimmed, ':')?;
                any = true;
            }
            if any {
                writer.write_char(' ')?;
            }
        }

        write_styled(&mut writer, Style::Dimmed, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Publishes the current game tick. Called by the host loop once per tick.
pub fn set_tick(tick: Ticks) {
    CURRENT_TICK.store(tick, Ordering::Relaxed);
}

/// The last published game tick.
pub fn tick() -> Ticks {
    CURRENT_TICK.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_tick_round_trip() {
        set_tick(42);
        assert_eq!(tick(), 42);
    }
}
