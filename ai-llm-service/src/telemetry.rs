use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Crate target prefix of this library.
pub const TARGET_PREFIX: &str = "ai_llm_service";

/// Where the formatted events go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sink {
    /// Servers: logs are the primary output.
    Stdout,
    /// CLIs: keep stdout for answers.
    Stderr,
}

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Build a formatting layer that renders ONLY events whose target starts with
/// one of `targets` (crate names in snake_case, e.g. `["ai_llm_service", "api"]`).
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line`
/// - Span close events (duration at the end of instrumented spans)
/// - ANSI colors only when the sink is a terminal
pub fn layer<S>(targets: &'static [&'static str], sink: Sink) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let (use_ansi, writer) = match sink {
        Sink::Stdout => (io::stdout().is_terminal(), BoxMakeWriter::new(io::stdout)),
        Sink::Stderr => (io::stderr().is_terminal(), BoxMakeWriter::new(io::stderr)),
    };

    let only_ours =
        filter::filter_fn(move |meta| targets.iter().any(|t| meta.target().starts_with(t)));

    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_source_location(true);

    fmt::layer()
        .with_writer(writer)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(format)
        .with_filter(only_ours)
}

/// Level directive for one crate target, e.g. `ai_llm_service=debug`.
///
/// # Errors
/// Fails only if `target` is not a valid directive target.
pub fn level_directive(
    target: &str,
    level: Level,
) -> Result<Directive, tracing_subscriber::filter::ParseError> {
    let s = format!("{target}={}", level.as_str().to_lowercase());
    Directive::from_str(&s)
}

/// `RUST_LOG` if set, otherwise `default`; this library is additionally
/// raised to `level`.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    match level_directive(TARGET_PREFIX, level) {
        Ok(d) => base.add_directive(d),
        Err(_) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_is_lowercase_target_level() {
        let d = level_directive(TARGET_PREFIX, Level::DEBUG).unwrap();
        assert_eq!(d.to_string().to_lowercase(), "ai_llm_service=debug");
    }
}
