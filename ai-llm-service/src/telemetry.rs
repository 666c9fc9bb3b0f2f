use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the crates that make up the question-generation service.
///
/// `tower_http` is included so request spans from the HTTP trace layer show up
/// next to the application events.
pub const TARGET_PREFIXES: &[&str] = &[
    "quizgen_backend",
    "api",
    "question_gen",
    "services",
    "ai_llm_service",
    "tower_http",
];

/// RFC3339 UTC timer implemented via `chrono` (no extra features).
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

/// `true` if `target` belongs to one of the service crates.
pub fn is_service_target(target: &str) -> bool {
    TARGET_PREFIXES.iter().any(|p| {
        target == *p
            || target
                .strip_prefix(p)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Build a **service-scoped** formatting layer that renders ONLY events emitted by
/// the service crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format
/// - `file:line` and target (module path)
/// - Span close events (duration at the end of spans)
/// - ANSI colors only when stdout is a terminal
///
/// This layer uses a per-event filter so it does **not** render logs from
/// third-party crates (hyper, reqwest, ...).
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_service = filter::filter_fn(|meta| is_service_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_service)
}

/// Helper to build a level directive for a single crate target.
/// Example: `level_directive("question_gen", Level::DEBUG)` → `question_gen=debug`.
pub fn level_directive(target: &str, level: Level) -> Option<Directive> {
    let s = format!("{target}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).ok()
}

/// Convenience: create an EnvFilter from `RUST_LOG` or the fallback `default`,
/// then raise the normalization crate to `level` so fallback decisions are visible.
///
/// Example: `default = "info"`, `level = Level::DEBUG` displays all logs at INFO
/// globally and DEBUG for `question_gen` only.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    match level_directive("question_gen", level) {
        Some(d) => base.add_directive(d),
        None => base,
    }
}
