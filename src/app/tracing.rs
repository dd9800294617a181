use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Transport crates that are too chatty below `warn`.
const NOISY_TARGETS: [&str; 4] = ["h2=warn", "hyper=warn", "tower=warn", "tonic=warn"];

/// Initialize the tracing subscriber.
/// Uses JSON format when `RUST_LOG_FORMAT=json` (default for production).
/// The minimum level comes from `LOG_LEVEL`; `RUST_LOG` directives apply on top.
pub fn init_tracing() {
    let use_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(true); // Default to JSON for production

    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|v| parse_log_level(&v))
        .unwrap_or(LevelFilter::INFO);

    if use_json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            )
            .with(env_filter(level))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(env_filter(level))
            .init();
    }

    info!(level = %level, json = use_json, "Logger initialized");
}

fn env_filter(level: LevelFilter) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    for directive in NOISY_TARGETS {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Map a `LOG_LEVEL` value to a level filter. Unknown values yield `None`.
pub fn parse_log_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" | "t" | "0" => Some(LevelFilter::TRACE),
        "debug" | "d" | "1" => Some(LevelFilter::DEBUG),
        "info" | "information" | "i" | "2" => Some(LevelFilter::INFO),
        "warn" | "warning" | "w" | "3" => Some(LevelFilter::WARN),
        "error" | "err" | "e" | "4" => Some(LevelFilter::ERROR),
        _ => None,
    }
}
