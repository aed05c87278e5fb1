//! Logging infrastructure for the inventory tool.
//!
//! Components never configure logging themselves: they emit `tracing` events
//! and spans, and the binary installs the subscriber once at startup. All
//! output goes to stderr so stdout stays clean for answers and JSON.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// Span close events are emitted with their busy/idle time, which is how each
/// stock and bridge operation reports its execution time.
///
/// # Arguments
/// * `log_level` - Optional filter override (e.g., "debug", "inventory_stock=trace")
/// * `no_color` - Disable colored output
///
/// # Example
/// ```no_run
/// use inventory_core::logging::init_logging;
///
/// init_logging(None, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(!no_color && supports_color());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

/// Check if colored output is allowed by the environment.
fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}
