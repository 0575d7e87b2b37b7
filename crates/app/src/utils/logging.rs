use std::time::Duration;

use salesdesk_domain::SalesDeskError;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the configured
/// level one step. Calling this twice is harmless.
pub fn init_tracing(configured_level: &str, verbose: u8, json: bool) {
    let level = match verbose {
        0 => configured_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
    };
    if result.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Log the outcome of a shell command with structured fields.
///
/// # Parameters
/// * `command` - Shell command name (e.g. `"price"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - The error the command ended with, if any.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&SalesDeskError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => {
            warn!(command, duration_ms, error_type = error_label(err), "command_execution_failure");
        }
    }
}

/// Convert a `SalesDeskError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &SalesDeskError) -> &'static str {
    error.label()
}
