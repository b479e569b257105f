// ── Logging ───────────────────────────────────────────────────────────────────
//
// `tracing` events go to stderr through a fmt subscriber.  Release builds on
// Windows have no console, so the output is only visible when launched from
// a terminal or with stderr redirected.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "notepad_dark=info";

/// Install the global subscriber.  Calling it twice is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
        tracing::info!("logging initialised twice");
    }
}
