//! Diagnostic output setup.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

static LOGGING: Once = Once::new();
static PANIC_HOOK: Once = Once::new();

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call repeatedly. If the host already installed a global subscriber,
/// that one is kept.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();

        if installed.is_err() {
            tracing::debug!("Global subscriber already set, keeping it");
        }
    });
}

/// Report panics through `tracing` before the previously installed hook runs.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());

            tracing::error!(location = %location, "Panic: {}", payload);
            previous(info);
        }));
    });
}
