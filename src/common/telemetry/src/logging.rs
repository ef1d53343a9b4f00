use std::str::FromStr;
use std::sync::Once;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const LOG_LEVEL_ENV: &str = "SPOTS_LOG_LEVEL";
const DEFAULT_DIRECTIVES: &str = "info";

/// Installs the global subscriber: stdout through a non-blocking writer,
/// filtered by [`env_filter`]. The returned guards flush the writer when
/// dropped, so binaries must hold them until exit.
pub fn init_logging() -> Vec<WorkerGuard> {
    let (stdout_write, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let stdout_layer = fmt::layer()
        .with_writer(stdout_write)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .with_filter(env_filter());

    let subscriber = Registry::default().with(stdout_layer);
    // the console layer sees every span; only stdout is filtered
    #[cfg(feature = "console")]
    let subscriber = subscriber.with(console_subscriber::spawn());
    tracing::subscriber::set_global_default(subscriber)
        .expect("global tracing subscriber already set");

    vec![stdout_guard]
}

/// Test harness variant of [`init_logging`]; safe to call from every test.
/// Output goes through the libtest writer so it is captured per test.
pub fn init_test_logging() {
    static START: Once = Once::new();

    START.call_once(|| {
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(false)
            .with_filter(env_filter());
        if tracing::subscriber::set_global_default(Registry::default().with(layer)).is_err() {
            tracing::debug!("global tracing subscriber already set, keeping it");
        }
    });
}

fn env_filter() -> EnvFilter {
    let directives = filter_directives(|key| std::env::var(key).ok());
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// `RUST_LOG` wins when set; otherwise the single level named by
/// `SPOTS_LOG_LEVEL`, INFO when that is unset or not a level.
fn filter_directives<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(directives) = lookup(EnvFilter::DEFAULT_ENV).filter(|d| !d.trim().is_empty()) {
        return directives;
    }

    lookup(LOG_LEVEL_ENV)
        .and_then(|level| Level::from_str(level.trim()).ok())
        .map_or_else(|| DEFAULT_DIRECTIVES.to_owned(), |level| level.as_str().to_ascii_lowercase())
}
