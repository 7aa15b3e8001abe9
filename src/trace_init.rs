#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Keeps the log writer alive. Buffered lines are flushed when it is dropped,
/// so hold it until the program is about to exit.
#[must_use = "dropping the guard stops logging"]
pub struct TraceGuard {
    #[cfg(feature = "trace")]
    _worker: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Send `tracing` events to `<log_dir>/fingerwise-trace.jsonl`. The terminal
/// belongs to the UI, so nothing is ever written to stdout or stderr.
///
/// Only the first call installs the subscriber; later calls return an empty
/// guard.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> TraceGuard {
    let mut worker = None;
    INIT.call_once(|| {
        if let Err(err) = std::fs::create_dir_all(log_dir) {
            eprintln!("fingerwise: cannot create log dir {}: {err}", log_dir.display());
            return;
        }
        let file_appender = tracing_appender::rolling::never(log_dir, "fingerwise-trace.jsonl");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fingerwise=debug")),
            )
            .init();
        worker = Some(guard);
    });
    TraceGuard { _worker: worker }
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) -> TraceGuard {
    TraceGuard {}
}
