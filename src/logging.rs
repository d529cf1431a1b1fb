use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{MakeWriterExt, Tee};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the file appender's worker alive; drop it last to flush.
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

fn log_dir() -> Option<PathBuf> {
    zplay::kernel::services::adapters::ensure_log_dir()
        .or_else(|_| -> std::io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("zplay").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .ok()
}

/// Daily rolling `zplay.log` in `dir`, duplicated into `console`.
fn tee_to_file<C>(
    dir: &Path,
    console: C,
) -> (Tee<tracing_appender::non_blocking::NonBlocking, C>, WorkerGuard)
where
    C: for<'a> MakeWriter<'a>,
{
    let file_appender = tracing_appender::rolling::daily(dir, "zplay.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    (non_blocking.and(console), guard)
}

/// Installs the global subscriber. Events go to stderr and, when a log
/// directory is writable, to a daily rolling `zplay.log` as well.
pub fn init() -> Option<LoggingGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zplay=info"));
    let fmt = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let log_dir = log_dir();
    let (installed, file_guard) = match &log_dir {
        Some(dir) => {
            let (writer, guard) = tee_to_file(dir, std::io::stderr);
            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt.with_writer(writer))
                .try_init()
                .is_ok();
            (installed, Some(guard))
        }
        None => {
            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt.with_writer(std::io::stderr))
                .try_init()
                .is_ok();
            (installed, None)
        }
    };
    if !installed {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    match &log_dir {
        Some(dir) => tracing::info!(log_dir = %dir.display(), "tracing initialized"),
        None => tracing::warn!("no writable log dir, logging to stderr only"),
    }

    Some(LoggingGuard { _file: file_guard })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
