use std::io;
use std::path::PathBuf;

use crate::kernel::services::adapters::AppPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// One file per process, `zcore.log.<pid>`, under `dir`.
    File { dir: PathBuf },
    Discard,
}

pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    log_file: Option<PathBuf>,
}

impl LoggingGuard {
    pub fn log_file(&self) -> Option<&std::path::Path> {
        self.log_file.as_deref()
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zcore=info"))
}

pub fn init(target: LogTarget) -> Option<LoggingGuard> {
    let guard = match target {
        LogTarget::File { dir } => {
            std::fs::create_dir_all(&dir).ok()?;
            let path = AppPaths::new(&dir).log_file(std::process::id());
            let name = path.file_name()?.to_os_string();
            let file_appender = tracing_appender::rolling::never(&dir, &name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let subscriber = tracing_subscriber::registry().with(env_filter()).with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            );
            if subscriber.try_init().is_err() {
                return None;
            }
            LoggingGuard {
                _guard: Some(guard),
                log_file: Some(path),
            }
        }
        LogTarget::Discard => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(io::sink));
            if subscriber.try_init().is_err() {
                return None;
            }
            LoggingGuard {
                _guard: None,
                log_file: None,
            }
        }
    };

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(
        log_file = ?guard.log_file.as_ref().map(|p| p.display().to_string()),
        "tracing initialized"
    );
    Some(guard)
}
