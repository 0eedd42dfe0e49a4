//! Tracing subscriber setup.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ZFINDER_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Discard output; the terminal UI owns the screen.
    Silent,
}

/// Install the global subscriber. Filter directives come from `ZFINDER_LOG`.
///
/// For [`LogTarget::File`] the returned guard flushes the background writer on drop and
/// must be held until the process exits.
pub fn init(target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let mut guard = None;
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let appender = file_appender(&path)?;
            let (writer, worker) = tracing_appender::non_blocking(appender);
            guard = Some(worker);
            builder.with_ansi(false).with_writer(writer).try_init()
        }
        LogTarget::Silent => builder.with_writer(io::sink).try_init(),
    };

    if let Err(err) = installed {
        // A subscriber is already active, e.g. when embedded in tests.
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
    Ok(guard)
}

/// Non-rotating appender writing to exactly `path`.
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
