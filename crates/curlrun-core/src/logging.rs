//! Logging init. stdout carries the request report, so log lines go to a file
//! under the XDG state dir or, when that cannot be opened, to stderr. Never stdout.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. Debug lines from curlrun carry redacted argv only.
pub const DEFAULT_FILTER: &str = "info,curlrun=debug";

const LOG_FILE: &str = "curlrun.log";

/// Where log lines ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

impl fmt::Display for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::File(path) => write!(f, "{}", path.display()),
            LogSink::Stderr => f.write_str("stderr"),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish()
}

/// `~/.local/state/curlrun`.
pub fn log_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("curlrun")?;
    Ok(xdg_dirs.get_state_home())
}

/// Create `dir` if needed and open `dir/curlrun.log` for appending.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    Ok((path, file))
}

/// Install the global subscriber. Falls back to stderr when the log file
/// cannot be opened; a second call leaves the first subscriber in place.
pub fn init_logging() -> LogSink {
    match log_dir().and_then(|dir| open_log_file(&dir)) {
        Ok((path, file)) => {
            let installed =
                tracing::subscriber::set_global_default(subscriber(env_filter(), Mutex::new(file)));
            if installed.is_ok() {
                tracing::info!("curlrun logging to {}", path.display());
            }
            LogSink::File(path)
        }
        Err(err) => {
            let _ = tracing::subscriber::set_global_default(subscriber(env_filter(), io::stderr));
            tracing::warn!("log file unavailable, logging to stderr: {err:#}");
            LogSink::Stderr
        }
    }
}
