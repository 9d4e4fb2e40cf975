//! Logging Setup
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (from `RUST_LOG`,
//! falling back to the configured level) and a `fmt` layer writing either
//! human-readable or JSON lines.
//!
//! The terminal dashboard owns the screen, so it always logs to a file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;

/// Logging setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to open log file {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install logger: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Default log file for the terminal dashboard
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("covid-dashboard").join("dashboard.log"))
}

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(level: &str) -> String {
    format!("covid_dashboard={level},covid_cli={level}")
}

/// Install the global subscriber
///
/// Logs go to `config.file` if set, else to `fallback_file` if given, else
/// to stderr.
pub fn init(config: &LoggingConfig, fallback_file: Option<PathBuf>) -> Result<(), LoggingError> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_directive(&config.level)),
    );

    let target = config.file.as_ref().map(PathBuf::from).or(fallback_file);
    let layer = match &target {
        Some(path) => fmt_layer(&config.format, Mutex::new(open_log_file(path)?), false),
        None => fmt_layer(&config.format, std::io::stderr, true),
    };

    tracing_subscriber::registry().with(layer).with(filter).try_init()?;

    if let Some(path) = target {
        tracing::debug!("Logging to {:?}", path);
    }
    Ok(())
}

fn fmt_layer<W>(format: &str, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);

    if format.eq_ignore_ascii_case("json") {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Open a log file for appending, creating its directory if needed
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let io_error = |source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)
}
