//! Logging setup for hosts that let mediabase own the global subscriber.
//!
//! The library itself only emits `tracing` events. Hosts with their own
//! subscriber skip [`init`]; calling it after one is installed returns
//! [`MediaError::Config`].

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::{MediaError, Result};

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn open_log_file(path: &str) -> Result<Option<Arc<File>>> {
    if path.is_empty() {
        return Ok(None);
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(Some(Arc::new(File::create(path)?)))
}

/// Install the global subscriber described by `config`.
///
/// Events go to stdout, and also to `config.file` when it is set. Fails if a
/// global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(&config.level).into());
    let file_layer = open_log_file(&config.file)?.map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout).with_target(true))
        .with(file_layer)
        .try_init()
        .map_err(|e| MediaError::Config(format!("cannot install log subscriber: {e}")))
}
