//! Session logging to a file.
//!
//! The terminal belongs to the TUI, so logs only go anywhere when a file is named on the command
//! line. `RUST_LOG` filters them, defaulting to `info`.

use crate::error::FolioError;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a global subscriber is already set.
pub fn init_tracing(path: &Path) -> Result<(), FolioError> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| FolioError::Logging(err.to_string()))
}

#[cfg(test)]
#[path = "tests/logging.rs"]
mod tests;
