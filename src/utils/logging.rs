//! Diagnostic logging setup.
//!
//! Interactive prompts share the terminal with log output, so `--log <FILE>`
//! sends everything to a file instead of stderr. `RUST_LOG` picks the
//! filter; without it only warnings are shown.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. Calling it twice is harmless; the second
/// call keeps the first subscriber.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    let result = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logging already initialised");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn log_file_is_created_on_open() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("roomchat.log");

        open_log_file(&path).expect("log file should open");
        assert!(path.exists());
    }

    #[test]
    fn log_file_in_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing").join("roomchat.log");

        assert!(init_logging(Some(&path)).is_err());
    }
}
