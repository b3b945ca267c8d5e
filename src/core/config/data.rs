use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::constants::DEFAULT_BASE_URL;
use crate::utils::url::normalize_base_url;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the chat API, e.g. `https://chat.example/api`
    pub base_url: Option<String>,
    /// Keep the session in the OS keyring. When disabled the session only
    /// lasts for one invocation.
    pub use_keyring: Option<bool>,
}

impl Config {
    /// Picks the base URL: explicit flag, then environment, then config
    /// file, then the built-in default. Blank values are skipped.
    pub fn resolve_base_url(&self, flag: Option<&str>, env: Option<&str>) -> String {
        [flag, env, self.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(normalize_base_url)
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn keyring_enabled(&self) -> bool {
        self.use_keyring.unwrap_or(true)
    }
}

/// Get a user-friendly display string for a path, using `~` for the home
/// directory on Unix-like systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = std::path::PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
