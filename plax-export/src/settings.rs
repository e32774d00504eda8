//! Server URL and token resolution.
//!
//! Flags and environment variables are handled by the CLI; anything they
//! leave unset falls back to `~/.config/plax/settings.toml`:
//!
//! ```toml
//! [server]
//! url = "http://192.168.1.20:32400"
//! token = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SettingsError;

/// Server URL used when neither flag, env nor settings file provide one.
pub const DEFAULT_URL: &str = "http://127.0.0.1:32400";

/// Library filter that selects every library.
pub const ALL_LIBRARIES: &str = "all";

/// Canonical path to the settings file: `~/.config/plax/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("plax").join("settings.toml")
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    server: Option<ServerSettings>,
}

/// The `[server]` table of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    pub url: Option<String>,
    pub token: Option<String>,
}

/// Read the `[server]` table from `path`. A missing file is not an error.
pub fn load_server_settings(path: &Path) -> Result<ServerSettings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ServerSettings::default());
        }
        Err(e) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let file: SettingsFile = toml::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(file.server.unwrap_or_default())
}

/// Everything an export run needs, after all fallbacks are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Base URL without a trailing `/`.
    pub url: String,
    pub token: String,
    /// Library title to export, or `all`.
    pub library: String,
    pub dry_run: bool,
}

impl ExportConfig {
    /// Merge CLI values with the settings file.
    ///
    /// Priority: CLI/env > settings file > [`DEFAULT_URL`]. The token has no
    /// default. `settings_path` is only used in error messages.
    pub fn resolve(
        url: Option<String>,
        token: Option<String>,
        library: Option<String>,
        dry_run: bool,
        file: &ServerSettings,
        settings_path: &Path,
    ) -> Result<Self, SettingsError> {
        let url = non_empty(url)
            .or_else(|| non_empty(file.url.clone()))
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let url = validate_url(&url)?;

        let token = non_empty(token)
            .or_else(|| non_empty(file.token.clone()))
            .ok_or_else(|| SettingsError::MissingToken {
                path: settings_path.to_path_buf(),
            })?;

        let library = non_empty(library).unwrap_or_else(|| ALL_LIBRARIES.to_string());

        Ok(Self {
            url,
            token,
            library,
            dry_run,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(url: &str) -> Result<String, SettingsError> {
    let invalid = |reason: String| SettingsError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = reqwest::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
