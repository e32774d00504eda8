use std::path::PathBuf;

/// Errors that can occur while exporting a single asset.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("asset fetch failed: {reason}")]
    AssetFetch { url: String, reason: String },

    #[error("error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssetFetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors resolving the server URL and token at startup.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing token. Pass --token, set PLEX_TOKEN, or add it to {}", path.display())]
    MissingToken { path: PathBuf },

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
