use plax_core::CatalogError;
use plax_export::SettingsError;
use thiserror::Error;

/// Startup failures. Anything that happens once the export is running is
/// logged and counted instead.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// URL, token or settings file problem
    #[error("{0}")]
    Settings(#[from] SettingsError),

    /// The server could not be reached or rejected the token
    #[error("Could not list libraries: {0}")]
    Catalog(#[from] CatalogError),

    /// The library filter matched nothing
    #[error("No libraries to export (filter: {0})")]
    NoLibraries(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
