pub mod async_util;
pub mod client;
pub mod download;
pub mod error;
pub mod export;
pub mod settings;
pub mod types;

pub use client::PlexClient;
pub use download::{AssetOutcome, AssetReport, AssetSource, DownloadReport, Downloader};
pub use error::{DownloadError, SettingsError};
pub use export::{ExportEvent, ExportOptions, LibrarySummary, export_libraries, export_library};
pub use settings::{
    ALL_LIBRARIES, DEFAULT_URL, ExportConfig, ServerSettings, load_server_settings, settings_path,
};
