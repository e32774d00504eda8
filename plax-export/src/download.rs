use std::future::Future;
use std::path::{Path, PathBuf};

use plax_core::{AssetKind, ExportableContent};

use crate::error::DownloadError;

/// Where asset bytes come from.
pub trait AssetSource {
    /// Absolute URL for a server-relative asset path.
    fn asset_url(&self, asset_path: &str) -> String;

    /// Fetch an asset's bytes. Anything but a 200 response is an error.
    fn fetch_asset(
        &self,
        asset_path: &str,
    ) -> impl Future<Output = Result<Vec<u8>, DownloadError>> + Send;
}

/// What happened to one asset.
#[derive(Debug)]
pub enum AssetOutcome {
    /// Fetched and written to disk.
    Written { bytes: usize },
    /// Dry run: would have fetched `url`.
    Planned { url: String },
}

#[derive(Debug)]
pub struct AssetReport {
    pub kind: AssetKind,
    pub dest: PathBuf,
    pub result: Result<AssetOutcome, DownloadError>,
}

/// Result of exporting one content item.
#[derive(Debug)]
pub struct DownloadReport {
    pub title: String,
    /// One entry per attempted asset, background first.
    pub assets: Vec<AssetReport>,
}

impl DownloadReport {
    /// No asset failed. Items with no directory count as successful.
    pub fn is_success(&self) -> bool {
        self.assets.iter().all(|a| a.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&AssetReport, &DownloadError)> {
        self.assets
            .iter()
            .filter_map(|a| a.result.as_ref().err().map(|e| (a, e)))
    }

    pub fn written(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| matches!(a.result, Ok(AssetOutcome::Written { .. })))
            .count()
    }

    pub fn planned(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| matches!(a.result, Ok(AssetOutcome::Planned { .. })))
            .count()
    }
}

/// Writes a content item's background and poster/cover into its directory.
pub struct Downloader<'a, S> {
    source: &'a S,
    dry_run: bool,
}

impl<'a, S: AssetSource + Sync> Downloader<'a, S> {
    pub fn new(source: &'a S, dry_run: bool) -> Self {
        Self { source, dry_run }
    }

    /// Export both assets of `content`.
    ///
    /// Content without a directory is a no-op. A failed asset is logged and
    /// recorded; the sibling asset is still attempted.
    pub async fn download(&self, content: &ExportableContent) -> DownloadReport {
        let mut report = DownloadReport {
            title: content.title.clone(),
            assets: Vec::new(),
        };

        let Some(dir) = content.directory.as_deref() else {
            log::debug!("{}: no media directory, skipping assets", content.title);
            return report;
        };

        for (kind, asset_path) in content.assets() {
            let dest = dir.join(kind.file_name(&content.kind));
            let result = self.download_asset(asset_path, &dest).await;
            if let Err(ref e) = result {
                log::error!(
                    "Error downloading {} for {}: {}",
                    kind.label(),
                    content.title,
                    e
                );
            }
            report.assets.push(AssetReport { kind, dest, result });
        }

        report
    }

    async fn download_asset(
        &self,
        asset_path: &str,
        dest: &Path,
    ) -> Result<AssetOutcome, DownloadError> {
        let url = self.source.asset_url(asset_path);

        if self.dry_run {
            log::info!("Saving {} to {}", url, dest.display());
            return Ok(AssetOutcome::Planned { url });
        }

        let bytes = self.source.fetch_asset(asset_path).await?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DownloadError::io(parent, e))?;
        }
        std::fs::write(dest, &bytes).map_err(|e| DownloadError::io(dest, e))?;

        Ok(AssetOutcome::Written { bytes: bytes.len() })
    }
}

#[cfg(test)]
#[path = "tests/download_tests.rs"]
mod tests;
