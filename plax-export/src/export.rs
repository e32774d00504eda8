//! Per-library export workers.

use std::sync::Arc;

use plax_core::{Catalog, ExportableContent, Library, library_contents};
use tokio::sync::mpsc;

use crate::download::{AssetSource, Downloader};

/// Options for an export run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Log intended writes instead of fetching and writing.
    pub dry_run: bool,
}

/// Progress events emitted by library workers. `library` is the index of
/// the library in the slice passed to [`export_libraries`].
#[derive(Debug, Clone)]
pub enum ExportEvent {
    /// The worker is walking the library's catalog tree.
    Listing { library: usize },
    /// Content list is ready.
    Listed { library: usize, total: usize },
    /// One item finished with no failed assets.
    ItemExported { library: usize, title: String },
    /// One or more assets of an item failed (already logged).
    ItemFailed {
        library: usize,
        title: String,
        reason: String,
    },
    /// The content list could not be built; the worker stops.
    ListingFailed { library: usize, reason: String },
    /// The worker is done.
    Finished { library: usize },
}

/// Outcome of one library worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySummary {
    pub library: String,
    /// Content items found.
    pub total: usize,
    /// Items with no failed asset, including those with nothing to export.
    pub exported: usize,
    pub failed: usize,
    /// Items skipped because no media directory was found.
    pub without_directory: usize,
    pub assets_written: usize,
    pub assets_planned: usize,
    /// Set when the library could not be listed at all.
    pub listing_error: Option<String>,
}

impl LibrarySummary {
    fn new(library: &Library) -> Self {
        Self {
            library: library.title.clone(),
            ..Self::default()
        }
    }
}

/// Export every library concurrently, one task per library.
///
/// Items within a library are exported one after another. Failures never
/// cross library boundaries. Summaries come back in `libraries` order once
/// every worker has finished.
pub async fn export_libraries<C>(
    client: Arc<C>,
    libraries: &[Library],
    options: ExportOptions,
    events: mpsc::UnboundedSender<ExportEvent>,
) -> Vec<LibrarySummary>
where
    C: Catalog + AssetSource + Send + Sync + 'static,
{
    let handles: Vec<_> = libraries
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, library)| {
            let client = client.clone();
            let events = events.clone();
            tokio::spawn(async move {
                export_library(client.as_ref(), index, &library, options, &events).await
            })
        })
        .collect();
    drop(events);

    let results = futures::future::join_all(handles).await;

    results
        .into_iter()
        .zip(libraries)
        .map(|(result, library)| match result {
            Ok(summary) => summary,
            Err(e) => {
                log::error!("Export worker for {} stopped: {}", library.title, e);
                LibrarySummary {
                    listing_error: Some(e.to_string()),
                    ..LibrarySummary::new(library)
                }
            }
        })
        .collect()
}

/// Export one library: list its content, then download item by item.
pub async fn export_library<C>(
    client: &C,
    index: usize,
    library: &Library,
    options: ExportOptions,
    events: &mpsc::UnboundedSender<ExportEvent>,
) -> LibrarySummary
where
    C: Catalog + AssetSource + Sync,
{
    let mut summary = LibrarySummary::new(library);
    let _ = events.send(ExportEvent::Listing { library: index });

    let contents = match library_contents(client, library).await {
        Ok(contents) => contents,
        Err(e) => {
            log::error!(
                "Error retrieving contents of {} ({}): {}",
                library.title,
                library.kind,
                e
            );
            let reason = e.to_string();
            let _ = events.send(ExportEvent::ListingFailed {
                library: index,
                reason: reason.clone(),
            });
            let _ = events.send(ExportEvent::Finished { library: index });
            summary.listing_error = Some(reason);
            return summary;
        }
    };

    summary.total = contents.len();
    let _ = events.send(ExportEvent::Listed {
        library: index,
        total: contents.len(),
    });

    let downloader = Downloader::new(client, options.dry_run);
    for content in &contents {
        export_item(&downloader, index, content, &mut summary, events).await;
    }

    log::debug!(
        "{}: {} exported, {} failed",
        library.title,
        summary.exported,
        summary.failed
    );
    let _ = events.send(ExportEvent::Finished { library: index });
    summary
}

async fn export_item<S: AssetSource + Sync>(
    downloader: &Downloader<'_, S>,
    index: usize,
    content: &ExportableContent,
    summary: &mut LibrarySummary,
    events: &mpsc::UnboundedSender<ExportEvent>,
) {
    if content.directory.is_none() {
        summary.without_directory += 1;
    }

    let report = downloader.download(content).await;
    summary.assets_written += report.written();
    summary.assets_planned += report.planned();

    if report.is_success() {
        summary.exported += 1;
        let _ = events.send(ExportEvent::ItemExported {
            library: index,
            title: report.title,
        });
    } else {
        summary.failed += 1;
        let reason = report
            .failures()
            .map(|(asset, e)| format!("{}: {}", asset.kind.label(), e))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = events.send(ExportEvent::ItemFailed {
            library: index,
            title: report.title,
            reason,
        });
    }
}
