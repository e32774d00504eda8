use std::sync::Arc;

use indicatif::MultiProgress;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use plax_core::Catalog;
use plax_export::async_util::run_with_events;
use plax_export::{
    ExportConfig, ExportEvent, ExportOptions, LibrarySummary, PlexClient, export_libraries,
    load_server_settings, settings_path,
};

use crate::error::CliError;
use crate::progress::LibraryBars;

/// Flag values before the settings-file fallback is applied.
pub(crate) struct ExportArgs {
    pub url: Option<String>,
    pub token: Option<String>,
    pub library: String,
    pub dry_run: bool,
}

/// Resolve configuration, then export every selected library.
pub(crate) fn run_export(args: ExportArgs, mp: &MultiProgress) -> Result<(), CliError> {
    let path = settings_path();
    let file = load_server_settings(&path)?;
    let config = ExportConfig::resolve(
        args.url,
        args.token,
        Some(args.library),
        args.dry_run,
        &file,
        &path,
    )?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("failed to create tokio runtime: {e}")))?;
    rt.block_on(export(config, mp))
}

async fn export(config: ExportConfig, mp: &MultiProgress) -> Result<(), CliError> {
    let client = PlexClient::new(&config.url, &config.token)?;

    let libraries = client.libraries(&config.library).await?;
    if libraries.is_empty() {
        return Err(CliError::NoLibraries(config.library));
    }

    log::info!(
        "Exporting {} {} from {}",
        libraries.len(),
        if libraries.len() == 1 { "library" } else { "libraries" },
        config.url.if_supports_color(Stderr, |t| t.cyan()),
    );
    if config.dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be downloaded".if_supports_color(Stderr, |t| t.dimmed()),
        );
    }

    let mut bars = LibraryBars::new(mp, &libraries);
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<ExportEvent>();
    let options = ExportOptions {
        dry_run: config.dry_run,
    };

    let summaries = run_with_events(
        export_libraries(Arc::new(client), &libraries, options, event_tx),
        event_rx,
        |e| bars.handle(&e),
    )
    .await;
    bars.finish();

    print_summary(&summaries, config.dry_run);
    Ok(())
}

fn print_summary(summaries: &[LibrarySummary], dry_run: bool) {
    log::info!("");
    log::info!("{}", "Summary:".if_supports_color(Stderr, |t| t.bold()));

    for s in summaries {
        if let Some(ref err) = s.listing_error {
            log::warn!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                s.library,
                err,
            );
            continue;
        }

        let assets = if dry_run {
            format!("{} assets planned", s.assets_planned)
        } else {
            format!("{} assets written", s.assets_written)
        };
        log::info!(
            "  {} {}: {}/{} items, {}",
            "\u{2714}".if_supports_color(Stderr, |t| t.green()),
            s.library.if_supports_color(Stderr, |t| t.bold()),
            s.exported,
            s.total,
            assets,
        );
        if s.without_directory > 0 {
            log::info!(
                "    {}",
                format!("{} without a media directory", s.without_directory)
                    .if_supports_color(Stderr, |t| t.dimmed()),
            );
        }
        if s.failed > 0 {
            log::warn!(
                "    {} {} items with failed assets",
                "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
                s.failed,
            );
        }
    }
}
