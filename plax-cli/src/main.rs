//! plax CLI
//!
//! Plex Local Asset eXporter: writes each item's poster and background next
//! to its media files.

mod commands;
mod error;
mod logger;
mod progress;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use commands::export::{ExportArgs, run_export};

#[derive(Parser)]
#[command(name = "plax", version)]
#[command(about = "Plex Local Asset eXporter", long_about = "Export posters and background assets from Plex")]
struct Cli {
    /// Plex base URL [default: http://127.0.0.1:32400]
    #[arg(short, long, env = "PLEX_URL")]
    url: Option<String>,

    /// Plex authentication token
    #[arg(short, long, env = "PLEX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Export assets from the named library
    #[arg(short, long, default_value = "all")]
    library: String,

    /// Print assets to be exported without exporting them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Only show warnings, errors and dry-run plans (hides progress bars)
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mp = progress::multi_progress(cli.quiet);
    logger::init(
        mp.clone(),
        &logger::default_filter(cli.quiet, cli.verbose, cli.dry_run),
        cli.verbose,
    );

    let args = ExportArgs {
        url: cli.url,
        token: cli.token,
        library: cli.library,
        dry_run: cli.dry_run,
    };

    match run_export(args, &mp) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} {}", "\u{2718}".if_supports_color(Stderr, |t| t.red()), e);
            ExitCode::FAILURE
        }
    }
}
