//! `env_logger` routed around the progress bars.
//!
//! Lines are written while the bars are suspended so they land above the
//! bars instead of tearing them.

use indicatif::MultiProgress;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

struct ProgressLogger {
    inner: env_logger::Logger,
    progress: MultiProgress,
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.inner.matches(record) {
            self.progress.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Module whose info lines are the dry-run plan.
const PLAN_TARGET: &str = "plax_export::download";

/// Default level for the given flags.
pub(crate) fn default_level(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Default filter directives. `RUST_LOG` overrides them.
///
/// A quiet dry run still prints its `Saving <url> to <path>` plan.
pub(crate) fn default_filter(quiet: bool, verbose: bool, dry_run: bool) -> String {
    let level = default_level(quiet, verbose);
    if dry_run && level < LevelFilter::Info {
        format!("{},{}=info", level.as_str().to_lowercase(), PLAN_TARGET)
    } else {
        level.as_str().to_lowercase()
    }
}

/// Install the global logger.
pub(crate) fn init(progress: MultiProgress, filter: &str, verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }

    let inner = builder.build();
    let max_level = inner.filter();
    if log::set_boxed_logger(Box::new(ProgressLogger { inner, progress })).is_ok() {
        log::set_max_level(max_level);
    }
}
