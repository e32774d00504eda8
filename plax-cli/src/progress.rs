//! One progress bar per library.
//!
//! Bars start in a "preparing" state while the library's catalog is walked,
//! get their length once the content list is known, and advance for every
//! item exported without a failed asset.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use plax_core::Library;
use plax_export::ExportEvent;

/// Shared bar container; hidden in quiet mode.
pub(crate) fn multi_progress(quiet: bool) -> MultiProgress {
    if quiet {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::stderr())
    }
}

pub(crate) struct LibraryBars {
    bars: Vec<ProgressBar>,
    failed: Vec<usize>,
}

impl LibraryBars {
    pub(crate) fn new(mp: &MultiProgress, libraries: &[Library]) -> Self {
        let width = libraries
            .iter()
            .map(|l| l.title.chars().count())
            .max()
            .unwrap_or(0);
        let template = format!(
            "  {{prefix:<{width}}} {{pos:>4}}/{{len:<4}} [{{elapsed_precise}}] {{bar:32.cyan/blue}} {{msg}}"
        );
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");

        let bars = libraries
            .iter()
            .map(|library| {
                let pb = mp.add(ProgressBar::new(0));
                pb.set_style(style.clone());
                pb.set_prefix(library.title.clone());
                pb.set_message("preparing");
                pb
            })
            .collect();

        Self {
            bars,
            failed: vec![0; libraries.len()],
        }
    }

    pub(crate) fn handle(&mut self, event: &ExportEvent) {
        match event {
            ExportEvent::Listing { library } => {
                if let Some(pb) = self.bars.get(*library) {
                    pb.enable_steady_tick(std::time::Duration::from_millis(250));
                }
            }
            ExportEvent::Listed { library, total } => {
                if let Some(pb) = self.bars.get(*library) {
                    pb.set_length(*total as u64);
                    pb.set_message("");
                }
            }
            ExportEvent::ItemExported { library, .. } => {
                if let Some(pb) = self.bars.get(*library) {
                    pb.inc(1);
                }
            }
            ExportEvent::ItemFailed { library, .. } => {
                if let (Some(pb), Some(failed)) =
                    (self.bars.get(*library), self.failed.get_mut(*library))
                {
                    *failed += 1;
                    pb.set_message(format!("{} failed", failed));
                }
            }
            ExportEvent::ListingFailed { library, .. } => {
                if let Some(pb) = self.bars.get(*library) {
                    pb.disable_steady_tick();
                    pb.abandon_with_message("listing failed");
                }
            }
            ExportEvent::Finished { library } => {
                let failed = self.failed.get(*library).copied().unwrap_or(0);
                if let Some(pb) = self.bars.get(*library) {
                    pb.disable_steady_tick();
                    if pb.is_finished() {
                        return;
                    }
                    if failed > 0 {
                        pb.abandon_with_message(format!("done, {} failed", failed));
                    } else {
                        pb.finish_with_message("done");
                    }
                }
            }
        }
    }

    /// Stop any bar that never got a `Finished` event.
    pub(crate) fn finish(&self) {
        for pb in &self.bars {
            if !pb.is_finished() {
                pb.abandon();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use plax_core::LibraryType;

    use super::*;

    fn libraries() -> Vec<Library> {
        ["Movies", "TV Shows"]
            .iter()
            .enumerate()
            .map(|(i, title)| Library {
                title: title.to_string(),
                key: i.to_string(),
                kind: LibraryType::Movie,
            })
            .collect()
    }

    #[test]
    fn bars_follow_library_events() {
        let mp = multi_progress(true);
        let mut bars = LibraryBars::new(&mp, &libraries());

        bars.handle(&ExportEvent::Listing { library: 0 });
        bars.handle(&ExportEvent::Listed {
            library: 0,
            total: 3,
        });
        bars.handle(&ExportEvent::ItemExported {
            library: 0,
            title: "Heat".into(),
        });
        bars.handle(&ExportEvent::ItemFailed {
            library: 0,
            title: "Ronin".into(),
            reason: "poster: asset fetch failed".into(),
        });
        bars.handle(&ExportEvent::ListingFailed {
            library: 1,
            reason: "catalog unreachable".into(),
        });

        assert_eq!(bars.bars[0].length(), Some(3));
        assert_eq!(bars.bars[0].position(), 1);
        assert_eq!(bars.failed[0], 1);
        assert!(bars.bars[1].is_finished());

        bars.handle(&ExportEvent::Finished { library: 0 });
        bars.handle(&ExportEvent::Finished { library: 1 });
        assert!(bars.bars[0].is_finished());
    }

    #[test]
    fn unknown_library_index_is_ignored() {
        let mp = multi_progress(true);
        let mut bars = LibraryBars::new(&mp, &libraries());
        bars.handle(&ExportEvent::ItemExported {
            library: 7,
            title: "x".into(),
        });
        bars.handle(&ExportEvent::Finished { library: 7 });
        bars.finish();
        assert!(bars.bars.iter().all(|pb| pb.is_finished()));
    }
}
