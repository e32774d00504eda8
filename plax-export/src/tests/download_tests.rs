use std::collections::HashSet;
use std::sync::{Mutex, Once};

use plax_core::NodeKind;

use super::*;

/// Serves `<path>` bytes for every asset path except those marked failing.
#[derive(Default)]
struct FakeSource {
    failing: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

impl FakeSource {
    fn failing(paths: &[&str]) -> Self {
        Self {
            failing: paths.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl AssetSource for FakeSource {
    fn asset_url(&self, asset_path: &str) -> String {
        format!("http://plex.test{asset_path}")
    }

    async fn fetch_asset(&self, asset_path: &str) -> Result<Vec<u8>, DownloadError> {
        self.fetched.lock().unwrap().push(asset_path.to_string());
        if self.failing.contains(asset_path) {
            return Err(DownloadError::fetch(
                self.asset_url(asset_path),
                format!("GET {} returned 500", self.asset_url(asset_path)),
            ));
        }
        Ok(asset_path.as_bytes().to_vec())
    }
}

/// Records every info-or-louder line so tests can assert on them.
struct CapturedLog {
    lines: Mutex<Vec<String>>,
}

impl log::Log for CapturedLog {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURED: CapturedLog = CapturedLog {
    lines: Mutex::new(Vec::new()),
};

/// Install the capturing logger; only the first call in a test binary acts.
fn capture_log() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURED).unwrap();
        log::set_max_level(log::LevelFilter::Info);
    });
}

/// Captured lines mentioning `needle`, in log order.
fn captured_lines(needle: &str) -> Vec<String> {
    CAPTURED
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|l| l.contains(needle))
        .cloned()
        .collect()
}

fn content(kind: NodeKind, directory: Option<PathBuf>) -> ExportableContent {
    ExportableContent {
        title: "Item".to_string(),
        kind,
        directory,
        thumb: Some("/thumb".to_string()),
        art: Some("/art".to_string()),
    }
}

#[tokio::test]
async fn writes_poster_and_background() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("Movies").join("Heat (1995)");
    let source = FakeSource::default();

    let report = Downloader::new(&source, false)
        .download(&content(NodeKind::Movie, Some(dir.clone())))
        .await;

    assert!(report.is_success());
    assert_eq!(report.written(), 2);
    assert_eq!(std::fs::read(dir.join("background.jpg")).unwrap(), b"/art");
    assert_eq!(std::fs::read(dir.join("poster.jpg")).unwrap(), b"/thumb");
    assert_eq!(source.fetched(), vec!["/art", "/thumb"]);
}

#[tokio::test]
async fn album_primary_goes_to_cover() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FakeSource::default();

    Downloader::new(&source, false)
        .download(&content(NodeKind::Album, Some(tmp.path().to_path_buf())))
        .await;

    assert!(tmp.path().join("cover.jpg").exists());
    assert!(!tmp.path().join("poster.jpg").exists());
    assert!(tmp.path().join("background.jpg").exists());
}

#[tokio::test]
async fn existing_files_are_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("poster.jpg"), b"old").unwrap();
    let source = FakeSource::default();

    Downloader::new(&source, false)
        .download(&content(NodeKind::Show, Some(tmp.path().to_path_buf())))
        .await;

    assert_eq!(std::fs::read(tmp.path().join("poster.jpg")).unwrap(), b"/thumb");
}

#[tokio::test]
async fn no_directory_is_a_silent_no_op() {
    let source = FakeSource::default();

    let report = Downloader::new(&source, false)
        .download(&content(NodeKind::Season, None))
        .await;

    assert!(report.is_success());
    assert!(report.assets.is_empty());
    assert!(source.fetched().is_empty());
}

#[tokio::test]
async fn failed_background_still_attempts_poster() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FakeSource::failing(&["/art"]);

    let report = Downloader::new(&source, false)
        .download(&content(NodeKind::Movie, Some(tmp.path().to_path_buf())))
        .await;

    assert!(!report.is_success());
    assert_eq!(report.written(), 1);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.kind, AssetKind::Background);
    assert!(matches!(failures[0].1, DownloadError::AssetFetch { .. }));
    assert!(!tmp.path().join("background.jpg").exists());
    assert!(tmp.path().join("poster.jpg").exists());
}

#[tokio::test]
async fn failed_fetch_creates_no_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("never");
    let source = FakeSource::failing(&["/art", "/thumb"]);

    let report = Downloader::new(&source, false)
        .download(&content(NodeKind::Movie, Some(dir.clone())))
        .await;

    assert_eq!(report.failures().count(), 2);
    assert!(!dir.exists());
}

#[tokio::test]
async fn dry_run_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("X").join("Season 01");
    let source = FakeSource::default();
    capture_log();

    let report = Downloader::new(&source, true)
        .download(&content(NodeKind::Season, Some(dir.clone())))
        .await;

    assert!(report.is_success());
    assert_eq!(report.planned(), 2);
    assert_eq!(report.written(), 0);
    assert!(source.fetched().is_empty());
    assert!(!tmp.path().join("X").exists());

    let planned: Vec<_> = report
        .assets
        .iter()
        .map(|a| match &a.result {
            Ok(AssetOutcome::Planned { url }) => (url.clone(), a.dest.clone()),
            other => panic!("unexpected outcome: {other:?}"),
        })
        .collect();
    assert_eq!(
        planned,
        vec![
            ("http://plex.test/art".to_string(), dir.join("background.jpg")),
            ("http://plex.test/thumb".to_string(), dir.join("poster.jpg")),
        ]
    );

    let saved = captured_lines(&dir.display().to_string());
    assert_eq!(
        saved,
        vec![
            format!(
                "Saving http://plex.test/art to {}",
                dir.join("background.jpg").display()
            ),
            format!(
                "Saving http://plex.test/thumb to {}",
                dir.join("poster.jpg").display()
            ),
        ]
    );
}

#[tokio::test]
async fn missing_thumb_only_exports_background() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FakeSource::default();
    let mut item = content(NodeKind::Artist, Some(tmp.path().to_path_buf()));
    item.thumb = None;

    let report = Downloader::new(&source, false).download(&item).await;

    assert_eq!(report.assets.len(), 1);
    assert_eq!(report.assets[0].kind, AssetKind::Background);
    assert!(!tmp.path().join("poster.jpg").exists());
}
