//! File system watcher for live reload.
//!
//! Watches the local content document and the assets directory. A content
//! change reloads the [`GalleryStore`]; either kind of change re-renders the
//! page.
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌────────────────────────────┐
//! │ notify   │───▶│ Debouncer│───▶│      handle_changes()      │
//! │ events   │    │ (300ms)  │    │  content → store.reload()  │
//! └──────────┘    └──────────┘    │  changed → build_site()    │
//!                                 └────────────────────────────┘
//! ```
//!
//! URL sources are not watched.

use crate::{build::build_site, config::SiteConfig, content::GalleryStore, log};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// What a batch of changed paths touches.
#[derive(Debug, Default, PartialEq, Eq)]
struct Changes {
    content: bool,
    assets: bool,
}

/// Sort changed paths into content and asset changes; anything else is ignored.
fn classify(paths: &[PathBuf], content: Option<&Path>, assets: &Path) -> Changes {
    let mut changes = Changes::default();
    for path in paths {
        if content.is_some_and(|file| path == file) {
            changes.content = true;
        } else if path.starts_with(assets) {
            changes.assets = true;
        }
    }
    changes
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Reload and rebuild as needed. Returns true if a rebuild succeeded.
fn handle_changes(paths: &[PathBuf], config: &SiteConfig, store: &GalleryStore) -> bool {
    let changes = classify(paths, store.source().as_path(), &config.build.assets);

    // Unchanged bytes or a broken document keep the current page
    let reloaded = changes.content && store.reload();
    if !reloaded && !changes.assets {
        return false;
    }

    let reason = if reloaded { "content" } else { "assets" };
    log!("watch"; "{reason} changed, rebuilding...");

    match build_site(config, &store.load()) {
        Ok(()) => {
            eprintln!(); // Blank line to separate rebuild sessions
            true
        }
        Err(e) => {
            log!("watch"; "build failed");
            log!("watch"; "{e:#}");
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(
    watcher: &mut impl Watcher,
    config: &SiteConfig,
    store: &GalleryStore,
) -> Result<()> {
    let root = config.get_root();
    let mut watched = Vec::new();

    // Watch the parent so editors that replace the file are still seen
    if let Some(file) = store.source().as_path() {
        let dir = file.parent().filter(|dir| dir.is_dir()).unwrap_or(root);
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch content: {}", file.display()))?;
        watched.push(file.strip_prefix(root).unwrap_or(file).display().to_string());
    }

    let assets = &config.build.assets;
    if assets.is_dir() {
        watcher
            .watch(assets, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch assets: {}", assets.display()))?;
        watched.push(format!("{}/", assets.strip_prefix(root).unwrap_or(assets).display()));
    }

    if watched.is_empty() {
        log!("watch"; "nothing to watch");
    } else {
        log!("watch"; "{}", watched.join(", "));
    }
    eprintln!(); // Blank line to separate init logs from change events
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking(config: &SiteConfig, store: &GalleryStore) -> Result<()> {
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config, store)?;

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), config, store) {
                    debouncer.mark_rebuild();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentSource;
    use std::fs;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "siteName": "Studio",
        "mainContent": { "title": "Hello", "description": "World" },
        "galleryItems": [{ "title": "One", "description": "", "publishDate": "2025-01-01" }]
    }"#;

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("content.json~")));
        assert!(is_temp_file(Path::new(".content.json.swp")));
        assert!(is_temp_file(Path::new("a.tmp")));
        assert!(!is_temp_file(Path::new("content.json")));
    }

    #[test]
    fn test_classify() {
        let content = Path::new("/site/content.json");
        let assets = Path::new("/site/assets");
        let paths = |list: &[&str]| list.iter().map(PathBuf::from).collect::<Vec<_>>();

        assert_eq!(
            classify(&paths(&["/site/content.json"]), Some(content), assets),
            Changes { content: true, assets: false }
        );
        assert_eq!(
            classify(&paths(&["/site/assets/img/a.png"]), Some(content), assets),
            Changes { content: false, assets: true }
        );
        // Siblings of the document are not content
        assert_eq!(
            classify(&paths(&["/site/notes.txt"]), Some(content), assets),
            Changes::default()
        );
        assert_eq!(
            classify(&paths(&["/site/content.json"]), None, assets),
            Changes::default()
        );
    }

    #[test]
    fn test_debouncer_ignores_temp_files() {
        let mut debouncer = Debouncer::new();
        let event = Event::new(EventKind::Any)
            .add_path(PathBuf::from("/site/content.json~"))
            .add_path(PathBuf::from("/site/content.json"));
        debouncer.add(event);

        assert!(!debouncer.ready());
        assert_eq!(debouncer.take(), vec![PathBuf::from("/site/content.json")]);
        assert!(debouncer.take().is_empty());
    }

    #[test]
    fn test_handle_changes_rebuilds_on_new_content() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("content.json");
        fs::write(&file, DOCUMENT).unwrap();

        let mut config = SiteConfig::default();
        config.build.output = dir.path().join("public");
        config.build.assets = dir.path().join("assets");
        config.build.minify = false;
        let store = GalleryStore::open(ContentSource::File(file.clone()));

        // Same bytes as the initial load: nothing to do
        assert!(!handle_changes(&[file.clone()], &config, &store));

        fs::write(&file, DOCUMENT.replace("Studio", "Atelier")).unwrap();
        assert!(handle_changes(&[file.clone()], &config, &store));

        let html = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(html.contains("Atelier"));
    }

    #[test]
    fn test_handle_changes_keeps_page_on_broken_content() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("content.json");
        fs::write(&file, DOCUMENT).unwrap();

        let mut config = SiteConfig::default();
        config.build.output = dir.path().join("public");
        config.build.assets = dir.path().join("assets");
        let store = GalleryStore::open(ContentSource::File(file.clone()));

        fs::write(&file, "{ not json").unwrap();
        assert!(!handle_changes(&[file], &config, &store));
        assert_eq!(store.load().site_name(), "Studio");
        assert!(!config.build.output.exists());
    }
}
