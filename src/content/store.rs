//! Gallery state storage.
//!
//! [`GalleryState`] is an immutable snapshot of the loaded document. The
//! [`GalleryStore`] hands out `Arc` snapshots and, in watch mode, atomically
//! swaps in a freshly loaded one.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │              GalleryStore (ArcSwap)                   │
//! │                                                       │
//! │   request handler ──► load()      (lock-free read)    │
//! │   watcher thread  ──► reload()    (atomic replace)    │
//! └───────────────────────────────────────────────────────┘
//! ```

use super::{
    ContentItem, ContentSource, SiteDocument,
    loader::{log_load_error, parse_document, read_source},
};
use crate::log;
use arc_swap::ArcSwap;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Loaded content, or the empty pre-load state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    document: Option<SiteDocument>,
}

impl GalleryState {
    /// State before (or instead of) a successful load.
    pub const fn empty() -> Self {
        Self { document: None }
    }

    pub const fn loaded(document: SiteDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    pub const fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub const fn document(&self) -> Option<&SiteDocument> {
        self.document.as_ref()
    }

    /// All gallery items in document order. Empty before load.
    pub fn items(&self) -> &[ContentItem] {
        self.document
            .as_ref()
            .map(|doc| doc.gallery_items.as_slice())
            .unwrap_or_default()
    }

    pub fn site_name(&self) -> &str {
        self.document.as_ref().map_or("", |doc| doc.site_name.as_str())
    }
}

/// Shared, atomically replaceable gallery state.
pub struct GalleryStore {
    source: ContentSource,
    state: ArcSwap<GalleryState>,
    /// Hash of the bytes behind the current state (0 = nothing loaded).
    fingerprint: AtomicU64,
}

impl GalleryStore {
    /// Load the document once. Failures are logged and leave the store empty.
    pub fn open(source: ContentSource) -> Self {
        let store = Self::from_state(source, GalleryState::empty());
        store.reload();
        store
    }

    fn from_state(source: ContentSource, state: GalleryState) -> Self {
        Self {
            source,
            state: ArcSwap::from_pointee(state),
            fingerprint: AtomicU64::new(0),
        }
    }

    /// Current snapshot. Wait-free.
    #[inline]
    pub fn load(&self) -> Arc<GalleryState> {
        self.state.load_full()
    }

    pub const fn source(&self) -> &ContentSource {
        &self.source
    }

    /// Re-read the source and swap in the new document.
    ///
    /// Returns `true` only when a changed, valid document was stored. On a
    /// read or parse failure the previous state is kept.
    pub fn reload(&self) -> bool {
        let bytes = match read_source(&self.source) {
            Ok(bytes) => bytes,
            Err(err) => {
                log_load_error(err);
                return false;
            }
        };

        let hash = fingerprint(&bytes);
        if hash == self.fingerprint.load(Ordering::Relaxed) {
            return false;
        }

        match parse_document(&bytes) {
            Ok(document) => {
                log!("load"; "{} items from {}", document.gallery_items.len(), self.source);
                self.state.store(Arc::new(GalleryState::loaded(document)));
                self.fingerprint.store(hash, Ordering::Relaxed);
                true
            }
            Err(err) => {
                log_load_error(err);
                false
            }
        }
    }
}

/// First 8 bytes of the blake3 digest.
fn fingerprint(bytes: &[u8]) -> u64 {
    let hash = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    // 0 is reserved for "nothing loaded"
    u64::from_le_bytes(head).max(1)
}
