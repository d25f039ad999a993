//! Content document loading.
//!
//! The document is read from a local file or fetched over HTTP, then parsed.
//! [`load_state`] never fails: errors are logged and the empty pre-load
//! state is returned instead.

use super::{GalleryState, SiteDocument};
use crate::log;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Where the content document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    File(PathBuf),
    Url(String),
}

impl ContentSource {
    /// Interpret a configured source string. `http://` and `https://` values
    /// are URLs; everything else is a path, joined onto `root` when relative.
    pub fn resolve(source: &str, root: &Path) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            return Self::Url(source.to_owned());
        }

        let path = Path::new(source);
        if path.is_absolute() {
            Self::File(path.to_path_buf())
        } else {
            Self::File(root.join(path))
        }
    }

    /// Local file path, if any. Only local sources can be watched.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Url(_) => None,
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Content loading errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to fetch `{0}`")]
    Http(String, #[source] reqwest::Error),

    #[error("invalid content document")]
    Json(#[from] serde_json::Error),
}

/// Read the raw bytes of the document.
pub fn read_source(source: &ContentSource) -> Result<Vec<u8>, ContentError> {
    match source {
        ContentSource::File(path) => {
            fs::read(path).map_err(|err| ContentError::Io(path.clone(), err))
        }
        ContentSource::Url(url) => fetch(url).map_err(|err| ContentError::Http(url.clone(), err)),
    }
}

fn fetch(url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Parse document bytes.
pub fn parse_document(bytes: &[u8]) -> Result<SiteDocument, ContentError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read and parse the document.
pub fn load_document(source: &ContentSource) -> Result<SiteDocument, ContentError> {
    parse_document(&read_source(source)?)
}

/// Load the gallery state, falling back to the empty state on any failure.
pub fn load_state(source: &ContentSource) -> GalleryState {
    match load_document(source) {
        Ok(document) => {
            log!("load"; "{} items from {}", document.gallery_items.len(), source);
            GalleryState::loaded(document)
        }
        Err(err) => {
            log_load_error(err);
            GalleryState::empty()
        }
    }
}

/// Log a load failure with its full cause chain.
pub(super) fn log_load_error(err: ContentError) {
    log!("error"; "error loading content: {:#}", anyhow::Error::from(err));
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "siteName": "Studio",
        "mainContent": { "title": "Hello", "description": "World" },
        "galleryItems": [
            { "title": "One", "description": "First", "publishDate": "2025-01-01", "size": "small" }
        ]
    }"#;

    #[test]
    fn test_resolve_relative_path() {
        let source = ContentSource::resolve("data/content.json", Path::new("/srv/site"));
        assert_eq!(source, ContentSource::File(PathBuf::from("/srv/site/data/content.json")));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let source = ContentSource::resolve("/tmp/content.json", Path::new("/srv/site"));
        assert_eq!(source, ContentSource::File(PathBuf::from("/tmp/content.json")));
    }

    #[test]
    fn test_resolve_url() {
        let source = ContentSource::resolve(" https://example.com/c.json ", Path::new("/srv"));
        assert_eq!(source, ContentSource::Url("https://example.com/c.json".into()));
        assert!(source.as_path().is_none());
    }

    #[test]
    fn test_load_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        fs::write(&path, DOCUMENT).unwrap();

        let doc = load_document(&ContentSource::File(path)).unwrap();
        assert_eq!(doc.site_name, "Studio");
        assert_eq!(doc.gallery_items.len(), 1);
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_document(&ContentSource::File(dir.path().join("missing.json")));

        assert!(matches!(result, Err(ContentError::Io(..))));
    }

    #[test]
    fn test_parse_document_invalid_json() {
        let result = parse_document(b"{ not json");
        assert!(matches!(result, Err(ContentError::Json(_))));
    }

    #[test]
    fn test_load_state_swallows_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        fs::write(&path, "[]").unwrap();

        let state = load_state(&ContentSource::File(path));
        assert!(!state.is_loaded());
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_load_state_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        fs::write(&path, DOCUMENT).unwrap();

        let state = load_state(&ContentSource::File(path));
        assert!(state.is_loaded());
        assert_eq!(state.site_name(), "Studio");
    }
}
