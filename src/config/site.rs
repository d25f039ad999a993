//! `[site]` section configuration.
//!
//! Where the content document comes from and page-level metadata.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in gallery.toml.
///
/// # Example
/// ```toml
/// [site]
/// source = "content.json"   # or "https://example.com/content.json"
/// language = "en"
/// copyright_year = 2025
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Content document location: a path relative to root, or an http(s) URL.
    #[serde(default = "defaults::site::source")]
    #[educe(Default = defaults::site::source())]
    pub source: String,

    /// BCP 47 language code written to `<html lang>`.
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Year shown in the footer. Falls back to the current year.
    #[serde(default = "defaults::site::copyright_year")]
    #[educe(Default = defaults::site::copyright_year())]
    pub copyright_year: Option<i32>,
}
