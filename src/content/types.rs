//! Content document types.
//!
//! Mirrors the JSON document the gallery is rendered from. Keys are camelCase:
//!
//! ```json
//! {
//!   "siteName": "Studio",
//!   "mainContent": { "title": "...", "description": "...", "button": { ... } },
//!   "galleryItems": [
//!     { "title": "...", "description": "...", "publishDate": "2025-01-15T10:30:00Z",
//!       "size": "wide", "button": { "text": "Open", "link": "/a", "primary": true } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The whole content document. Read once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    pub site_name: String,
    pub main_content: MainContent,
    #[serde(default)]
    pub gallery_items: Vec<ContentItem>,
}

/// Hero banner fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainContent {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<ActionButton>,
}

/// A single gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    pub description: String,

    /// Raw timestamp text. Parsed on every render, so malformed values surface
    /// as "Invalid Date" instead of rejecting the document.
    pub publish_date: String,

    #[serde(default)]
    pub size: ItemSize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<ActionButton>,
}

/// Call-to-action link shared by the hero and gallery cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub primary: bool,
}

impl ActionButton {
    /// Buttons without text are not rendered.
    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }

    pub const fn class(&self) -> &'static str {
        if self.primary { "btn-primary" } else { "btn-secondary" }
    }
}

/// Layout hint for a gallery card, rendered as `item-size-<tag>`.
///
/// Unknown tags are kept verbatim so custom stylesheets can target them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemSize {
    Small,
    #[default]
    Medium,
    Large,
    Wide,
    Tall,
    Custom(String),
}

impl ItemSize {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Wide => "wide",
            Self::Tall => "tall",
            Self::Custom(tag) => tag,
        }
    }

    pub fn class(&self) -> String {
        format!("item-size-{}", self.as_str())
    }
}

impl From<String> for ItemSize {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            "wide" => Self::Wide,
            "tall" => Self::Tall,
            _ => Self::Custom(tag),
        }
    }
}

impl From<ItemSize> for String {
    fn from(size: ItemSize) -> Self {
        size.as_str().to_owned()
    }
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
