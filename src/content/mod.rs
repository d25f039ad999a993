//! Content document: types, loading and shared state.
//!
//! | Module     | Role                                              |
//! |------------|---------------------------------------------------|
//! | `types`    | serde model of the JSON document                  |
//! | `loader`   | read from file/URL, parse, log-and-swallow errors |
//! | `store`    | immutable `GalleryState` snapshots via `arc-swap` |

mod loader;
mod store;
mod types;

pub use loader::{ContentSource, load_state};
pub use store::{GalleryState, GalleryStore};
pub use types::{ActionButton, ContentItem, MainContent, SiteDocument};

#[cfg(test)]
pub use {loader::load_document, types::ItemSize};
