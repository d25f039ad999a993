//! Search filtering and the search controller.
//!
//! | Module       | Role                                                  |
//! |--------------|-------------------------------------------------------|
//! | (this)       | case-insensitive substring filter over items          |
//! | `controller` | event → effects state machine driving the page        |
//! | `report`     | `gallery search` terminal output                      |

pub mod controller;
mod report;

pub use controller::{Effect, SearchController, SearchEvent, SearchOptions};
pub use report::run_search;

use crate::content::ContentItem;

/// Items whose title or description contains `query`, ignoring case.
///
/// Returns a new list in source order; an empty query matches everything.
pub fn filter_items<'a>(items: &'a [ContentItem], query: &str) -> Vec<&'a ContentItem> {
    let needle = query.to_lowercase();
    items.iter().filter(|item| matches(item, &needle)).collect()
}

/// `needle` must already be lower-cased.
#[inline]
fn matches(item: &ContentItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle) || item.description.to_lowercase().contains(needle)
}
