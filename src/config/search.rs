//! `[search]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[search]` section in gallery.toml - suggestion dropdown behaviour.
///
/// # Example
/// ```toml
/// [search]
/// suggestion_limit = 5
/// blur_delay_ms = 200
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum number of rows in the suggestion dropdown.
    #[serde(default = "defaults::search::suggestion_limit")]
    #[educe(Default = defaults::search::suggestion_limit())]
    pub suggestion_limit: usize,

    /// Delay between the search field losing focus and the dropdown closing.
    #[serde(default = "defaults::search::blur_delay_ms")]
    #[educe(Default = defaults::search::blur_delay_ms())]
    pub blur_delay_ms: u64,
}
