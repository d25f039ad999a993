//! Search controller: a pure state machine behind the search field.
//!
//! The page forwards user events as [`SearchEvent`]s; the controller answers
//! with [`Effect`]s for the page to apply. Nothing here touches a document,
//! so every interaction can be replayed in tests.
//!
//! ```text
//!   refresh / input / focus / click       RenderGallery / RenderSuggestions
//!  ─────────────────────────────► handle ────────────────────────────────►
//!                                   │       HideDropdown / SetSearchValue
//!                                   │       ScheduleHide ─┐
//!                                   ◄──── HideElapsed ◄───┘
//! ```

use super::filter_items;
use crate::{
    config::SearchConfig,
    content::{ContentItem, GalleryState},
    render::{GalleryView, SuggestionsView, render_gallery, render_suggestions},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchEvent {
    /// The page was (re)opened; time labels need to catch up with the clock.
    Refresh,
    /// The search field's value changed.
    Input { value: String },
    /// The search field gained focus.
    Focus,
    /// The search field lost focus.
    Blur,
    /// A delay requested by [`Effect::ScheduleHide`] has passed.
    HideElapsed,
    /// A click anywhere on the page.
    Click { target: ClickTarget },
    /// A suggestion row was chosen.
    SuggestionSelected { title: String },
}

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    SearchField,
    Dropdown,
    Outside,
}

/// A change for the page to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    RenderGallery(GalleryView),
    RenderSuggestions(SuggestionsView),
    HideDropdown,
    SetSearchValue { value: String },
    /// Send [`SearchEvent::HideElapsed`] back after this many milliseconds.
    ScheduleHide { after_ms: u64 },
}

/// Tunables taken from `[search]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub suggestion_limit: usize,
    pub blur_delay: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            suggestion_limit: config.suggestion_limit.max(1),
            blur_delay: Duration::from_millis(config.blur_delay_ms),
        }
    }
}

pub struct SearchController {
    state: Arc<GalleryState>,
    options: SearchOptions,
    /// Lower-cased current query.
    query: String,
}

impl SearchController {
    pub fn new(state: Arc<GalleryState>, options: SearchOptions) -> Self {
        Self {
            state,
            options,
            query: String::new(),
        }
    }

    /// Start from a search field that already holds `value`.
    pub fn with_query(mut self, value: &str) -> Self {
        self.query = value.to_lowercase();
        self
    }

    /// Apply one event and return the effects, in order.
    pub fn handle(&mut self, event: SearchEvent, now: DateTime<Utc>) -> Vec<Effect> {
        match event {
            SearchEvent::Refresh => self.on_refresh(now),
            SearchEvent::Input { value } => self.on_input(&value, now),
            SearchEvent::Focus => self.on_focus(now),
            SearchEvent::Blur => vec![Effect::ScheduleHide {
                after_ms: self.options.blur_delay.as_millis() as u64,
            }],
            SearchEvent::HideElapsed => vec![Effect::HideDropdown],
            SearchEvent::Click {
                target: ClickTarget::Outside,
            } => vec![Effect::HideDropdown],
            SearchEvent::Click { .. } => Vec::new(),
            SearchEvent::SuggestionSelected { title } => self.on_select(title, now),
        }
    }

    /// Re-render the grid for the current query with fresh time labels.
    fn on_refresh(&self, now: DateTime<Utc>) -> Vec<Effect> {
        let filtered = filter_items(self.state.items(), &self.query);
        vec![Effect::RenderGallery(render_gallery(&filtered, now))]
    }

    fn on_input(&mut self, value: &str, now: DateTime<Utc>) -> Vec<Effect> {
        self.query = value.to_lowercase();

        let items = self.state.items();
        let filtered = filter_items(items, &self.query);
        let gallery = render_gallery(&filtered, now);

        let suggestions = if self.query.is_empty() {
            self.render_head(items.iter().collect(), now)
        } else {
            self.render_head(filtered, now)
        };

        vec![
            Effect::RenderGallery(gallery),
            Effect::RenderSuggestions(suggestions),
        ]
    }

    fn on_focus(&self, now: DateTime<Utc>) -> Vec<Effect> {
        let items = self.state.items();
        if items.is_empty() {
            return Vec::new();
        }
        let suggestions = self.render_head(items.iter().collect(), now);
        vec![Effect::RenderSuggestions(suggestions)]
    }

    fn on_select(&mut self, title: String, now: DateTime<Utc>) -> Vec<Effect> {
        self.query = title.to_lowercase();
        let filtered = filter_items(self.state.items(), &self.query);
        let gallery = render_gallery(&filtered, now);

        vec![
            Effect::SetSearchValue { value: title },
            Effect::HideDropdown,
            Effect::RenderGallery(gallery),
        ]
    }

    /// Suggestions from the first `suggestion_limit` of `items`.
    fn render_head(&self, mut items: Vec<&ContentItem>, now: DateTime<Utc>) -> SuggestionsView {
        items.truncate(self.options.suggestion_limit);
        render_suggestions(&items, now)
    }
}
