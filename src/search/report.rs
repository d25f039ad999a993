//! `gallery search`: run the search controller once from the terminal.

use super::{Effect, SearchController, SearchEvent, SearchOptions, filter_items};
use crate::{
    config::SiteConfig,
    content::{GalleryState, load_state},
    log,
    utils::time_ago::time_ago,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::sync::Arc;

/// Type `query` into a fresh page and report what it would show.
///
/// With `json`, prints the effects exactly as the dev server sends them.
pub fn run_search(config: &SiteConfig, query: &str, json: bool) -> Result<()> {
    let state = Arc::new(load_state(&config.content_source()));
    let now = Utc::now();

    if json {
        let effects = input_effects(Arc::clone(&state), config, query, now);
        println!("{}", serde_json::to_string_pretty(&effects)?);
        return Ok(());
    }

    let lines = listing(&state, query, now);
    for line in &lines {
        println!("{line}");
    }

    match (state.is_loaded(), lines.len()) {
        (false, _) => log!("warn"; "no content loaded"),
        (true, 0) => log!("search"; "no matches for \"{query}\""),
        (true, count) => log!(
            "search";
            "{count} of {} items in {} match",
            state.items().len(),
            state.site_name()
        ),
    }
    Ok(())
}

fn input_effects(
    state: Arc<GalleryState>,
    config: &SiteConfig,
    query: &str,
    now: DateTime<Utc>,
) -> Vec<Effect> {
    let mut controller = SearchController::new(state, SearchOptions::from(&config.search));
    controller.handle(
        SearchEvent::Input {
            value: query.to_owned(),
        },
        now,
    )
}

/// One line per match: recency label, then title and description.
fn listing(state: &GalleryState, query: &str, now: DateTime<Utc>) -> Vec<String> {
    filter_items(state.items(), query)
        .into_iter()
        .map(|item| {
            let time = time_ago(&item.publish_date, now);
            let label = if time.is_new {
                time.text.green()
            } else {
                time.text.dimmed()
            };
            format!("{label:>16}  {}  {}", item.title.bold(), item.description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentItem, ItemSize, MainContent, SiteDocument};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
    }

    fn state() -> GalleryState {
        let item = |title: &str, description: &str| ContentItem {
            title: title.into(),
            description: description.into(),
            publish_date: "2025-03-20T11:00:00Z".into(),
            size: ItemSize::Medium,
            button: None,
        };
        GalleryState::loaded(SiteDocument {
            site_name: "Studio".into(),
            main_content: MainContent {
                title: "Hero".into(),
                description: "Intro".into(),
                button: None,
            },
            gallery_items: vec![item("Harbour", "Boats"), item("Dunes", "Sand")],
        })
    }

    #[test]
    fn test_listing_matches() {
        let lines = listing(&state(), "sand", now());

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Dunes"));
        assert!(lines[0].contains("1 hour ago"));
    }

    #[test]
    fn test_listing_without_content() {
        assert!(listing(&GalleryState::empty(), "", now()).is_empty());
    }

    #[test]
    fn test_input_effects_match_controller() {
        let effects = input_effects(Arc::new(state()), &SiteConfig::default(), "harb", now());

        assert_eq!(effects.len(), 2);
        assert!(matches!(&effects[0], Effect::RenderGallery(view) if view.grid.contains("Harbour")));
        assert!(matches!(&effects[1], Effect::RenderSuggestions(view) if view.visible));
    }
}
