use super::{escape, render_button};
use crate::{content::ContentItem, utils::time_ago::time_ago};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Rendered grid plus whether the "no results" placeholder is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub grid: String,
    pub show_empty: bool,
}

/// Render one card per item, or an empty grid with the placeholder shown.
pub fn render_gallery(items: &[&ContentItem], now: DateTime<Utc>) -> GalleryView {
    if items.is_empty() {
        return GalleryView {
            grid: String::new(),
            show_empty: true,
        };
    }

    GalleryView {
        grid: items.iter().map(|item| render_card(item, now)).collect(),
        show_empty: false,
    }
}

fn render_card(item: &ContentItem, now: DateTime<Utc>) -> String {
    let time = time_ago(&item.publish_date, now);
    let time_class = time.class();

    format!(
        r#"
            <div class="gallery-item {size_class}">
                <div class="item-content-wrapper">
                    <div class="item-header">
                        <svg class="time-icon {time_class}" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5">
                            <circle cx="12" cy="12" r="10"></circle>
                            <polyline points="12 6 12 12 16 14"></polyline>
                        </svg>
                        <span class="time-text {time_class}">{time_text}</span>
                    </div>
                    <h3 class="item-title">{title}</h3>
                    <p class="item-description">{description}</p>
                </div>
                {button}
            </div>
        "#,
        size_class = escape(&item.size.class()),
        time_text = time.text,
        title = escape(&item.title),
        description = escape(&item.description),
        button = render_button(item.button.as_ref(), "item-button"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ActionButton, ItemSize};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
    }

    fn item(title: &str, publish_date: &str, size: ItemSize) -> ContentItem {
        ContentItem {
            title: title.into(),
            description: format!("About {title}"),
            publish_date: publish_date.into(),
            size,
            button: None,
        }
    }

    #[test]
    fn test_empty_shows_placeholder() {
        let view = render_gallery(&[], now());
        assert_eq!(view.grid, "");
        assert!(view.show_empty);
    }

    #[test]
    fn test_one_card_per_item() {
        let a = item("Harbour", "2025-03-20T11:55:00Z", ItemSize::Wide);
        let b = item("Dunes", "2025-03-01", ItemSize::Small);
        let view = render_gallery(&[&a, &b], now());

        assert!(!view.show_empty);
        assert_eq!(view.grid.matches(r#"<div class="gallery-item "#).count(), 2);
        assert!(view.grid.contains("gallery-item item-size-wide"));
        assert!(view.grid.contains("gallery-item item-size-small"));
        // Cards keep input order
        assert!(view.grid.find("Harbour").unwrap() < view.grid.find("Dunes").unwrap());
    }

    #[test]
    fn test_card_recency_classes() {
        let fresh = item("Fresh", "2025-03-20T11:55:00Z", ItemSize::Medium);
        let stale = item("Stale", "2025-03-01", ItemSize::Medium);

        let fresh_html = render_gallery(&[&fresh], now()).grid;
        assert!(fresh_html.contains(r#"<span class="time-text new">5 minutes ago</span>"#));
        assert!(fresh_html.contains(r#"class="time-icon new""#));

        let stale_html = render_gallery(&[&stale], now()).grid;
        assert!(stale_html.contains(r#"<span class="time-text old">Mar 1, 2025</span>"#));
    }

    #[test]
    fn test_card_button_only_with_text() {
        let mut with_button = item("Shop", "2025-03-19", ItemSize::Large);
        with_button.button = Some(ActionButton {
            text: "Buy".into(),
            link: "/buy".into(),
            primary: false,
        });
        let mut empty_button = item("Quiet", "2025-03-19", ItemSize::Large);
        empty_button.button = Some(ActionButton {
            text: String::new(),
            link: "/quiet".into(),
            primary: true,
        });

        let html = render_gallery(&[&with_button], now()).grid;
        assert!(html.contains(r#"<a href="/buy" class="btn btn-secondary item-button">Buy</a>"#));

        let html = render_gallery(&[&empty_button], now()).grid;
        assert!(!html.contains("/quiet"));
    }

    #[test]
    fn test_card_escapes_text() {
        let hostile = item("<script>alert(1)</script>", "2025-03-19", ItemSize::Medium);
        let html = render_gallery(&[&hostile], now()).grid;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
