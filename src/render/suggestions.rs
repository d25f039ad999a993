use super::escape;
use crate::{content::ContentItem, utils::time_ago::time_ago};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Rendered dropdown rows plus whether the dropdown is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionsView {
    pub html: String,
    pub visible: bool,
}

/// Render one dropdown row per item. The caller truncates to the limit.
///
/// Each row carries `data-title`; selecting it is reported back as a
/// `suggestion_selected` event with that title.
pub fn render_suggestions(items: &[&ContentItem], now: DateTime<Utc>) -> SuggestionsView {
    if items.is_empty() {
        return SuggestionsView {
            html: String::new(),
            visible: false,
        };
    }

    SuggestionsView {
        html: items.iter().map(|item| render_row(item, now)).collect(),
        visible: true,
    }
}

fn render_row(item: &ContentItem, now: DateTime<Utc>) -> String {
    let time = time_ago(&item.publish_date, now);
    let title = escape(&item.title);

    format!(
        r#"
            <div class="suggestion-item" data-title="{title}">
                <svg class="suggestion-icon" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5">
                    <circle cx="11" cy="11" r="8"></circle>
                    <path d="m21 21-4.35-4.35"></path>
                </svg>
                <div class="suggestion-content">
                    <div class="suggestion-title">{title}</div>
                    <div class="suggestion-description">{description}</div>
                    <div class="suggestion-time {time_class}">{time_text}</div>
                </div>
            </div>
        "#,
        description = escape(&item.description),
        time_class = time.class(),
        time_text = time.text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ItemSize;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
    }

    fn item(title: &str, publish_date: &str) -> ContentItem {
        ContentItem {
            title: title.into(),
            description: "desc".into(),
            publish_date: publish_date.into(),
            size: ItemSize::Medium,
            button: None,
        }
    }

    #[test]
    fn test_empty_hides_dropdown() {
        let view = render_suggestions(&[], now());
        assert!(!view.visible);
        assert!(view.html.is_empty());
    }

    #[test]
    fn test_rows_carry_title_and_recency() {
        let a = item("Night \"market\"", "2025-03-18T12:00:00Z");
        let b = item("Old pier", "2024-11-02");
        let view = render_suggestions(&[&a, &b], now());

        assert!(view.visible);
        assert_eq!(view.html.matches(r#"class="suggestion-item""#).count(), 2);
        assert!(view.html.contains(r#"data-title="Night &quot;market&quot;""#));
        assert!(view.html.contains(r#"<div class="suggestion-time new">2 days ago</div>"#));
        assert!(view.html.contains(r#"<div class="suggestion-time old">Nov 2, 2024</div>"#));
    }
}
