//! Pure markup rendering: data in, HTML string out.
//!
//! Nothing here touches the filesystem or the clock; callers pass `now` so the
//! time-ago labels are reproducible.

mod gallery;
mod hero;
mod page;
mod suggestions;

pub use gallery::{GalleryView, render_gallery};
pub use hero::render_hero;
pub use page::render_page;
pub use suggestions::{SuggestionsView, render_suggestions};

use crate::content::ActionButton;
use std::borrow::Cow;

/// Escape text for use in element content and quoted attributes.
#[inline]
fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Call-to-action link, or nothing when the button has no text.
fn render_button(button: Option<&ActionButton>, extra_class: &str) -> String {
    match button {
        Some(button) if button.is_visible() => {
            let class = match extra_class {
                "" => format!("btn {}", button.class()),
                extra => format!("btn {} {extra}", button.class()),
            };
            format!(
                r#"<a href="{}" class="{class}">{}</a>"#,
                escape(&button.link),
                escape(&button.text)
            )
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(text: &str, primary: bool) -> ActionButton {
        ActionButton {
            text: text.into(),
            link: "/go?a=1&b=2".into(),
            primary,
        }
    }

    #[test]
    fn test_render_button_primary() {
        let html = render_button(Some(&button("Open", true)), "item-button");
        assert_eq!(
            html,
            r#"<a href="/go?a=1&amp;b=2" class="btn btn-primary item-button">Open</a>"#
        );
    }

    #[test]
    fn test_render_button_secondary_without_extra_class() {
        let html = render_button(Some(&button("Read", false)), "");
        assert!(html.contains(r#"class="btn btn-secondary""#));
    }

    #[test]
    fn test_render_button_hidden_when_text_empty() {
        assert_eq!(render_button(Some(&button("", true)), "item-button"), "");
        assert_eq!(render_button(None, "item-button"), "");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &apos;Jerry&apos;&lt;/b&gt;");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
    }
}
