//! Full page document: header, hero, initial grid, footer.

use super::{escape, render_gallery, render_hero};
use crate::{config::SiteConfig, content::GalleryState};
use chrono::{DateTime, Utc};

/// Page shell (embedded at compile time)
const PAGE_TEMPLATE: &str = include_str!("../embed/index.html");

/// Footer line shown once content is loaded.
pub fn footer_text(site_name: &str, year: i32) -> String {
    format!("© {year} {site_name}. All rights reserved.")
}

/// Render the whole page for `state`.
///
/// Before a successful load the page stays in its empty state: no site name,
/// no hero, an empty grid with the placeholder hidden, and no footer.
pub fn render_page(state: &GalleryState, config: &SiteConfig, now: DateTime<Utc>) -> String {
    let language = escape(&config.site.language);

    let Some(document) = state.document() else {
        return fill_template(
            PAGE_TEMPLATE,
            &[
                ("lang", &*language),
                ("site_name", ""),
                ("hero", ""),
                ("grid", ""),
                ("no_results_display", "none"),
                ("footer", ""),
            ],
        );
    };

    let items: Vec<_> = document.gallery_items.iter().collect();
    let gallery = render_gallery(&items, now);
    let site_name = escape(&document.site_name);
    let footer = footer_text(&site_name, config.copyright_year());
    let hero = render_hero(&document.main_content);

    fill_template(
        PAGE_TEMPLATE,
        &[
            ("lang", &*language),
            ("site_name", &*site_name),
            ("hero", hero.as_str()),
            ("grid", gallery.grid.as_str()),
            (
                "no_results_display",
                if gallery.show_empty { "block" } else { "none" },
            ),
            ("footer", footer.as_str()),
        ],
    )
}

/// Substitute `{key}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so braces inside content survive.
/// Unknown placeholders are left untouched.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
