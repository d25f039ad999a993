use super::{escape, render_button};
use crate::content::MainContent;

/// Hero banner: title, description and an optional button.
pub fn render_hero(content: &MainContent) -> String {
    format!(
        r#"
        <h1 class="hero-title">{}</h1>
        <p class="hero-description">{}</p>
        {}
    "#,
        escape(&content.title),
        escape(&content.description),
        render_button(content.button.as_ref(), "")
    )
}
