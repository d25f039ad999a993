//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()   ──► clean or create the output directory
//!     │
//!     ├── render_page()      ──► index.html (minified when enabled)
//!     │
//!     ├── RUNTIME_FILES      ──► search.js, style.css
//!     │
//!     └── copy_assets()      ──► assets/ mirrored into output
//! ```

use crate::{
    config::SiteConfig, content::GalleryState, log, render::render_page,
    utils::minify::minify_html,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::{ffi::OsStr, fs, path::Path};
use walkdir::WalkDir;

/// Files the page needs at runtime (embedded at compile time).
const RUNTIME_FILES: &[(&str, &str)] = &[
    ("search.js", include_str!("embed/search.js")),
    ("style.css", include_str!("embed/style.css")),
];

/// Render the gallery page for `state` into the output directory.
///
/// A state that failed to load still produces a page, in its empty form.
pub fn build_site(config: &SiteConfig, state: &GalleryState) -> Result<()> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    write_file(&output.join("index.html"), &render_index(state, config, Utc::now()))?;

    for (name, content) in RUNTIME_FILES {
        write_file(&output.join(name), content.as_bytes())?;
    }

    let copied = copy_assets(&config.build.assets, output)?;
    if copied > 0 {
        log!("assets"; "copied {copied} files");
    }

    log_build_result(state);
    Ok(())
}

/// The `index.html` bytes for `state` as of `now`, minified when enabled.
pub fn render_index(state: &GalleryState, config: &SiteConfig, now: DateTime<Utc>) -> Vec<u8> {
    let html = render_page(state, config, now);
    minify_html(html.as_bytes(), config).into_owned()
}

/// Create the output directory, clearing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Mirror `assets` into `output`, skipping hidden entries. Returns the file count.
///
/// A missing assets directory is not an error.
fn copy_assets(assets: &Path, output: &Path) -> Result<usize> {
    if !assets.is_dir() {
        return Ok(0);
    }

    let mut count = 0;
    let entries = WalkDir::new(assets)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry.file_name()));

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to walk {}", assets.display()))?;
        let rel = entry.path().strip_prefix(assets)?;
        let target = output.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
            count += 1;
        }
    }

    Ok(count)
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

/// Log build result based on what was rendered
fn log_build_result(state: &GalleryState) {
    match state.document() {
        None => log!("warn"; "content not loaded, page rendered empty"),
        Some(doc) if doc.gallery_items.is_empty() => log!("warn"; "content has no gallery items"),
        Some(doc) => log!("build"; "done, {} items", doc.gallery_items.len()),
    }
}
