//! Project initialization.
//!
//! Creates a new gallery project with a default config, a sample content
//! document and an empty assets directory.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Sample content document (embedded at compile time)
const SAMPLE_CONTENT: &str = include_str!("embed/content.json");

/// Create a new project at the configured root.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name the project goes into the current directory, which must be empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `gallery init <NAME>` to create in a subdirectory."
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_default_config(config)?;
    init_sample_content(config)?;
    init_assets_dir(&config.build.assets)?;
    init_ignored_files(root, &config.build.output)?;

    log!("init"; "created project at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))
}

/// Write the sample document where `[site].source` points
fn init_sample_content(config: &SiteConfig) -> Result<()> {
    let Some(path) = config.content_source().as_path().map(Path::to_path_buf) else {
        return Ok(());
    };

    if path.exists() {
        bail!("Path `{}` already exists. Try `gallery init <NAME>` instead.", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, SAMPLE_CONTENT).with_context(|| format!("Failed to write {}", path.display()))
}

fn init_assets_dir(assets: &Path) -> Result<()> {
    fs::create_dir_all(assets).with_context(|| format!("Failed to create {}", assets.display()))
}

/// Ignore the build output
fn init_ignored_files(root: &Path, output: &Path) -> Result<()> {
    let path = root.join(".gitignore");
    if path.exists() {
        return Ok(());
    }

    let output = output.strip_prefix(root).unwrap_or(output);
    fs::write(&path, format!("/{}\n", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::load_document;
    use tempfile::TempDir;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.config_path = root.join("gallery.toml");
        config.build.output = root.join("public");
        config.build.assets = root.join("assets");
        config
    }

    #[test]
    fn test_new_site_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("site");
        let config = config_at(&root);

        new_site(&config, true).unwrap();

        assert!(root.join("gallery.toml").is_file());
        assert!(root.join("assets").is_dir());
        assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "/public\n");

        let written = SiteConfig::from_path(&root.join("gallery.toml")).unwrap();
        assert_eq!(written.site.source, "content.json");

        let document = load_document(&config.content_source()).unwrap();
        assert_eq!(document.site_name, "My Gallery");
        assert!(!document.gallery_items.is_empty());
    }

    #[test]
    fn test_refuses_non_empty_dir_without_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let err = new_site(&config_at(dir.path()), false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_empty_dir_without_name() {
        let dir = TempDir::new().unwrap();
        new_site(&config_at(dir.path()), false).unwrap();
        assert!(dir.path().join("content.json").is_file());
    }
}
