//! Site configuration management for `gallery.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[site]`    | Content document source, language, footer year  |
//! | `[build]`   | Output/asset paths, minification                |
//! | `[search]`  | Suggestion limit and blur delay                 |
//! | `[serve]`   | Development server (port, interface, watch)     |
//!
//! # Example
//!
//! ```toml
//! [site]
//! source = "content.json"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [search]
//! suggestion_limit = 5
//!
//! [serve]
//! port = 5277
//! ```

mod build;
pub mod defaults;
mod error;
mod search;
mod serve;
mod site;

pub use error::ConfigError;
pub use search::SearchConfig;

use build::BuildConfig;
use serve::ServeConfig;
use site::SiteSection;

use crate::{
    cli::{Cli, Commands},
    content::ContentSource,
};
use anyhow::{Result, bail};
use chrono::Datelike;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing gallery.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Content source and page metadata
    #[serde(default)]
    pub site: SiteSection,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Search dropdown settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config file named by the CLI (or defaults when it is absent),
    /// apply CLI overrides and normalize paths.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Resolve `[site].source` against the root directory.
    pub fn content_source(&self) -> ContentSource {
        ContentSource::resolve(&self.site.source, self.get_root())
    }

    /// Year printed in the footer.
    pub fn copyright_year(&self) -> i32 {
        self.site
            .copyright_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.site.source, args.source.as_ref());
            Self::update_option(&mut self.build.output, args.output.as_ref());
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if self.site.source.trim().is_empty() {
            bail!(ConfigError::Validation("[site.source] must not be empty".into()));
        }

        if self.site.source.contains("://")
            && !matches!(self.content_source(), ContentSource::Url(_))
        {
            bail!(ConfigError::Validation(
                "[site.source] URL must start with http:// or https://".into()
            ));
        }

        if self.search.suggestion_limit == 0 {
            bail!(ConfigError::Validation(
                "[search.suggestion_limit] must be at least 1".into()
            ));
        }

        if let Some(Commands::Serve { .. }) = self.cli.map(|cli| &cli.command)
            && self.serve.interface.parse::<std::net::IpAddr>().is_err()
        {
            bail!(ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.serve.interface
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
