//! `[serve]` section configuration.
//!
//! Contains development server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in gallery.toml - development server settings.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # Listen on all interfaces
/// port = 3000
/// watch = true           # Reload content on file changes
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 5277).
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Enable file watcher for reload on changes.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use crate::cli::Cli;
    use clap::Parser;

    fn serve_config(toml: &str, args: &[&str]) -> SiteConfig {
        let mut config = SiteConfig::from_str(toml).unwrap();
        config.update_with_cli(Box::leak(Box::new(Cli::parse_from(args))));
        config
    }

    #[test]
    fn test_serve_config() {
        let config = r#"
            [serve]
            interface = "0.0.0.0"
            port = 8080
            watch = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 8080);
        assert!(!config.serve.watch);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.serve.interface, "127.0.0.1");
        assert_eq!(config.serve.port, 5277);
        assert!(config.serve.watch);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [serve]
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }

    #[test]
    fn test_cli_port_overrides_file() {
        let toml = "[serve]\nport = 8080\nwatch = false";

        let config = serve_config(toml, &["gallery", "serve", "-p", "9000"]);
        assert_eq!(config.serve.port, 9000);
        assert!(!config.serve.watch);

        let config = serve_config(toml, &["gallery", "serve"]);
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn test_cli_watch_flag() {
        let config = serve_config("[serve]\nwatch = false", &["gallery", "serve", "-w"]);
        assert!(config.serve.watch);

        let config = serve_config("", &["gallery", "serve", "-w", "false"]);
        assert!(!config.serve.watch);
    }

    #[test]
    fn test_serve_flags_ignored_for_build() {
        let config = serve_config("[serve]\nport = 8080", &["gallery", "build"]);
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.interface, "127.0.0.1");
    }
}
