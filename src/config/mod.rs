// Configuration module entry point
// Layered loading: config.toml (optional) + SITE_* environment + defaults

mod types;

use std::net::SocketAddr;

pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("site.content_root", ".")?
            .set_default("site.assets_dir", "assets")?
            .set_default("site.assets_route", "/assets")?
            .set_default(
                "site.page_aliases",
                vec!["projects", "publications", "resume", "contact"],
            )?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_site_layout() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.site.content_root, ".");
        assert_eq!(cfg.site.assets_route, "/assets");
        assert_eq!(
            cfg.site.page_aliases,
            vec!["projects", "publications", "resume", "contact"]
        );
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn socket_addr_parses_defaults() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        let addr = cfg.socket_addr().expect("default address should parse");
        assert_eq!(addr.port(), 8000);
    }
}
