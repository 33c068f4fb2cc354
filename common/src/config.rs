// Configuration management with layered configuration (defaults, file, env)

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder replaced by the radar site in `ftp.directory_template`
pub const SITE_PLACEHOLDER: &str = "{site}";

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub ftp: FtpConfig,
    pub radar: RadarConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Where `GET /` redirects to
    pub home_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub directory_template: String,
    pub timeout_seconds: u64,
}

impl FtpConfig {
    /// Remote directory holding the files for `site`
    pub fn directory_for(&self, site: &str) -> String {
        self.directory_template.replace(SITE_PLACEHOLDER, site)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarConfig {
    /// The only product identifier clients may request
    pub product: String,
    /// Site listed by `GET /ls` when none is given
    pub default_site: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_metrics_enabled() -> bool {
    true
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env → PORT
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        Self::load_with_port(config_dir, std::env::var("PORT").ok())
    }

    fn load_with_port<P: AsRef<Path>>(
        config_dir: P,
        port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with built-in defaults
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Hosting platforms hand out the listening port via PORT
            .set_override_option("server.port", port.filter(|p| !p.is_empty()))?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.ftp.host.is_empty() {
            return Err("FTP host cannot be empty".to_string());
        }
        if self.ftp.port == 0 {
            return Err("FTP port must be greater than 0".to_string());
        }
        if !self.ftp.directory_template.contains(SITE_PLACEHOLDER) {
            return Err(format!(
                "FTP directory_template must contain {}",
                SITE_PLACEHOLDER
            ));
        }
        if self.ftp.timeout_seconds == 0 {
            return Err("FTP timeout_seconds must be greater than 0".to_string());
        }

        if self.radar.product.is_empty() {
            return Err("Radar product cannot be empty".to_string());
        }
        if self.radar.default_site.is_empty()
            || !self
                .radar
                .default_site
                .chars()
                .all(|c| c.is_ascii_alphanumeric())
        {
            return Err("Radar default_site must be alphanumeric".to_string());
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                home_url: "http://play.google.com/store/apps/details?id=me.kevinwells.darxen"
                    .to_string(),
            },
            ftp: FtpConfig {
                host: "tgftp.nws.noaa.gov".to_string(),
                port: 21,
                username: "anonymous".to_string(),
                password: "darxen".to_string(),
                directory_template: "SL.us008001/DF.of/DC.radar/DS.p19r0/SI.{site}".to_string(),
                timeout_seconds: 30,
            },
            radar: RadarConfig {
                product: "N0R".to_string(),
                default_site: "klot".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
                metrics_enabled: true,
            },
        }
    }
}
