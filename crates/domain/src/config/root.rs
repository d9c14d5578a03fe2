use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;
use crate::git_name::SEPARATOR_LABEL;

const LOCAL_CONFIG_PATH: &str = "gitlink-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/gitlink-dns/config.toml";

/// Main configuration structure for gitlink-dns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (ports, bind address, TLS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Name grammar, answer encoding and lister settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. gitlink-dns.toml in current directory
    /// 3. /etc/gitlink-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.doh_port {
            self.server.doh_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = &self.server;
        let resolver = &self.resolver;

        if !server.enable_dns && !server.enable_doh {
            return Err(ConfigError::Validation(
                "At least one of enable_dns / enable_doh must be set".to_string(),
            ));
        }
        if server.enable_dns && server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if server.enable_doh && server.doh_port == 0 {
            return Err(ConfigError::Validation("DoH port cannot be 0".to_string()));
        }
        if server.dns_workers == 0 {
            return Err(ConfigError::Validation(
                "dns_workers must be at least 1".to_string(),
            ));
        }
        if server.dns_tcp_backlog == 0 || server.dns_tcp_backlog > i32::MAX as u32 {
            return Err(ConfigError::Validation(format!(
                "dns_tcp_backlog must be between 1 and {}",
                i32::MAX
            )));
        }
        if server.dns_tcp_idle_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "dns_tcp_idle_timeout_secs cannot be 0".to_string(),
            ));
        }
        if server.dns_socket_buffer_bytes == Some(0) {
            return Err(ConfigError::Validation(
                "dns_socket_buffer_bytes cannot be 0".to_string(),
            ));
        }
        if let Some(tls) = &server.tls {
            if tls.cert_path.is_empty() || tls.key_path.is_empty() {
                return Err(ConfigError::Validation(
                    "TLS cert_path and key_path cannot be empty".to_string(),
                ));
            }
        }

        if resolver.tag.is_empty() || resolver.tag.contains('.') || resolver.tag == SEPARATOR_LABEL
        {
            return Err(ConfigError::Validation(format!(
                "Tag '{}' must be a single DNS label",
                resolver.tag
            )));
        }
        if resolver.listing_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "listing_timeout_ms cannot be 0".to_string(),
            ));
        }
        if resolver.git_binary.trim().is_empty() {
            return Err(ConfigError::Validation(
                "git_binary cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub doh_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
