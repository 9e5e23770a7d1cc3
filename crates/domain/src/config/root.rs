use serde::{Deserialize, Serialize};
use std::path::Path;

use super::database::DatabaseConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "zoneward.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/zoneward/config.toml";

/// Main configuration structure for Zoneward
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Response assembly and transport tuning
    #[serde(default)]
    pub dns: DnsConfig,

    /// Record store connection
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. zoneward.toml in current directory
    /// 3. /etc/zoneward/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Bind address cannot be empty".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "Database pool needs at least one connection".to_string(),
            ));
        }

        if self.dns.max_udp_payload < 512 {
            return Err(ConfigError::Validation(format!(
                "max_udp_payload must be at least 512 bytes, got {}",
                self.dns.max_udp_payload
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.server.dns_port, 8053);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert!(!config.dns.match_query_type);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config::default();
        config.apply_cli_overrides(CliOverrides {
            dns_port: Some(5353),
            bind_address: Some("127.0.0.1".to_string()),
            database_path: Some("/tmp/zones.db".to_string()),
            log_level: Some("debug".to_string()),
        });

        assert_eq!(config.server.dns_port, 5353);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.database.path, "/tmp/zones.db");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let mut config = Config::default();
        config.server.dns_port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_small_udp_payload_is_rejected() {
        let mut config = Config::default();
        config.dns.max_udp_payload = 100;
        assert!(config.validate().is_err());
    }
}
