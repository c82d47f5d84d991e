//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// An account present in the credential store at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// Login email
    pub email: String,

    /// Login password
    pub password: String,
}

/// Complete configuration for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP listener binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds a bearer token stays valid after issuance
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: i64,

    /// Accounts seeded into the credential store at startup
    #[serde(default)]
    pub seed_users: Vec<SeedUser>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

// Five hours
fn default_token_ttl_seconds() -> i64 {
    18000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            token_ttl_seconds: default_token_ttl_seconds(),
            seed_users: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Socket address string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.token_ttl_seconds, 18000);
        assert!(config.seed_users.is_empty());
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = AppConfig::from_yaml_str("port: 8080\n").unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.token_ttl_seconds, 18000);
    }

    #[test]
    fn test_full_yaml_parses() {
        let yaml = r#"
host: 0.0.0.0
port: 9090
token_ttl_seconds: 60
seed_users:
  - email: admin@example.com
    password: secret-pass
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9090");
        assert_eq!(config.token_ttl_seconds, 60);
        assert_eq!(config.seed_users.len(), 1);
        assert_eq!(config.seed_users[0].email, "admin@example.com");
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.bind_address(), config.bind_address());
    }
}
