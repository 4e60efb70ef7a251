//! Process configuration, read once at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

use packstore_auth::AdminCapability;

pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PACKSTORE_HOST is not an IP address: {0:?}")]
    InvalidHost(String),

    #[error("PORT is not a valid port number: {0:?}")]
    InvalidPort(String),

    #[error("{key} must be true or false, got {value:?}")]
    InvalidBool { key: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Shared admin secret. `None` keeps the admin gate closed.
    pub admin_token: Option<String>,
    pub seed_demo_catalog: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            admin_token: None,
            seed_demo_catalog: true,
        }
    }
}

impl ApiConfig {
    /// Read `ADMIN_TOKEN`, `PACKSTORE_HOST`, `PORT` and `PACKSTORE_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.admin_token = lookup("ADMIN_TOKEN").filter(|t| !t.is_empty());

        if let Some(host) = lookup("PACKSTORE_HOST") {
            config.host = host.trim().parse().map_err(|_| ConfigError::InvalidHost(host))?;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }

        if let Some(seed) = lookup("PACKSTORE_SEED") {
            config.seed_demo_catalog = parse_bool("PACKSTORE_SEED", seed)?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Admin gate built from the configured secret.
    pub fn admin_capability(&self) -> AdminCapability {
        AdminCapability::from_secret(self.admin_token.clone())
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("seed_demo_catalog", &self.seed_demo_catalog)
            .finish()
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_match_local_dev_server() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3030".parse().unwrap());
        assert_eq!(config.admin_token, None);
        assert!(config.seed_demo_catalog);
    }

    #[test]
    fn reads_every_setting() {
        let config = from_pairs(&[
            ("ADMIN_TOKEN", "t0k"),
            ("PACKSTORE_HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("PACKSTORE_SEED", "false"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.admin_token.as_deref(), Some("t0k"));
        assert!(!config.seed_demo_catalog);
    }

    #[test]
    fn empty_admin_token_counts_as_unset() {
        let config = from_pairs(&[("ADMIN_TOKEN", "")]).unwrap();
        assert_eq!(config.admin_token, None);
        assert!(!config.admin_capability().is_configured());
    }

    #[test]
    fn admin_capability_uses_the_configured_token() {
        let admin = from_pairs(&[("ADMIN_TOKEN", "t0k")]).unwrap().admin_capability();
        assert!(admin.is_configured());
        assert_eq!(admin.authorize(Some("Bearer t0k")), Ok(()));
        assert!(admin.authorize(Some("Bearer nope")).is_err());
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            from_pairs(&[("PORT", "http")]),
            Err(ConfigError::InvalidPort("http".to_string()))
        );
        assert_eq!(
            from_pairs(&[("PACKSTORE_HOST", "localhost")]),
            Err(ConfigError::InvalidHost("localhost".to_string()))
        );
        assert!(matches!(
            from_pairs(&[("PACKSTORE_SEED", "maybe")]),
            Err(ConfigError::InvalidBool { key: "PACKSTORE_SEED", .. })
        ));
    }

    #[test]
    fn debug_redacts_the_admin_token() {
        let config = from_pairs(&[("ADMIN_TOKEN", "hunter2")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
