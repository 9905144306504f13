use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Environment variables read on top of the defaults.
const ENV_KEYS: &[&str] = &[
    "HOST",
    "PORT",
    "DATABASE_URL",
    "DB_MAX_CONNECTIONS",
    "STORE_TIMEOUT_MS",
    "LOGLEVEL",
    "BODY_LIMIT_BYTES",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid port: 0")]
    InvalidPort,

    #[error("Invalid db_max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid store_timeout_ms: {0}. Must be positive")]
    InvalidStoreTimeout(u64),

    #[error("Invalid body_limit_bytes: {0}. Must be positive")]
    InvalidBodyLimit(usize),

    #[error("Database URL cannot be empty")]
    EmptyDatabaseUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub store_timeout_ms: u64,
    pub loglevel: String,
    pub body_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            database_url: "sqlite:logins.db".to_string(),
            db_max_connections: 5,
            store_timeout_ms: 5_000,
            loglevel: "info".to_string(),
            // body-parser's json() default of 100kb
            body_limit_bytes: 100 * 1024,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: Config = figment.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(self.db_max_connections));
        }
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::InvalidStoreTimeout(self.store_timeout_ms));
        }
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidBodyLimit(self.body_limit_bytes));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_listen_on_3000() {
        let cfg = Config::from_figment(Figment::from(Serialized::defaults(Config::default())))
            .expect("defaults should validate");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.bind_addr().port(), 3000);
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "8080");
            jail.set_env("DATABASE_URL", "sqlite:/tmp/other.db");
            jail.set_env("STORE_TIMEOUT_MS", "250");
            jail.set_env("LOGLEVEL", "debug");

            let cfg = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(cfg.port, 8080);
            assert_eq!(cfg.database_url, "sqlite:/tmp/other.db");
            assert_eq!(cfg.store_timeout(), Duration::from_millis(250));
            assert_eq!(cfg.loglevel, "debug");
            Ok(())
        });
    }

    #[test]
    fn unrelated_env_is_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("BODY_LIMIT", "1");
            jail.set_env("BODY_LIMIT_BYTES", "2048");
            let cfg = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(cfg.body_limit_bytes, 2048);
            Ok(())
        });
    }

    #[test]
    fn zero_port_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "0");
            assert!(matches!(Config::load(), Err(ConfigError::InvalidPort)));
            Ok(())
        });
    }

    #[test]
    fn non_numeric_port_fails_extraction() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "not-a-port");
            assert!(matches!(Config::load(), Err(ConfigError::Extract(_))));
            Ok(())
        });
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let cfg = Config {
            db_max_connections: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidMaxConnections(0))
        ));
    }

    #[test]
    fn zero_store_timeout_is_rejected() {
        let cfg = Config {
            store_timeout_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidStoreTimeout(0))
        ));
    }

    #[test]
    fn zero_body_limit_is_rejected() {
        let cfg = Config {
            body_limit_bytes: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidBodyLimit(0))
        ));
    }

    #[test]
    fn blank_database_url_is_rejected() {
        let cfg = Config {
            database_url: "   ".to_string(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyDatabaseUrl)));
    }
}
