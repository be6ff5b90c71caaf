use std::env;
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not a valid socket address: {value}")]
    InvalidBindAddr { name: &'static str, value: String },
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Base URL used when building short links, without a trailing slash.
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                name: "BIND_ADDR",
                value: bind_value.clone(),
            })?;

        let public_url = lookup("PUBLIC_URL")
            .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            bind_addr,
            public_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://db/pantry")])).unwrap();
        assert_eq!(config.database_url, "postgres://db/pantry");
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.public_url, DEFAULT_PUBLIC_URL);
    }

    #[test]
    fn test_database_url_required() {
        assert_eq!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("DATABASE_URL", "")])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/pantry"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("PUBLIC_URL", "https://pantry.example/"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.public_url, "https://pantry.example");
    }

    #[test]
    fn test_bad_bind_addr() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/pantry"),
            ("BIND_ADDR", "everywhere"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "BIND_ADDR is not a valid socket address: everywhere");
    }
}
