use std::{env, net::SocketAddr};
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub oidc_issuer_url: String,
    /// Money charged for one game over one billable day
    pub price_per_unit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into());
        let bind_address = bind_address
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDRESS",
                value: bind_address.clone(),
            })?;

        let price_per_unit = match lookup("PRICE_PER_UNIT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PRICE_PER_UNIT",
                value,
            })?,
            None => 1,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            price_per_unit,
        })
    }
}
