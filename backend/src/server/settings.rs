//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LETTERS_*` environment variables and config
//! files. Every field is optional; accessors apply the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::{
    DEFAULT_SEARCH_RADIUS_METRES, DISCLOSURE_RADIUS_METRES, DisclosurePolicy,
    DisclosurePolicyError,
};
use backend::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 5_000;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Policy(#[from] DisclosurePolicyError),
}

/// Letter server configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LETTERS")]
pub struct LetterServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it letters are kept in memory.
    pub database_url: Option<String>,
    pub pool_max_size: Option<u32>,
    pub pool_min_idle: Option<u32>,
    pub pool_connection_timeout_secs: Option<u64>,
    /// Per-statement timeout for store queries.
    pub statement_timeout_ms: Option<u64>,
    /// Radius used when a nearby query omits `max_distance`.
    pub default_search_radius_metres: Option<f64>,
    /// Letters further than this have their content withheld.
    pub disclosure_radius_metres: Option<f64>,
    /// Apply embedded migrations at startup.
    pub run_migrations: Option<bool>,
}

impl LetterServerSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, treating blank values as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(
            self.statement_timeout_ms
                .unwrap_or(DEFAULT_STATEMENT_TIMEOUT_MS),
        )
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool configuration for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_connection_timeout(Duration::from_secs(
                self.pool_connection_timeout_secs
                    .unwrap_or(DEFAULT_POOL_CONNECTION_TIMEOUT_SECS),
            ))
            .with_statement_timeout(self.statement_timeout())
    }

    /// Disclosure policy built from the configured radii.
    ///
    /// Rejects a disclosure radius wider than the default search radius.
    pub fn disclosure_policy(&self) -> Result<DisclosurePolicy, SettingsError> {
        Ok(DisclosurePolicy::new(
            self.disclosure_radius_metres
                .unwrap_or(DISCLOSURE_RADIUS_METRES),
            self.default_search_radius_metres
                .unwrap_or(DEFAULT_SEARCH_RADIUS_METRES),
        )?)
    }
}
