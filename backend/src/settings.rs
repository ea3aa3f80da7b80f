//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ENROLLMENTS_*` environment variables, and an
//! optional configuration file. Everything is optional; accessors fall back
//! to development defaults.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::viacep::DEFAULT_VIACEP_BASE_URL;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_VIACEP_TIMEOUT_SECS: u64 = 5;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind host and port could not be resolved.
    #[error("cannot resolve bind address {host}:{port}: {source}")]
    BindAddress {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    /// The bind host resolved to no addresses.
    #[error("bind address {host}:{port} resolved to nothing")]
    NoBindAddress { host: String, port: u16 },
    /// The ViaCEP base URL is not a valid URL.
    #[error("invalid ViaCEP base URL '{value}': {source}")]
    ViaCepUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Configuration values for the HTTP server and its adapters.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ENROLLMENTS")]
pub struct AppSettings {
    /// Interface to bind. Defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind. Defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Fixture adapters are used when unset.
    pub database_url: Option<String>,
    /// Base URL of the ViaCEP directory.
    pub viacep_base_url: Option<String>,
    /// Per-request timeout for ViaCEP calls, in seconds.
    pub viacep_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the bind address from host and port.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the host cannot be resolved.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let (host, port) = (self.host(), self.port());
        (host, port)
            .to_socket_addrs()
            .map_err(|source| SettingsError::BindAddress {
                host: host.to_owned(),
                port,
                source,
            })?
            .next()
            .ok_or_else(|| SettingsError::NoBindAddress {
                host: host.to_owned(),
                port,
            })
    }

    /// Return the database URL when persistence is configured.
    ///
    /// Blank values count as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the ViaCEP base URL, falling back to the public service.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ViaCepUrl`] when the configured value does
    /// not parse.
    pub fn viacep_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .viacep_base_url
            .as_deref()
            .unwrap_or(DEFAULT_VIACEP_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::ViaCepUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the ViaCEP request timeout.
    pub fn viacep_timeout(&self) -> Duration {
        Duration::from_secs(
            self.viacep_timeout_secs
                .unwrap_or(DEFAULT_VIACEP_TIMEOUT_SECS),
        )
    }
}
