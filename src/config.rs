//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid BIND_HOST: {0}")]
    InvalidHost(String),
    #[error("invalid ACCESS_UPSTREAM (expected http:// or https:// URL): {0}")]
    InvalidUpstream(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub assets_dir: PathBuf,
    /// Base URL of the access backend that `/access/*` is forwarded to.
    pub access_upstream: Option<String>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_HOST`: default `0.0.0.0`
    /// - `ASSETS_DIR`: default `client/public/assets` next to this crate
    /// - `ACCESS_UPSTREAM`: access backend base URL; unset disables `/access/*`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host_raw = lookup("BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());
        let host = host_raw.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost(host_raw))?;

        let assets_dir = lookup("ASSETS_DIR").map_or_else(default_assets_dir, PathBuf::from);

        let access_upstream = match lookup("ACCESS_UPSTREAM") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(parse_upstream(&raw).ok_or(ConfigError::InvalidUpstream(raw))?),
            None => None,
        };

        Ok(Self { host, port, assets_dir, access_upstream })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("client/public/assets")
}

fn parse_upstream(raw: &str) -> Option<String> {
    let url = raw.trim().trim_end_matches('/');
    let host = url.strip_prefix("http://").or_else(|| url.strip_prefix("https://"))?;
    (!host.is_empty()).then(|| url.to_owned())
}
