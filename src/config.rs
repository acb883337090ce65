//! Server configuration.
//!
//! Settings are read once from the environment at startup:
//!
//! - `PAJAK_BIND_ADDR`: socket address to listen on, default `127.0.0.1:3000`.
//! - `PAJAK_LOG`: log filter used when `RUST_LOG` is unset, default `info`.

use crate::error::TaxError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind_addr: SocketAddr,
    /// `tracing_subscriber` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, TaxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TaxError> {
        let addr = lookup("PAJAK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .parse::<SocketAddr>()
            .map_err(|err| TaxError::Config(format!("PAJAK_BIND_ADDR {addr:?}: {err}")))?;
        let log_filter = lookup("PAJAK_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self { bind_addr, log_filter })
    }
}
