//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{Result, StoreError};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the store can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Seed for the store's random source; OS entropy when unset
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum store entries (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `RNG_SEED` - Optional seed for `spop` / `srandmember`
    ///
    /// Unset variables take their default. A variable that is set but does
    /// not parse is an `InvalidConfiguration` error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            max_entries: read_var("MAX_ENTRIES")?.unwrap_or(defaults.max_entries),
            server_port: read_var("SERVER_PORT")?.unwrap_or(defaults.server_port),
            rng_seed: read_var("RNG_SEED")?,
        })
    }
}

/// Parses the environment variable `name`, or None when it is unset.
fn read_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            StoreError::InvalidConfiguration(format!("{} has invalid value '{}'", name, raw))
        }),
        Err(_) => Ok(None),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            server_port: 3000,
            rng_seed: None,
        }
    }
}
