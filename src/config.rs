//! IMAP connection configuration

use crate::error::{Error, Result};
use std::env;

/// Connection settings for building a concrete IMAP transport.
///
/// The adapter itself never opens a socket: this type exists solely
/// so applications can construct whatever [`ImapTransport`]
/// implementation they wire in underneath from one well-known set of
/// environment variables.
///
/// [`ImapTransport`]: crate::ImapTransport
#[derive(Debug, Clone)]
pub struct ImapConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Per-operation transport timeout in seconds.
    pub timeout_secs: u64,
}

impl ImapConfig {
    /// Load IMAP configuration from environment variables
    ///
    /// Reads from `.env` file if present. Required variables:
    /// - `IMAP_USERNAME`
    /// - `IMAP_PASSWORD`
    ///
    /// Optional (with defaults):
    /// - `IMAP_HOST` (default: `127.0.0.1`)
    /// - `IMAP_PORT` (default: `993`)
    /// - `IMAP_TIMEOUT_SECS` (default: `10`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a required variable is missing
    /// or a numeric variable fails to parse.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any variable source.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("IMAP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("IMAP_PORT")
                .unwrap_or_else(|| "993".to_string())
                .parse()
                .map_err(|e| Error::Config(format!("Invalid IMAP_PORT: {e}")))?,
            username: lookup("IMAP_USERNAME")
                .ok_or_else(|| Error::Config("IMAP_USERNAME not set".into()))?,
            password: lookup("IMAP_PASSWORD")
                .ok_or_else(|| Error::Config("IMAP_PASSWORD not set".into()))?,
            timeout_secs: lookup("IMAP_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .map_err(|e| Error::Config(format!("Invalid IMAP_TIMEOUT_SECS: {e}")))?,
        })
    }
}
