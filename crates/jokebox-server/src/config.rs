//! Server configuration from the environment.

use anyhow::Context;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// # Errors
    /// Returns an error when `PORT` is set but not a valid port number.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = parse_port(std::env::var("PORT").ok())?;
        Ok(Self { port })
    }
}

fn parse_port(raw: Option<String>) -> anyhow::Result<u16> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid PORT value: {raw}")),
    }
}
