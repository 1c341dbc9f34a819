use lazy_static::lazy_static;
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "heimdall_dev";

lazy_static! {
    /// Raw `RUST_ENV` value, read once per process.
    pub static ref RUST_ENV: String = {
        env::var("RUST_ENV").unwrap_or("development".into())
    };
}

/// Runtime environment the tooling is executing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    /// Environment named by `RUST_ENV`, defaulting to development.
    pub fn current() -> Result<Self, ConfigError> {
        RUST_ENV.parse()
    }

    pub fn as_str(&self) -> &str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Test => "test",
            AppEnvironment::Production => "production",
        }
    }

    pub fn allows_reset(&self) -> bool {
        *self != AppEnvironment::Production
    }
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "test" => Ok(AppEnvironment::Test),
            "production" | "prod" => Ok(AppEnvironment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the tooling connects to. Never hard-coded; the CLI fills it from flags or env.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub uri: String,
    pub database: String,
    /// Extra connection attempts after the first failure. Zero means fail immediately.
    pub connect_retries: u32,
}

impl TargetConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            connect_retries: 0,
        }
    }

    pub fn with_connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries;
        self
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MONGODB_URI, DEFAULT_DATABASE)
    }
}
