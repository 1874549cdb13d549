//! Connection options and data-source string assembly

use super::error::{DatabaseError, Result};
use serde::Deserialize;
use std::fmt;

/// Default database host
pub const DEFAULT_HOST: &str = "localhost";

/// Default database port
pub const DEFAULT_PORT: u16 = 3306;

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Everything needed to open a connection
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionOptions {
    pub database: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ConnectionOptions {
    /// Options for `database` on `localhost:3306` with empty credentials
    pub fn new<S: Into<String>>(database: S) -> Self {
        Self {
            database: database.into(),
            username: String::new(),
            password: String::new(),
            host: default_host(),
            port: DEFAULT_PORT,
        }
    }

    /// Set the database host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    /// Set the database port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username
    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = username.into();
        self
    }

    /// Set the password
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = password.into();
        self
    }

    /// Parse options from a JSON document
    ///
    /// `host` and `port` fall back to their defaults when absent.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| DatabaseError::InvalidConfig(e.to_string()))?;
        if options.database.is_empty() {
            return Err(DatabaseError::InvalidConfig(
                "database name must not be empty".to_string(),
            ));
        }
        Ok(options)
    }

    /// Build the data-source string for `driver`.
    ///
    /// Credentials are never part of the string.
    pub fn dsn(&self, driver: &str) -> String {
        format!(
            "{}:dbname={};host={};port={}",
            driver, self.database, self.host, self.port
        )
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
