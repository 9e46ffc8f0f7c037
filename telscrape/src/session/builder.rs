//! Builder for opening device sessions.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tokio::net::TcpStream;

use super::Session;
use crate::error::{Error, Result};
use crate::transport::{DEFAULT_TELNET_PORT, TelnetConfig};

/// Builder for constructing a [`TelnetConfig`] and opening a session.
///
/// # Example
///
/// ```rust,no_run
/// use telscrape::SessionBuilder;
///
/// # async fn example() -> Result<(), telscrape::Error> {
/// let mut session = SessionBuilder::new("192.168.0.1")
///     .username("admin")
///     .password("secret")
///     .open()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<SecretString>,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl SessionBuilder {
    /// Create a new builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_TELNET_PORT,
            username: None,
            password: None,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
        }
    }

    /// Set the telnet port (default: 23).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the login username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set the TCP connect timeout (default: 10 s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the default deadline for every wait operation (default: 30 s).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Build the configuration without connecting.
    pub fn config(self) -> Result<TelnetConfig> {
        let username = self.username.ok_or_else(|| Error::InvalidConfig {
            message: "Username is required".to_string(),
        })?;
        let password = self.password.ok_or_else(|| Error::InvalidConfig {
            message: "Password is required".to_string(),
        })?;

        Ok(TelnetConfig {
            host: self.host,
            port: self.port,
            username,
            password,
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        })
    }

    /// Connect and log in, returning a session at the idle prompt.
    pub async fn open(self) -> Result<Session<TcpStream>> {
        let config = self.config()?;
        let mut session = Session::connect(&config).await?;
        session
            .login(&config.username, config.password.expose_secret())
            .await?;
        Ok(session)
    }
}
