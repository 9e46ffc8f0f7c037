//! Telnet connection configuration.

use std::time::Duration;

use secrecy::SecretString;

/// Fixed legacy remote-terminal port of the target device family.
pub const DEFAULT_TELNET_PORT: u16 = 23;

/// Telnet connection configuration.
///
/// Carries everything a session needs — address, credentials, timeouts —
/// so nothing is read from ambient process state inside the core.
#[derive(Debug, Clone)]
pub struct TelnetConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// Telnet port (default: 23).
    pub port: u16,

    /// Username for the device's interactive login.
    pub username: String,

    /// Password for the device's interactive login.
    ///
    /// Wrapped in [`SecretString`] so it is redacted from `Debug` output
    /// and logs.
    pub password: SecretString,

    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,

    /// Default deadline for every expect/wait operation on the session.
    pub read_timeout: Duration,
}

impl TelnetConfig {
    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
