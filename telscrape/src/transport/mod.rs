//! TCP transport to the device's telnet service.
//!
//! The CPE's remote terminal is a bare TCP byte stream on port 23 — no
//! option negotiation, no escape sequences. Everything above "send bytes /
//! receive bytes" lives in the session layer.

mod config;
mod tcp;

pub use config::{DEFAULT_TELNET_PORT, TelnetConfig};
pub use tcp::{TelnetStream, connect};
