//! Error types for telscrape.

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for telscrape operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level errors (TCP connect, read/write failures)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol-level errors (an expected device marker never observed)
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Field extraction errors
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Invalid configuration in the session builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Transport layer errors, fatal to the session.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Connect did not complete in time
    #[error("Connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// I/O error on an established connection
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The exchange phase during which a protocol wait failed.
///
/// Login-phase errors mean nothing useful can be scraped this cycle;
/// the caller should abort the poll and surface the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the device's `"login: "` prompt.
    UsernamePrompt,
    /// Waiting for the device's `"Password: "` prompt.
    PasswordPrompt,
    /// Waiting for the idle shell prompt before a command may be sent.
    IdlePrompt,
    /// Waiting for the `"OK"` marker that ends a command response.
    CommandCompletion,
    /// Waiting for a caller-supplied target.
    Expect,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::UsernamePrompt => "username prompt",
            Phase::PasswordPrompt => "password prompt",
            Phase::IdlePrompt => "idle prompt",
            Phase::CommandCompletion => "command completion",
            Phase::Expect => "expect",
        };
        f.write_str(name)
    }
}

/// Protocol layer errors (marker/prompt waits).
///
/// A wait ends in exactly one of three ways: the target was observed
/// (`Ok`), the peer closed the stream first, or the deadline elapsed.
/// Closure and expiry are distinct variants, never an empty success.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The target was not observed before the deadline
    #[error("{phase}: {target:?} not observed within {waited:?}")]
    ExpectTimeout {
        phase: Phase,
        target: String,
        waited: Duration,
    },

    /// The stream closed before the target was observed
    #[error("{phase}: connection closed before {target:?} was observed")]
    ConnectionClosed { phase: Phase, target: String },

    /// Operation on a session that was already closed
    #[error("Session not connected")]
    NotConnected,
}

/// Field extraction errors.
///
/// `NotFound` is a normal, recoverable outcome for optional diagnostic
/// fields; `Parse` indicates malformed numeric text and is logged as a
/// defect. Neither aborts a whole record.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Fewer than `occurrence + 1` matches of the label exist
    #[error("no occurrence {occurrence} of label {label:?} in captured text")]
    NotFound { label: String, occurrence: usize },

    /// The matched numeric text could not be converted
    #[error("value {value:?} for label {label:?} is not numeric: {source}")]
    Parse {
        label: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Result type alias using telscrape's Error.
pub type Result<T> = std::result::Result<T, Error>;
