//! TCP connection establishment.

use log::debug;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use super::config::TelnetConfig;
use crate::error::{Result, TransportError};

/// Byte stream a [`Session`](crate::Session) can drive.
///
/// Implemented for any async duplex stream, so tests can substitute a
/// [`tokio::io::DuplexStream`] for a real [`TcpStream`].
pub trait TelnetStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> TelnetStream for T {}

/// Connect to the device's telnet service.
///
/// The connect attempt is bounded by `config.connect_timeout`. Refusal,
/// unreachable hosts, and address resolution failures surface as
/// [`TransportError::ConnectionFailed`]; expiry as
/// [`TransportError::ConnectTimeout`]. No retry is performed here —
/// retries are the caller's responsibility.
pub async fn connect(config: &TelnetConfig) -> Result<TcpStream> {
    let addr = config.socket_addr();

    let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(&addr))
        .await
        .map_err(|_| TransportError::ConnectTimeout(config.connect_timeout))?
        .map_err(|source| TransportError::ConnectionFailed {
            host: config.host.clone(),
            port: config.port,
            source,
        })?;

    // Prompt exchanges are tiny writes; don't let Nagle delay them.
    stream.set_nodelay(true).map_err(TransportError::Io)?;

    debug!("connected to {}", addr);
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;
    use crate::error::Error;

    fn config(host: &str, port: u16) -> TelnetConfig {
        TelnetConfig {
            host: host.to_string(),
            port,
            username: "admin".to_string(),
            password: SecretString::from("secret"),
            connect_timeout: Duration::from_millis(500),
            read_timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Bind a listener to grab a free port, then drop it so the
        // connect attempt is refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = connect(&config("127.0.0.1", port)).await.unwrap_err();
        match err {
            Error::Transport(TransportError::ConnectionFailed { host, port: p, .. }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(p, port);
            }
            other => panic!("expected ConnectionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connect_accepted() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let stream = connect(&config("127.0.0.1", port)).await.unwrap();
        assert!(stream.peer_addr().is_ok());
    }
}
