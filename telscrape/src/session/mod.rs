//! Telnet session: login handshake and expect/write primitives.
//!
//! A [`Session`] owns exactly one live connection to a device and offers
//! blocking-style waits over its unstructured output stream. All waits
//! are deadline-bounded; a device that stops responding mid-exchange
//! produces a [`ProtocolError::ExpectTimeout`], never an indefinite hang.
//!
//! Sessions are strictly sequential: the protocol is request-then-wait,
//! and every operation takes `&mut self`. To poll several devices, open
//! one independent session per device.

mod buffer;
mod builder;
pub mod markers;
mod result;

pub use builder::SessionBuilder;
pub use result::ExpectResult;

use std::time::Duration;

use log::{debug, trace};
use memchr::memmem::Finder;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{Phase, ProtocolError, Result, TransportError};
use crate::transport::{self, TelnetConfig, TelnetStream};
use buffer::ExpectBuffer;

const READ_CHUNK: usize = 4096;

/// One live telnet session with a device.
///
/// Generic over the byte stream so tests can drive it with an in-memory
/// duplex pipe instead of a TCP connection.
pub struct Session<S = TcpStream> {
    /// The transport stream; `None` once closed.
    stream: Option<S>,

    /// Accumulator of bytes received and not yet consumed by a wait.
    buffer: ExpectBuffer,

    /// Default deadline for each wait operation.
    read_timeout: Duration,

    /// Whether the idle shell prompt has been observed and not yet
    /// spent on a command write. Set by a successful prompt wait
    /// (including login's confirmation wait), cleared by
    /// [`write_command`](Self::write_command).
    at_prompt: bool,
}

impl Session<TcpStream> {
    /// Open a TCP connection to the device described by `config`.
    ///
    /// The session is connected but not authenticated; call
    /// [`login`](Self::login) next.
    pub async fn connect(config: &TelnetConfig) -> Result<Self> {
        let stream = transport::connect(config).await?;
        Ok(Self::over(stream, config.read_timeout))
    }
}

impl<S: TelnetStream> Session<S> {
    /// Wrap an already-established stream.
    pub fn over(stream: S, read_timeout: Duration) -> Self {
        Self {
            stream: Some(stream),
            buffer: ExpectBuffer::new(),
            read_timeout,
            at_prompt: false,
        }
    }

    /// Whether the session still holds a live stream.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// The default wait deadline.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Override the default wait deadline.
    pub fn set_read_timeout(&mut self, timeout: Duration) {
        self.read_timeout = timeout;
    }

    /// Perform the device's interactive authentication sequence.
    ///
    /// Waits for `"login: "`, sends the username, waits for
    /// `"Password: "`, sends the password, then waits for the idle shell
    /// prompt as confirmation that authentication succeeded. A wrong
    /// credential therefore surfaces here, as a [`ProtocolError`] with
    /// [`Phase::IdlePrompt`], rather than on the first command.
    ///
    /// Nothing is written before the corresponding prompt is observed.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let banner = self
            .expect_with(markers::LOGIN_PROMPT, Phase::UsernamePrompt, self.read_timeout)
            .await?;
        debug!("username prompt observed after {} bytes", banner.len);
        self.write_raw(format!("{username}\n").as_bytes()).await?;

        self.expect_with(markers::PASSWORD_PROMPT, Phase::PasswordPrompt, self.read_timeout)
            .await?;
        debug!("password prompt observed");
        self.write_raw(format!("{password}\n").as_bytes()).await?;

        // Confirmation: the device prints the shell prompt only once the
        // credentials were accepted. This also leaves the session idle,
        // so the first write_command does not wait for a second prompt.
        self.expect_prompt().await?;
        debug!("login confirmed, device at idle prompt");
        Ok(())
    }

    /// Read until `target` occurs as a literal substring of the
    /// accumulated input, bounded by the session's default deadline.
    ///
    /// On success the capture holds everything from the start of the
    /// wait up to and including the match; bytes received after the
    /// match stay buffered for the next wait. EOF before the match is
    /// [`ProtocolError::ConnectionClosed`], expiry is
    /// [`ProtocolError::ExpectTimeout`] — never an empty success.
    pub async fn expect(&mut self, target: &str) -> Result<ExpectResult> {
        self.expect_with(target, Phase::Expect, self.read_timeout).await
    }

    /// [`expect`](Self::expect) with a per-wait deadline override.
    pub async fn expect_timeout(&mut self, target: &str, timeout: Duration) -> Result<ExpectResult> {
        self.expect_with(target, Phase::Expect, timeout).await
    }

    /// Wait for the next line boundary.
    pub async fn read_line(&mut self) -> Result<ExpectResult> {
        self.expect(markers::LINE).await
    }

    /// Wait for the idle shell prompt.
    ///
    /// Used as a synchronization barrier so commands are not sent while
    /// a previous response is still streaming.
    pub async fn expect_prompt(&mut self) -> Result<()> {
        self.expect_with(markers::SHELL_PROMPT, Phase::IdlePrompt, self.read_timeout)
            .await?;
        self.at_prompt = true;
        Ok(())
    }

    /// Wait for the `"OK"` marker ending a command response and return
    /// the captured response text.
    pub async fn expect_completion(&mut self) -> Result<ExpectResult> {
        self.expect_with(markers::COMMAND_OK, Phase::CommandCompletion, self.read_timeout)
            .await
    }

    /// Send a command once the device is idle.
    ///
    /// Waits for the idle prompt first — unless it was already observed
    /// since the last write — then writes `command` verbatim. The
    /// command string must already include its own line terminator. If
    /// the prompt wait fails, zero command bytes are written.
    pub async fn write_command(&mut self, command: &str) -> Result<()> {
        if !self.at_prompt {
            self.expect_prompt().await?;
        }
        self.write_raw(command.as_bytes()).await?;
        self.at_prompt = false;
        trace!("command sent: {:?}", command);
        Ok(())
    }

    /// Release the transport. Idempotent; later operations return
    /// [`ProtocolError::NotConnected`].
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            self.buffer.clear();
            stream.shutdown().await.map_err(TransportError::Io)?;
            debug!("session closed");
        }
        Ok(())
    }

    async fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(ProtocolError::NotConnected)?;
        stream.write_all(data).await.map_err(TransportError::Io)?;
        stream.flush().await.map_err(TransportError::Io)?;
        Ok(())
    }

    async fn expect_with(
        &mut self,
        target: &str,
        phase: Phase,
        timeout: Duration,
    ) -> Result<ExpectResult> {
        if self.stream.is_none() {
            return Err(ProtocolError::NotConnected.into());
        }

        let finder = Finder::new(target.as_bytes());
        let deadline = tokio::time::Instant::now() + timeout;
        // Bytes already ruled out as match starts; leftovers from the
        // previous wait are scanned on the first pass.
        let mut searched = 0;

        loop {
            if let Some(end) = self.buffer.find_end(&finder, searched) {
                let captured = self.buffer.take_to(end);
                trace!("{phase}: matched {target:?} after {} bytes", captured.len());
                return Ok(ExpectResult::from_bytes(captured));
            }
            searched = self.buffer.rescan_from(finder.needle().len());

            let stream = self.stream.as_mut().ok_or(ProtocolError::NotConnected)?;
            let mut chunk = [0u8; READ_CHUNK];
            let n = tokio::time::timeout_at(deadline, stream.read(&mut chunk))
                .await
                .map_err(|_| ProtocolError::ExpectTimeout {
                    phase,
                    target: target.to_string(),
                    waited: timeout,
                })?
                .map_err(TransportError::Io)?;

            if n == 0 {
                return Err(ProtocolError::ConnectionClosed {
                    phase,
                    target: target.to_string(),
                }
                .into());
            }
            self.buffer.extend(&chunk[..n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};

    async fn device_read_line(stream: &mut DuplexStream) -> String {
        let mut out = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            let n = stream.read(&mut byte).await.unwrap();
            if n == 0 {
                break;
            }
            out.push(byte[0]);
            if byte[0] == b'\n' {
                break;
            }
        }
        String::from_utf8(out).unwrap()
    }

    /// Drive the device end of a successful login exchange.
    async fn device_login(stream: &mut DuplexStream) {
        stream
            .write_all(b"BCM96878 Broadband Router\nlogin: ")
            .await
            .unwrap();
        assert_eq!(device_read_line(stream).await, "admin\n");
        stream.write_all(b"Password: ").await.unwrap();
        assert_eq!(device_read_line(stream).await, "secret\n");
        stream.write_all(b"\n~ # ").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_sequence() {
        let (mut device, client) = duplex(4096);
        let dev = tokio::spawn(async move {
            device_login(&mut device).await;
            device
        });

        let mut session = Session::over(client, Duration::from_secs(5));
        session.login("admin", "secret").await.unwrap();
        dev.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_without_prompt_sends_nothing() {
        let (mut device, client) = duplex(4096);
        // A banner that never contains "login: ".
        device.write_all(b"### maintenance mode ###\n").await.unwrap();

        let mut session = Session::over(client, Duration::from_secs(5));
        let err = session.login("admin", "secret").await.unwrap_err();
        match err {
            Error::Protocol(ProtocolError::ExpectTimeout { phase, .. }) => {
                assert_eq!(phase, Phase::UsernamePrompt);
            }
            other => panic!("expected ExpectTimeout, got {other:?}"),
        }

        // No credential bytes left the session.
        drop(session);
        let mut sent = Vec::new();
        device.read_to_end(&mut sent).await.unwrap();
        assert!(sent.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_command_fails_before_sending() {
        let (mut device, client) = duplex(4096);
        // Device is mid-response and never returns to the idle prompt.
        device.write_all(b"still streaming output...\n").await.unwrap();

        let mut session = Session::over(client, Duration::from_secs(5));
        let err = session.write_command("atcli at+bnrinfo\n").await.unwrap_err();
        match err {
            Error::Protocol(ProtocolError::ExpectTimeout { phase, .. }) => {
                assert_eq!(phase, Phase::IdlePrompt);
            }
            other => panic!("expected ExpectTimeout, got {other:?}"),
        }

        drop(session);
        let mut sent = Vec::new();
        device.read_to_end(&mut sent).await.unwrap();
        assert!(sent.is_empty(), "command bytes were written: {sent:?}");
    }

    #[tokio::test]
    async fn test_expect_connection_closed() {
        let (mut device, client) = duplex(4096);
        device.write_all(b"partial outp").await.unwrap();
        drop(device);

        let mut session = Session::over(client, Duration::from_secs(5));
        let err = session.expect("OK").await.unwrap_err();
        match err {
            Error::Protocol(ProtocolError::ConnectionClosed { phase, target }) => {
                assert_eq!(phase, Phase::Expect);
                assert_eq!(target, "OK");
            }
            other => panic!("expected ConnectionClosed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_expect_target_split_across_chunks() {
        let (mut device, client) = duplex(4096);
        let dev = tokio::spawn(async move {
            device.write_all(b"response body\nPass").await.unwrap();
            tokio::task::yield_now().await;
            device.write_all(b"word: ").await.unwrap();
            device
        });

        let mut session = Session::over(client, Duration::from_secs(5));
        let result = session.expect("Password: ").await.unwrap();
        assert_eq!(result.text, "response body\nPassword: ");
        assert_eq!(result.len, result.text.len());
        dev.await.unwrap();
    }

    #[tokio::test]
    async fn test_nul_bytes_stripped_from_capture() {
        let (mut device, client) = duplex(4096);
        device.write_all(b"rsrp:\x00 -95\x00\r\nOK").await.unwrap();

        let mut session = Session::over(client, Duration::from_secs(5));
        let result = session.expect_completion().await.unwrap();
        assert_eq!(result.text, "rsrp: -95\r\nOK");
    }

    #[tokio::test]
    async fn test_command_round_trip() {
        let (mut device, client) = duplex(4096);
        let dev = tokio::spawn(async move {
            device_login(&mut device).await;

            // First command: session is already at the prompt from login.
            assert_eq!(device_read_line(&mut device).await, "atcli at+bnrinfo\n");
            device
                .write_all(b"atcli at+bnrinfo\r\nNR BAND : 41\r\n\r\nOK\r\n~ # ")
                .await
                .unwrap();

            // Second command: session must consume the trailing prompt first.
            assert_eq!(device_read_line(&mut device).await, "atcli at+bnrinfo\n");
            device
                .write_all(b"atcli at+bnrinfo\r\nNR BAND : 41\r\n\r\nOK\r\n~ # ")
                .await
                .unwrap();
            device
        });

        let mut session = Session::over(client, Duration::from_secs(5));
        session.login("admin", "secret").await.unwrap();

        session.write_command("atcli at+bnrinfo\n").await.unwrap();
        let first = session.expect_completion().await.unwrap();
        assert!(first.contains("NR BAND : 41"));
        assert!(first.text.ends_with("OK"));

        session.write_command("atcli at+bnrinfo\n").await.unwrap();
        let second = session.expect_completion().await.unwrap();
        assert!(second.contains("NR BAND : 41"));

        dev.await.unwrap();
    }

    #[tokio::test]
    async fn test_read_line() {
        let (mut device, client) = duplex(4096);
        device.write_all(b"first line\nsecond line\n").await.unwrap();

        let mut session = Session::over(client, Duration::from_secs(5));
        assert_eq!(session.read_line().await.unwrap().text, "first line\n");
        assert_eq!(session.read_line().await.unwrap().text, "second line\n");
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (_device, client) = duplex(4096);
        let mut session = Session::over(client, Duration::from_secs(5));
        assert!(session.is_open());

        session.close().await.unwrap();
        session.close().await.unwrap();
        assert!(!session.is_open());

        let err = session.expect("OK").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::NotConnected)
        ));
    }
}
