//! # Telscrape
//!
//! Async telnet CLI scraper library for cellular CPE diagnostics.
//!
//! Telscrape logs into a cellular modem/router over its legacy telnet
//! shell, issues vendor `atcli` diagnostic commands, and extracts
//! structured radio-quality metrics from the free-form text the device
//! prints back.
//!
//! ## Features
//!
//! - Async telnet sessions over plain TCP via tokio
//! - Expect-style literal prompt/marker waits with incremental matching
//! - Deadline-bounded waits on every operation — no indefinite hangs
//! - Resilient key-value extraction tolerating label variants, extra
//!   whitespace, and repeated per-receiver-chain fields
//! - Partial-failure tolerance: a missing diagnostic field is reported,
//!   not fatal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use telscrape::{SessionBuilder, atcli};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telscrape::Error> {
//!     let mut session = SessionBuilder::new("192.168.0.1")
//!         .username("admin")
//!         .password("secret")
//!         .open()
//!         .await?;
//!
//!     let report = atcli::bnrinfo::fetch(&mut session).await?;
//!     println!("NR band {}, RSRP {}", report.info.nr_band, report.info.rsrp);
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! Scheduling, retries, and telemetry sinks are the caller's concern;
//! the library hands back one typed record (plus per-field failures)
//! per poll.

pub mod atcli;
pub mod error;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use atcli::{BnrInfo, Report};
pub use error::{Error, ExtractError, Phase, ProtocolError, TransportError};
pub use session::{ExpectResult, Session, SessionBuilder};
pub use transport::{TelnetConfig, TelnetStream};
