//! Vendor `atcli` diagnostic commands and response parsing.
//!
//! Each submodule covers one diagnostic command: it issues the command
//! over an authenticated [`Session`](crate::Session), waits for the
//! `"OK"` completion marker, and extracts the command's fields from the
//! captured free-form text.

pub mod bnrinfo;
mod extract;
pub mod fields;

pub use bnrinfo::{BnrInfo, FieldFailure, Report, RxChain};
pub use extract::{FieldSpec, extract_value};
