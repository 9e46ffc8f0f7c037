//! `atcli at+bnrinfo`: serving-cell and per-chain radio quality metrics.

use log::{debug, warn};
use serde::Serialize;

use super::extract::FieldSpec;
use super::fields;
use crate::error::{ExtractError, Result};
use crate::session::Session;
use crate::transport::TelnetStream;

/// The diagnostic command, line terminator included.
pub const COMMAND: &str = "atcli at+bnrinfo\n";

/// Structured serving-cell diagnostics scraped from one bnrinfo block.
///
/// All values are integral (the device's fractional precision is
/// truncated); fields the extractor could not populate keep their zero
/// default and are listed in the surrounding [`Report`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct BnrInfo {
    pub nr_band: i64,
    pub earfcn: i64,
    pub dl_bandwidth_mhz: i64,
    pub physical_cell_id: i64,
    pub pusch_tx_power: i64,
    pub pucch_tx_power: i64,
    pub nr_cqi: i64,
    pub rank: i64,
    pub serving_beam_ssb_index: i64,
    pub fr2_serving_beam: i64,
    pub rsrq: i64,
    pub rsrp: i64,
    pub sinr: i64,
    /// Per-chain receive figures, one entry per receiver chain.
    pub rx: [RxChain; fields::RX_CHAINS],
}

/// Receive quality figures for one receiver chain.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RxChain {
    pub power: i64,
    pub ecio: i64,
    pub rsrp: i64,
    pub phase: i64,
    pub sinr: i64,
}

/// A field the extractor could not populate; the record keeps its zero
/// default for it.
#[derive(Debug)]
pub struct FieldFailure {
    /// Record field name (matches the [`BnrInfo`] member).
    pub field: &'static str,

    /// Receiver chain index for per-chain fields.
    pub chain: Option<usize>,

    pub error: ExtractError,
}

/// One poll's outcome: the record plus whatever fields failed.
///
/// Per-field failures never abort the record — a device that omits an
/// optional field still yields usable partial data.
#[derive(Debug, Default)]
pub struct Report {
    pub info: BnrInfo,
    pub failures: Vec<FieldFailure>,
}

impl Report {
    /// Whether every field was extracted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Issue the bnrinfo command on an authenticated session and parse the
/// captured response.
///
/// Session and protocol failures (device not idle, response never
/// completed, stream closed) abort the poll; extraction failures do
/// not — they are collected in the returned [`Report`].
pub async fn fetch<S: TelnetStream>(session: &mut Session<S>) -> Result<Report> {
    session.write_command(COMMAND).await?;
    let captured = session.expect_completion().await?;
    debug!("bnrinfo response captured ({} bytes)", captured.len);
    Ok(parse(&captured.text))
}

/// Extract every bnrinfo field from a captured response block.
///
/// Each field is attempted independently; a missing or malformed field
/// is logged, recorded as a [`FieldFailure`], and left at zero.
pub fn parse(text: &str) -> Report {
    let mut report = Report::default();

    let scalars: [(&'static str, FieldSpec, fn(&mut BnrInfo) -> &mut i64); 13] = [
        ("nr_band", fields::NR_BAND, |r| &mut r.nr_band),
        ("earfcn", fields::EARFCN, |r| &mut r.earfcn),
        ("dl_bandwidth_mhz", fields::DL_BANDWIDTH, |r| &mut r.dl_bandwidth_mhz),
        ("physical_cell_id", fields::PHYSICAL_CELL_ID, |r| &mut r.physical_cell_id),
        ("pusch_tx_power", fields::PUSCH_TX_POWER, |r| &mut r.pusch_tx_power),
        ("pucch_tx_power", fields::PUCCH_TX_POWER, |r| &mut r.pucch_tx_power),
        ("nr_cqi", fields::NR_CQI, |r| &mut r.nr_cqi),
        ("rank", fields::RANK, |r| &mut r.rank),
        ("serving_beam_ssb_index", fields::SERVING_BEAM_SSB_INDEX, |r| {
            &mut r.serving_beam_ssb_index
        }),
        ("fr2_serving_beam", fields::FR2_SERVING_BEAM, |r| &mut r.fr2_serving_beam),
        ("rsrq", fields::RSRQ, |r| &mut r.rsrq),
        ("rsrp", fields::RSRP, |r| &mut r.rsrp),
        ("sinr", fields::SINR, |r| &mut r.sinr),
    ];

    for (field, spec, slot) in scalars {
        match spec.extract(text, 0) {
            Ok(value) => *slot(&mut report.info) = value,
            Err(error) => {
                warn!("bnrinfo: {field}: {error}");
                report.failures.push(FieldFailure {
                    field,
                    chain: None,
                    error,
                });
            }
        }
    }

    let per_chain: [(&'static str, FieldSpec, fn(&mut RxChain) -> &mut i64); 5] = [
        ("rx.power", fields::RX_POWER, |c| &mut c.power),
        ("rx.ecio", fields::RX_ECIO, |c| &mut c.ecio),
        ("rx.rsrp", fields::RX_RSRP, |c| &mut c.rsrp),
        ("rx.phase", fields::RX_PHASE, |c| &mut c.phase),
        ("rx.sinr", fields::RX_SINR, |c| &mut c.sinr),
    ];

    for chain in 0..fields::RX_CHAINS {
        for (field, spec, slot) in per_chain {
            match spec.extract(text, chain) {
                Ok(value) => *slot(&mut report.info.rx[chain]) = value,
                Err(error) => {
                    warn!("bnrinfo: {field} (chain {chain}): {error}");
                    report.failures.push(FieldFailure {
                        field,
                        chain: Some(chain),
                        error,
                    });
                }
            }
        }
    }

    report
}
