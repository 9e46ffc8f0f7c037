//! Field-to-label table for `atcli at+bnrinfo` output.
//!
//! Every label the device prints and every occurrence quirk is
//! centralized here, so format oddities are documented once instead of
//! scattered as inline literals.

use super::extract::FieldSpec;

/// Number of receive chains reported inline in one bnrinfo block.
pub const RX_CHAINS: usize = 4;

/// The device prints two unrelated TX "power" figures before the
/// per-chain receive block, so chain N's power is label occurrence
/// N + 2.
pub const RX_POWER_OCCURRENCE_OFFSET: usize = 2;

// Scalar fields: one value per block.
pub const NR_BAND: FieldSpec = FieldSpec::new("NR BAND");
pub const EARFCN: FieldSpec = FieldSpec::new("EARFCN");
pub const DL_BANDWIDTH: FieldSpec = FieldSpec::new("DL_bandwidth");
pub const PHYSICAL_CELL_ID: FieldSpec = FieldSpec::new("physical cell ID");
pub const PUSCH_TX_POWER: FieldSpec = FieldSpec::new("averaged PUSCH TX power");
pub const PUCCH_TX_POWER: FieldSpec = FieldSpec::new("averaged PUCCH TX power");
pub const NR_CQI: FieldSpec = FieldSpec::new("NR CQI");
pub const RANK: FieldSpec = FieldSpec::new("RANK");
pub const SERVING_BEAM_SSB_INDEX: FieldSpec = FieldSpec::new("Serving Beam SSB index");
pub const FR2_SERVING_BEAM: FieldSpec = FieldSpec::new("FR2 serving Beam");
pub const RSRQ: FieldSpec = FieldSpec::new("RSRQ");
pub const RSRP: FieldSpec = FieldSpec::new("RSRP");
pub const SINR: FieldSpec = FieldSpec::new("SINR");

// Per-chain fields: one value per receive chain, lowercase in device
// output (the uppercase variants above are the serving-cell summary).
pub const RX_POWER: FieldSpec = FieldSpec::with_offset("power", RX_POWER_OCCURRENCE_OFFSET);
pub const RX_ECIO: FieldSpec = FieldSpec::new("ecio");
pub const RX_RSRP: FieldSpec = FieldSpec::new("rsrp");
pub const RX_PHASE: FieldSpec = FieldSpec::new("phase");
pub const RX_SINR: FieldSpec = FieldSpec::new("sinr");
