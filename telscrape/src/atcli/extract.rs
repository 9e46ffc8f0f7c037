//! Numeric field extraction from free-form diagnostic text.

use regex::Regex;

use crate::error::ExtractError;

/// An extraction request: a device output label plus the occurrence
/// offset at which its values start.
///
/// Most fields sit at offset 0. Offsets exist because the device
/// sometimes interleaves unrelated numeric output under the same label
/// ahead of the values of interest (see [`fields`](super::fields)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The label preceding the value in device output.
    pub label: &'static str,

    /// Occurrences of the label to skip before occurrence 0.
    pub occurrence_offset: usize,
}

impl FieldSpec {
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            occurrence_offset: 0,
        }
    }

    pub const fn with_offset(label: &'static str, occurrence_offset: usize) -> Self {
        Self {
            label,
            occurrence_offset,
        }
    }

    /// Extract this field's `occurrence`-th value from captured text,
    /// applying the spec's occurrence offset.
    ///
    /// Errors report the caller-facing `occurrence`, not the shifted
    /// label occurrence, so failure lists read in chain terms.
    pub fn extract(&self, text: &str, occurrence: usize) -> Result<i64, ExtractError> {
        extract_value(text, self.label, occurrence + self.occurrence_offset).map_err(|error| {
            match error {
                ExtractError::NotFound { label, .. } => ExtractError::NotFound { label, occurrence },
                other => other,
            }
        })
    }
}

/// Extract the `occurrence`-th (0-based) signed numeric value following
/// `label` in `text`.
///
/// The label must start at a word boundary — a lookup for `"RQ"` never
/// matches inside `"RSRQ"` — and may be followed by a colon and
/// whitespace before the number. Matches are counted in left-to-right
/// order of appearance.
///
/// Decimal values are truncated toward zero: `12.5` yields `12` and
/// `-12.5` yields `-12`. The device reports some quantities with
/// fractional precision, which this interface discards.
///
/// Absence of the label (or too few occurrences) is the normal outcome
/// for optional diagnostic fields and reported as
/// [`ExtractError::NotFound`], never a silent zero.
pub fn extract_value(text: &str, label: &str, occurrence: usize) -> Result<i64, ExtractError> {
    let pattern = format!(r"\b{}\s*:?\s*(-?\d+(?:\.\d+)?)", regex::escape(label));
    // An escaped literal always forms a valid pattern.
    let re = Regex::new(&pattern).expect("escaped label pattern");

    let captures = re
        .captures_iter(text)
        .nth(occurrence)
        .ok_or_else(|| ExtractError::NotFound {
            label: label.to_string(),
            occurrence,
        })?;

    let value = &captures[1];
    let parsed: f64 = value.parse().map_err(|source| ExtractError::Parse {
        label: label.to_string(),
        value: value.to_string(),
        source,
    })?;
    Ok(parsed.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_labels() {
        let text = "NR BAND : 41\r\nEARFCN : 504990\r\nRSRQ: -10\r\n";
        assert_eq!(extract_value(text, "NR BAND", 0).unwrap(), 41);
        assert_eq!(extract_value(text, "EARFCN", 0).unwrap(), 504990);
        assert_eq!(extract_value(text, "RSRQ", 0).unwrap(), -10);
    }

    #[test]
    fn test_occurrence_selection() {
        let text = "rsrp: -95\nrsrp: -97\nrsrp: -99\nrsrp: -101\n";
        assert_eq!(extract_value(text, "rsrp", 0).unwrap(), -95);
        assert_eq!(extract_value(text, "rsrp", 2).unwrap(), -99);
        assert_eq!(extract_value(text, "rsrp", 3).unwrap(), -101);
    }

    #[test]
    fn test_too_few_occurrences_is_not_found() {
        let text = "rsrp: -95\nrsrp: -97\n";
        let err = extract_value(text, "rsrp", 2).unwrap_err();
        match err {
            ExtractError::NotFound { label, occurrence } => {
                assert_eq!(label, "rsrp");
                assert_eq!(occurrence, 2);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_label_is_not_found() {
        let err = extract_value("NR BAND : 41\n", "FR2 serving Beam", 0).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }));
    }

    #[test]
    fn test_no_substring_false_positive() {
        // "RQ" must not match inside "RSRQ".
        let text = "RSRQ: -10\n";
        assert!(matches!(
            extract_value(text, "RQ", 0),
            Err(ExtractError::NotFound { .. })
        ));
    }

    #[test]
    fn test_colon_and_whitespace_variants() {
        assert_eq!(extract_value("SINR:12", "SINR", 0).unwrap(), 12);
        assert_eq!(extract_value("SINR: 12", "SINR", 0).unwrap(), 12);
        assert_eq!(extract_value("SINR  :  12", "SINR", 0).unwrap(), 12);
        assert_eq!(extract_value("SINR 12", "SINR", 0).unwrap(), 12);
    }

    #[test]
    fn test_decimal_truncates_toward_zero() {
        assert_eq!(extract_value("SINR: 12.5", "SINR", 0).unwrap(), 12);
        assert_eq!(extract_value("RSRQ: -12.5", "RSRQ", 0).unwrap(), -12);
        assert_eq!(extract_value("RSRQ: -12.9", "RSRQ", 0).unwrap(), -12);
    }

    #[test]
    fn test_multiword_label() {
        let text = "averaged PUSCH TX power : -3\n";
        assert_eq!(extract_value(text, "averaged PUSCH TX power", 0).unwrap(), -3);
    }

    #[test]
    fn test_field_spec_offset() {
        let text = "tx power: 1\nmax power: 2\npower: -80\npower: -82\n";
        let spec = FieldSpec::with_offset("power", 2);
        assert_eq!(spec.extract(text, 0).unwrap(), -80);
        assert_eq!(spec.extract(text, 1).unwrap(), -82);
    }

    #[test]
    fn test_field_spec_not_found_reports_caller_occurrence() {
        // Only the two TX figures are present; every chain lookup
        // misses, and the reported occurrence must be the chain's, not
        // the offset-shifted label occurrence.
        let text = "tx power: 1\nmax power: 2\n";
        let spec = FieldSpec::with_offset("power", 2);
        match spec.extract(text, 0).unwrap_err() {
            ExtractError::NotFound { label, occurrence } => {
                assert_eq!(label, "power");
                assert_eq!(occurrence, 0);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        match spec.extract(text, 3).unwrap_err() {
            ExtractError::NotFound { occurrence, .. } => assert_eq!(occurrence, 3),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
