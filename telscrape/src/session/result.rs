//! Capture type produced by expect/wait operations.

/// The text captured by a successful wait: everything received from the
/// start of the wait up to and including the first match of the target.
///
/// Produced by [`Session::expect`](super::Session::expect) and consumed
/// immediately by the caller; the session does not retain it.
#[derive(Debug, Clone)]
pub struct ExpectResult {
    /// Captured text, NUL padding bytes already stripped.
    pub text: String,

    /// Byte length of the raw capture. Differs from `text.len()` only
    /// when invalid UTF-8 in the capture was replaced during
    /// conversion.
    pub len: usize,
}

impl ExpectResult {
    pub(crate) fn from_bytes(captured: Vec<u8>) -> Self {
        let len = captured.len();
        let text = String::from_utf8_lossy(&captured).into_owned();
        Self { text, len }
    }

    /// Iterate over the captured lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Check if the capture contains a substring.
    pub fn contains(&self, pattern: &str) -> bool {
        self.text.contains(pattern)
    }
}

impl std::fmt::Display for ExpectResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_raw_capture_bytes() {
        let result = ExpectResult::from_bytes(b"OK".to_vec());
        assert_eq!(result.len, 2);
        assert_eq!(result.len, result.text.len());
    }

    #[test]
    fn test_len_unaffected_by_lossy_conversion() {
        // 0xFF is not valid UTF-8; conversion replaces it with U+FFFD
        // (3 bytes), but `len` still reports the raw capture.
        let result = ExpectResult::from_bytes(vec![0xFF, b'O', b'K']);
        assert_eq!(result.len, 3);
        assert!(result.text.contains('\u{FFFD}'));
        assert_ne!(result.len, result.text.len());
    }
}
