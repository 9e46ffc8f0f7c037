//! Read accumulator with incremental literal-substring search.
//!
//! The device's shell output is an unbounded, unstructured character
//! stream; the only framing is "a known literal eventually appears". The
//! buffer accumulates everything read and lets the session scan for a
//! target without re-searching bytes that were already ruled out — each
//! new chunk only requires rescanning a tail of `needle_len - 1` old
//! bytes, so a whole wait is O(stream length) rather than O(n²).

use bytes::BytesMut;
use memchr::memmem::Finder;

/// Growable accumulator of bytes received and not yet consumed.
///
/// NUL bytes are stripped at ingest: the device interleaves stray
/// padding bytes in its output, and they must never reach marker
/// matching or the field extractor.
#[derive(Debug, Default)]
pub struct ExpectBuffer {
    buf: BytesMut,
}

impl ExpectBuffer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
        }
    }

    /// Append a chunk, dropping NUL padding bytes.
    pub fn extend(&mut self, data: &[u8]) {
        if data.contains(&0) {
            self.buf.extend(data.iter().filter(|&&b| b != 0));
        } else {
            self.buf.extend_from_slice(data);
        }
    }

    /// Search for the needle starting at byte offset `from`.
    ///
    /// Returns the absolute offset one past the end of the first match.
    pub fn find_end(&self, finder: &Finder<'_>, from: usize) -> Option<usize> {
        let from = from.min(self.buf.len());
        finder
            .find(&self.buf[from..])
            .map(|i| from + i + finder.needle().len())
    }

    /// Offset from which the next search must start so that a match
    /// spanning the chunk boundary is still found: everything up to the
    /// last `needle_len - 1` bytes is already ruled out.
    pub fn rescan_from(&self, needle_len: usize) -> usize {
        self.buf.len().saturating_sub(needle_len.saturating_sub(1))
    }

    /// Split off and return everything up to `end`, retaining the rest
    /// for the next wait.
    pub fn take_to(&mut self, end: usize) -> Vec<u8> {
        self.buf.split_to(end).to_vec()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
