//! Line extraction from raw pipe chunks
//!
//! Pipe reads return arbitrary slices of the byte stream: a chunk may hold
//! several readings or end halfway through one. [`LineSplitter`] buffers the
//! partial tail between chunks. Both `\n` and `\0` end a line, since some
//! producers write a NUL after every line.
//!
//! A line that reaches [`MAX_LINE_LEN`] bytes without a terminator is cut
//! there and emitted as it stands.

use crate::transport::pipe::READ_CHUNK_SIZE;

/// Longest reading kept in memory before it is emitted unterminated
pub const MAX_LINE_LEN: usize = 4 * READ_CHUNK_SIZE;

/// Accumulates pipe chunks and yields complete text lines
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line it completes
    ///
    /// Empty lines are skipped and a trailing `\r` is removed.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' || byte == b'\0' {
                if let Some(line) = self.take_line() {
                    lines.push(line);
                }
            } else {
                self.pending.push(byte);
                if self.pending.len() >= MAX_LINE_LEN {
                    log::warn!(
                        "Reading exceeds {} bytes without a terminator; splitting it",
                        MAX_LINE_LEN
                    );
                    lines.extend(self.take_line());
                }
            }
        }
        lines
    }

    /// Flush an unterminated last line at end of stream
    pub fn finish(&mut self) -> Option<String> {
        self.take_line()
    }

    /// Bytes held back waiting for a terminator
    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn take_line(&mut self) -> Option<String> {
        let raw = std::mem::take(&mut self.pending);
        let text = String::from_utf8_lossy(&raw);
        let line = text.trim_end_matches('\r');
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}
