// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::io::{Read, Write};

/// Fixed-capacity, zero-padded byte buffer
///
/// Input longer than the capacity is truncated, shorter input is
/// right-padded with zero bytes. The buffer is always exactly
/// `capacity` bytes long, so it can be laid out at a fixed file offset.
///
/// Truncation is lossy and never fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixedBuf(Box<[u8]>);

impl FixedBuf {
    /// Creates a buffer of `capacity` bytes holding a prefix of `bytes`.
    #[must_use]
    pub fn new(bytes: &[u8], capacity: usize) -> Self {
        let mut buf = vec![0; capacity].into_boxed_slice();

        let n = bytes.len().min(capacity);

        #[expect(clippy::indexing_slicing, reason = "n is clamped to both lengths")]
        buf[..n].copy_from_slice(&bytes[..n]);

        Self(buf)
    }

    /// Returns the fixed capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.0.len()
    }

    /// Returns the full padded buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the content with trailing NUL bytes stripped.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |idx| idx + 1);

        self.0.get(..end).unwrap_or_default()
    }

    /// Writes the full padded buffer.
    pub fn encode_into<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.0)
    }

    /// Reads exactly `capacity` bytes.
    pub fn decode_from<R: Read>(reader: &mut R, capacity: usize) -> std::io::Result<Self> {
        let mut buf = vec![0; capacity].into_boxed_slice();
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }
}
