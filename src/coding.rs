// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::layout::Layout;
use std::io::{Read, Write};

/// Trait to serialize stuff
///
/// Field widths are runtime configuration, so every encoder
/// receives the [`Layout`] of the file it is writing into.
pub trait Encode {
    /// Serializes into writer.
    fn encode_into<W: Write>(&self, writer: &mut W, layout: Layout) -> crate::Result<()>;

    /// Serializes into vector.
    #[allow(clippy::expect_used)]
    fn encode_into_vec(&self, layout: Layout) -> Vec<u8> {
        let mut v = vec![];
        self.encode_into(&mut v, layout).expect("cannot fail");
        v
    }
}

/// Trait to deserialize stuff
pub trait Decode {
    /// Deserializes from reader.
    fn decode_from<R: Read>(reader: &mut R, layout: Layout) -> crate::Result<Self>
    where
        Self: Sized;
}
