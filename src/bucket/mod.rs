// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod view;

pub use view::{append_bucket, bucket_count, BucketView};

use crate::{coding::Encode, layout::Layout, record::Record};
use byteorder::{WriteBytesExt, LE};
use std::io::Write;

/// On-disk continuation pointer value meaning "end of chain"
pub const NO_OVERFLOW: u64 = u64::MAX;

/// Position of a bucket in the file's bucket array
///
/// This is NOT a byte offset; [`BucketView`] is the only place that
/// turns it into one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BucketIndex(u64);

impl BucketIndex {
    /// Wraps a raw bucket index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is the end-of-chain sentinel.
    #[must_use]
    pub const fn new(idx: u64) -> Self {
        assert!(idx != NO_OVERFLOW, "bucket index collides with end-of-chain sentinel");
        Self(idx)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Decodes an on-disk continuation pointer.
    #[must_use]
    pub fn from_pointer(raw: u64) -> Option<Self> {
        (raw != NO_OVERFLOW).then_some(Self(raw))
    }

    /// Encodes a continuation pointer for disk.
    #[must_use]
    pub fn into_pointer(next: Option<Self>) -> u64 {
        next.map_or(NO_OVERFLOW, Self::get)
    }
}

impl std::fmt::Display for BucketIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory image of one bucket
///
/// Only ever materialized to write a fresh bucket; existing buckets
/// are accessed field by field through [`BucketView`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bucket {
    /// Slot `i` holds a live record iff `active[i]`
    pub active: Vec<bool>,

    /// Slot contents, meaningful only where active
    pub slots: Vec<Record>,

    /// Continuation pointer
    pub next: Option<BucketIndex>,
}

impl Bucket {
    /// Creates a bucket with all slots inactive and no continuation.
    #[must_use]
    pub fn empty(layout: Layout) -> Self {
        Self {
            active: vec![false; layout.slot_count()],
            slots: vec![Record::default(); layout.slot_count()],
            next: None,
        }
    }
}

impl Encode for Bucket {
    fn encode_into<W: Write>(&self, writer: &mut W, layout: Layout) -> crate::Result<()> {
        debug_assert_eq!(layout.slot_count(), self.active.len());
        debug_assert_eq!(layout.slot_count(), self.slots.len());

        for &active in &self.active {
            writer.write_u8(u8::from(active))?;
        }

        for record in &self.slots {
            record.encode_into(writer, layout)?;
        }

        writer.write_u64::<LE>(BucketIndex::into_pointer(self.next))?;

        Ok(())
    }
}
