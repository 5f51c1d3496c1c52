// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Size of a serialized record key (`i32`)
pub const KEY_SIZE: u64 = std::mem::size_of::<i32>() as u64;

/// Size of a serialized slot flag
pub const FLAG_SIZE: u64 = 1;

/// Size of a serialized continuation pointer (`u64`)
pub const POINTER_SIZE: u64 = std::mem::size_of::<u64>() as u64;

pub const DEFAULT_PRIMARY_BUCKETS: u64 = 5;
pub const DEFAULT_SLOT_COUNT: u16 = 4;
pub const DEFAULT_NAME_WIDTH: u16 = 30;
pub const DEFAULT_FIELD_WIDTH: u16 = 20;

/// Physical shape of a hash file
///
/// Created once when a hash file is opened and handed to every
/// bucket access, so all offsets in one file derive from the same values.
///
/// The layout is not persisted. Reopening a file with a different
/// layout misinterprets its contents.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    primary_buckets: u64,
    slot_count: u16,
    name_width: u16,
    field_width: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            primary_buckets: DEFAULT_PRIMARY_BUCKETS,
            slot_count: DEFAULT_SLOT_COUNT,
            name_width: DEFAULT_NAME_WIDTH,
            field_width: DEFAULT_FIELD_WIDTH,
        }
    }
}

impl Layout {
    /// Creates a layout, validating its dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if there are no primary buckets
    /// or no slots per bucket.
    pub fn new(
        primary_buckets: u64,
        slot_count: u16,
        name_width: u16,
        field_width: u16,
    ) -> crate::Result<Self> {
        if primary_buckets == 0 {
            return Err(crate::Error::InvalidConfig("primary bucket count must be > 0"));
        }

        if slot_count == 0 {
            return Err(crate::Error::InvalidConfig("slot count must be > 0"));
        }

        Ok(Self {
            primary_buckets,
            slot_count,
            name_width,
            field_width,
        })
    }

    /// Number of primary buckets (`N`).
    #[must_use]
    pub fn primary_buckets(&self) -> u64 {
        self.primary_buckets
    }

    /// Number of record slots per bucket (`F`).
    #[must_use]
    pub fn slot_count(&self) -> usize {
        usize::from(self.slot_count)
    }

    /// Width of the name buffer in bytes.
    #[must_use]
    pub fn name_width(&self) -> usize {
        usize::from(self.name_width)
    }

    /// Width of the field buffer in bytes.
    #[must_use]
    pub fn field_width(&self) -> usize {
        usize::from(self.field_width)
    }

    /// Serialized size of one record.
    #[must_use]
    pub fn record_size(&self) -> u64 {
        KEY_SIZE + u64::from(self.name_width) + u64::from(self.field_width)
    }

    /// Serialized size of one bucket: flags, records, continuation pointer.
    #[must_use]
    pub fn bucket_size(&self) -> u64 {
        let slots = u64::from(self.slot_count);
        slots * FLAG_SIZE + slots * self.record_size() + POINTER_SIZE
    }
}
