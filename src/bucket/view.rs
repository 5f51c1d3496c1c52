// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{Bucket, BucketIndex};
use crate::{
    coding::{Decode, Encode},
    layout::{Layout, FLAG_SIZE},
    record::Record,
};
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use std::io::{Read, Seek, SeekFrom, Write};

/// Field-level access to one bucket of an open file
///
/// Every operation seeks to its own absolute position first, so no
/// operation depends on where a previous one left the cursor.
/// Writes go straight to the handle, there is no buffering layer.
pub struct BucketView<'a, F> {
    file: &'a mut F,
    layout: Layout,
    index: BucketIndex,
}

impl<'a, F: Read + Write + Seek> BucketView<'a, F> {
    /// Creates a view of the bucket at `index`.
    pub fn new(file: &'a mut F, layout: Layout, index: BucketIndex) -> Self {
        Self {
            file,
            layout,
            index,
        }
    }

    /// Index of the viewed bucket.
    #[must_use]
    pub fn index(&self) -> BucketIndex {
        self.index
    }

    /// Absolute byte offset of the viewed bucket.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.index.get() * self.layout.bucket_size()
    }

    fn flag_offset(&self, slot: usize) -> u64 {
        self.check_slot(slot);
        self.offset() + slot as u64 * FLAG_SIZE
    }

    fn record_offset(&self, slot: usize) -> u64 {
        self.check_slot(slot);
        self.offset() + self.flags_len() + slot as u64 * self.layout.record_size()
    }

    fn next_offset(&self) -> u64 {
        self.offset()
            + self.flags_len()
            + self.layout.slot_count() as u64 * self.layout.record_size()
    }

    fn flags_len(&self) -> u64 {
        self.layout.slot_count() as u64 * FLAG_SIZE
    }

    fn check_slot(&self, slot: usize) {
        assert!(
            slot < self.layout.slot_count(),
            "slot {slot} out of range for bucket with {} slots",
            self.layout.slot_count(),
        );
    }

    fn seek(&mut self, pos: u64) -> crate::Result<()> {
        self.file.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Reads all slot flags in slot order.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn read_flags(&mut self) -> crate::Result<Vec<bool>> {
        self.seek(self.offset())?;

        let mut buf = vec![0; self.layout.slot_count()];
        self.file.read_exact(&mut buf)?;

        Ok(buf.into_iter().map(|b| b != 0).collect())
    }

    /// Reads the flag of one slot.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn read_flag(&mut self, slot: usize) -> crate::Result<bool> {
        self.seek(self.flag_offset(slot))?;
        Ok(self.file.read_u8()? != 0)
    }

    /// Writes the flag of one slot.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn write_flag(&mut self, slot: usize, active: bool) -> crate::Result<()> {
        self.seek(self.flag_offset(slot))?;
        self.file.write_u8(u8::from(active))?;
        Ok(())
    }

    /// Reads the record stored in one slot, whether active or not.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn read_record(&mut self, slot: usize) -> crate::Result<Record> {
        self.seek(self.record_offset(slot))?;
        Record::decode_from(&mut *self.file, self.layout)
    }

    /// Reads the records of all slots, whether active or not.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn read_records(&mut self) -> crate::Result<Vec<Record>> {
        self.seek(self.record_offset(0))?;

        (0..self.layout.slot_count())
            .map(|_| Record::decode_from(&mut *self.file, self.layout))
            .collect()
    }

    /// Writes a record into one slot.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn write_record(&mut self, slot: usize, record: &Record) -> crate::Result<()> {
        self.seek(self.record_offset(slot))?;

        // NOTE: Encode fully first, so the slot is written with a single call
        let bytes = record.encode_into_vec(self.layout);
        self.file.write_all(&bytes)?;

        Ok(())
    }

    /// Reads the continuation pointer.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn read_next(&mut self) -> crate::Result<Option<BucketIndex>> {
        self.seek(self.next_offset())?;
        let raw = self.file.read_u64::<LE>()?;
        Ok(BucketIndex::from_pointer(raw))
    }

    /// Writes the continuation pointer.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn write_next(&mut self, next: Option<BucketIndex>) -> crate::Result<()> {
        self.seek(self.next_offset())?;
        self.file.write_u64::<LE>(BucketIndex::into_pointer(next))?;
        Ok(())
    }
}

/// Returns the number of whole buckets in the file.
///
/// # Errors
///
/// Will return `Err` if an IO error occurs.
pub fn bucket_count<F: Seek>(file: &mut F, layout: Layout) -> crate::Result<u64> {
    let len = file.seek(SeekFrom::End(0))?;
    Ok(len / layout.bucket_size())
}

/// Appends a zero-initialized bucket at end-of-file, returning its index.
///
/// # Errors
///
/// Will return `Err` if an IO error occurs.
pub fn append_bucket<F: Write + Seek>(file: &mut F, layout: Layout) -> crate::Result<BucketIndex> {
    let len = file.seek(SeekFrom::End(0))?;
    let index = BucketIndex::new(len / layout.bucket_size());

    let bytes = Bucket::empty(layout).encode_into_vec(layout);
    file.write_all(&bytes)?;

    Ok(index)
}
