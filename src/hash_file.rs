// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    bucket::{append_bucket, bucket_count, BucketIndex, BucketView},
    hash::home_bucket,
    layout::Layout,
    record::Record,
};
use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

/// A file-backed static hash table
///
/// The file is a flat array of equally sized buckets. The first `N`
/// buckets are primary buckets, one per hash value; overflow buckets
/// are appended at end-of-file and chained from full buckets.
///
/// Nothing is cached in memory, every operation works directly on
/// file offsets. All operations take `&mut self`, because they move
/// the shared file cursor; concurrent access needs external locking.
pub struct HashFile {
    path: PathBuf,
    file: File,
    layout: Layout,
}

impl std::fmt::Debug for HashFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HashFile({:?})", self.path)
    }
}

impl HashFile {
    /// Opens the hash file at `path`, creating it if absent.
    ///
    /// An empty file is initialized with zeroed primary buckets. A
    /// non-empty file is trusted to have been created with `layout`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn open<P: AsRef<Path>>(path: P, layout: Layout) -> crate::Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        let mut hash_file = Self { path, file, layout };

        if hash_file.file.metadata()?.len() == 0 {
            log::debug!(
                "Initializing hash file at {} with {} primary buckets",
                hash_file.path.display(),
                layout.primary_buckets(),
            );

            for _ in 0..layout.primary_buckets() {
                append_bucket(&mut hash_file.file, layout)?;
            }
        } else {
            let bucket_count = hash_file.bucket_count()?;

            log::debug!(
                "Opened hash file at {} with {bucket_count} buckets",
                hash_file.path.display(),
            );
        }

        Ok(hash_file)
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the layout the file was opened with.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the number of primary buckets.
    #[must_use]
    pub fn primary_bucket_count(&self) -> u64 {
        self.layout.primary_buckets()
    }

    /// Returns the number of buckets on disk, primary and overflow.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn bucket_count(&mut self) -> crate::Result<u64> {
        bucket_count(&mut self.file, self.layout)
    }

    fn home_bucket(&self, key: i32) -> BucketIndex {
        home_bucket(key, self.layout.primary_buckets())
    }

    fn view(&mut self, index: BucketIndex) -> BucketView<'_, File> {
        BucketView::new(&mut self.file, self.layout, index)
    }

    /// Follows continuation pointers from `start` to the last bucket of the chain.
    fn tail_of(&mut self, start: BucketIndex) -> crate::Result<BucketIndex> {
        let mut current = start;

        while let Some(next) = self.view(current).read_next()? {
            current = next;
        }

        Ok(current)
    }

    /// Inserts a record.
    ///
    /// The record goes into the first free slot of the last bucket in
    /// its home chain. If that bucket is full, a new overflow bucket is
    /// appended to the file and linked from it.
    ///
    /// Text fields longer than the layout widths are silently truncated.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn add(&mut self, record: &Record) -> crate::Result<()> {
        let home = self.home_bucket(record.key());
        let tail = self.tail_of(home)?;

        let mut view = self.view(tail);

        if let Some(slot) = view.read_flags()?.iter().position(|active| !active) {
            view.write_flag(slot, true)?;
            view.write_record(slot, record)?;

            log::trace!(
                "Inserted key {} into bucket {tail} slot {slot} (home {home})",
                record.key(),
            );
        } else {
            let overflow = append_bucket(&mut self.file, self.layout)?;

            self.view(tail).write_next(Some(overflow))?;

            let mut view = self.view(overflow);
            view.write_flag(0, true)?;
            view.write_record(0, record)?;

            log::debug!(
                "Bucket {tail} is full, chained overflow bucket {overflow} (home {home})",
            );
        }

        Ok(())
    }

    /// Returns all records with the given key, in chain order.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn find(&mut self, key: i32) -> crate::Result<Vec<Record>> {
        let home = self.home_bucket(key);

        let mut results = vec![];
        let mut current = Some(home);

        while let Some(index) = current {
            let mut view = self.view(index);

            for (slot, active) in view.read_flags()?.into_iter().enumerate() {
                if !active {
                    continue;
                }

                let record = view.read_record(slot)?;

                if record.key() == key {
                    results.push(record);
                }
            }

            current = view.read_next()?;
        }

        log::trace!("Found {} record(s) for key {key} (home {home})", results.len());

        Ok(results)
    }

    /// Returns the bucket indices of `key`'s home chain, in walk order.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn chain(&mut self, key: i32) -> crate::Result<Vec<BucketIndex>> {
        let home = self.home_bucket(key);
        self.chain_from(home)
    }

    /// Returns the bucket indices of the chain starting at `start`, in walk order.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn chain_from(&mut self, start: BucketIndex) -> crate::Result<Vec<BucketIndex>> {
        let mut chain = vec![start];
        let mut current = start;

        while let Some(next) = self.view(current).read_next()? {
            chain.push(next);
            current = next;
        }

        Ok(chain)
    }

    /// Returns every live record.
    ///
    /// Primary buckets are visited in index order, each chain in walk
    /// order, slots in ascending order.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn scan(&mut self) -> crate::Result<Vec<Record>> {
        let mut results = vec![];

        for primary in 0..self.layout.primary_buckets() {
            for index in self.chain_from(BucketIndex::new(primary))? {
                let mut view = self.view(index);

                let flags = view.read_flags()?;
                let records = view.read_records()?;

                results.extend(
                    flags
                        .into_iter()
                        .zip(records)
                        .filter_map(|(active, record)| active.then_some(record)),
                );
            }
        }

        Ok(results)
    }

    /// Flushes written data to disk.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn sync(&self) -> crate::Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
