// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    layout::{
        Layout, DEFAULT_FIELD_WIDTH, DEFAULT_NAME_WIDTH, DEFAULT_PRIMARY_BUCKETS,
        DEFAULT_SLOT_COUNT,
    },
    HashFile,
};
use std::path::{Path, PathBuf};

/// Hash file configuration builder
///
/// The layout is not stored in the file, so a file must always be
/// reopened with the configuration it was created with.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the backing file
    #[doc(hidden)]
    pub path: PathBuf,

    /// Number of primary buckets (`N`)
    #[doc(hidden)]
    pub bucket_count: u64,

    /// Number of record slots per bucket (`F`)
    #[doc(hidden)]
    pub slot_count: u16,

    /// Width of the record name buffer in bytes
    #[doc(hidden)]
    pub name_width: u16,

    /// Width of the record field buffer in bytes
    #[doc(hidden)]
    pub field_width: u16,
}

impl Config {
    /// Initializes a new config with the default layout.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            bucket_count: DEFAULT_PRIMARY_BUCKETS,
            slot_count: DEFAULT_SLOT_COUNT,
            name_width: DEFAULT_NAME_WIDTH,
            field_width: DEFAULT_FIELD_WIDTH,
        }
    }

    /// Sets the number of primary buckets.
    ///
    /// Defaults to 5.
    #[must_use]
    pub fn bucket_count(mut self, n: u64) -> Self {
        self.bucket_count = n;
        self
    }

    /// Sets the number of record slots per bucket.
    ///
    /// Defaults to 4.
    #[must_use]
    pub fn slot_count(mut self, n: u16) -> Self {
        self.slot_count = n;
        self
    }

    /// Sets the width of the record name buffer.
    ///
    /// Longer names are truncated on insert.
    ///
    /// Defaults to 30 bytes.
    #[must_use]
    pub fn name_width(mut self, bytes: u16) -> Self {
        self.name_width = bytes;
        self
    }

    /// Sets the width of the record field buffer.
    ///
    /// Longer fields are truncated on insert.
    ///
    /// Defaults to 20 bytes.
    #[must_use]
    pub fn field_width(mut self, bytes: u16) -> Self {
        self.field_width = bytes;
        self
    }

    /// Derives the physical layout.
    ///
    /// # Errors
    ///
    /// Returns error if the bucket or slot count is zero.
    pub fn layout(&self) -> crate::Result<Layout> {
        Layout::new(
            self.bucket_count,
            self.slot_count,
            self.name_width,
            self.field_width,
        )
    }

    /// Opens a hash file using the config.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the layout is invalid or an IO error occurs.
    pub fn open(self) -> crate::Result<HashFile> {
        let layout = self.layout()?;
        HashFile::open(self.path, layout)
    }
}
