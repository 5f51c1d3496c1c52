// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A K.I.S.S. implementation of an on-disk static hash file.
//!
//! ##### About
//!
//! This crate exports a `HashFile` that maps integer keys to fixed-width records.
//!
//! The file is a flat array of equally sized buckets. A fixed number of primary
//! buckets is created when the file is first initialized; a key's home bucket is
//! `hash(key) mod N`. When a bucket runs full, an overflow bucket is appended at
//! the end of the file and linked from it, forming a chain.
//!
//! Nothing is cached: inserts and lookups seek directly to the bucket fields they
//! need. The bucket count never changes, there is no rehashing, and records are
//! never deleted or moved.
//!
//! Records carry an `i32` key and two text fields, stored as fixed-width,
//! zero-padded buffers (30 and 20 bytes by default). Longer text is truncated.
//!
//! ```
//! # let folder = tempfile::tempdir()?;
//! use static_hash_file::{Config, Record};
//!
//! let mut hash_file = Config::new(folder.path().join("hf1.bin")).open()?;
//!
//! hash_file.add(&Record::new(1, "Alvaro", "A1"))?;
//! hash_file.add(&Record::new(2, "Brazil", "B1"))?;
//!
//! let found = hash_file.find(1)?;
//! assert_eq!(1, found.len());
//! assert_eq!(b"Alvaro", found[0].name());
//!
//! assert!(hash_file.find(99)?.is_empty());
//! #
//! # Ok::<(), static_hash_file::Error>(())
//! ```
//!
//! ##### Disk format
//!
//! There is no header, magic or version. The layout (bucket count, slots per
//! bucket, field widths) is not persisted, so a file must be reopened with the
//! same [`Config`] it was created with.

#![deny(clippy::all, missing_docs)]
#![warn(clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[doc(hidden)]
pub mod bucket;

#[doc(hidden)]
pub mod coding;

mod config;
mod error;
mod fixed;

#[doc(hidden)]
pub mod hash;

mod hash_file;
mod layout;
mod record;

pub use {
    bucket::BucketIndex,
    config::Config,
    error::{Error, Result},
    fixed::FixedBuf,
    hash_file::HashFile,
    layout::Layout,
    record::Record,
};
