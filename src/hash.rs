// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::bucket::BucketIndex;

/// Hashes a record key.
///
/// Depends on the key alone and is stable across processes and
/// platforms, because the result decides where records live on disk.
#[must_use]
pub fn hash_key(key: i32) -> u64 {
    xxhash_rust::xxh3::xxh3_64(&key.to_le_bytes())
}

/// Returns the primary bucket a key belongs to.
///
/// Both insertion and lookup go through here.
#[must_use]
pub fn home_bucket(key: i32, primary_buckets: u64) -> BucketIndex {
    debug_assert!(primary_buckets > 0);
    BucketIndex::new(hash_key(key) % primary_buckets)
}
