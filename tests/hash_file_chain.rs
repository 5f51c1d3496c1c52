use rand::{Rng, SeedableRng};
use static_hash_file::{hash::home_bucket, BucketIndex, Config, Record};
use std::collections::HashSet;
use test_log::test;

#[test]
fn hash_file_capacity_overflow() -> static_hash_file::Result<()> {
    let folder = tempfile::tempdir()?;
    let mut hash_file = Config::new(folder.path().join("hf1.bin")).open()?;

    for idx in 0..4 {
        hash_file.add(&Record::new(42, format!("r{idx}"), "x"))?;
    }

    assert_eq!(5, hash_file.bucket_count()?);
    assert_eq!(1, hash_file.chain(42)?.len());

    hash_file.add(&Record::new(42, "r4", "x"))?;

    assert_eq!(6, hash_file.bucket_count()?);

    let home = home_bucket(42, 5);
    assert_eq!(vec![home, BucketIndex::new(5)], hash_file.chain(42)?);

    let records = hash_file.find(42)?;
    assert_eq!(5, records.len());
    assert_eq!(Some(&Record::new(42, "r4", "x")), records.last());

    Ok(())
}

#[test]
fn hash_file_hash_agreement() -> static_hash_file::Result<()> {
    let folder = tempfile::tempdir()?;
    let mut hash_file = Config::new(folder.path().join("hf1.bin")).open()?;

    for key in -50..50 {
        hash_file.add(&Record::new(key, "k", "v"))?;

        // The record lands in the chain of the bucket lookups start from
        let chain = hash_file.chain(key)?;
        assert_eq!(Some(&home_bucket(key, 5)), chain.first());
        assert_eq!(vec![Record::new(key, "k", "v")], hash_file.find(key)?);
    }

    Ok(())
}

#[test]
fn hash_file_chains_are_acyclic() -> static_hash_file::Result<()> {
    let folder = tempfile::tempdir()?;
    let mut hash_file = Config::new(folder.path().join("hf1.bin")).open()?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(1);

    for idx in 0..500 {
        let key = rng.random_range(0..40);
        hash_file.add(&Record::new(key, format!("n{idx}"), "f"))?;
    }

    let mut seen_overall = HashSet::new();

    for primary in 0..hash_file.primary_bucket_count() {
        let chain = hash_file.chain_from(BucketIndex::new(primary))?;

        let mut seen = HashSet::new();
        for index in &chain {
            assert!(seen.insert(*index), "chain revisits bucket {index}");

            // Every bucket belongs to exactly one chain
            assert!(seen_overall.insert(*index));
        }

        // Overflow buckets only ever point forward
        assert!(chain.windows(2).all(|w| w[0] < w[1]));
    }

    assert_eq!(hash_file.bucket_count()?, seen_overall.len() as u64);

    Ok(())
}

#[test]
fn hash_file_conservation() -> static_hash_file::Result<()> {
    let folder = tempfile::tempdir()?;
    let mut hash_file = Config::new(folder.path().join("hf1.bin")).open()?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut inserted = vec![];

    for idx in 0..300 {
        let key = rng.random_range(-10..10);
        let record = Record::new(key, format!("name{idx}"), format!("f{idx}"));

        hash_file.add(&record)?;
        inserted.push(record);
    }

    for key in -12..12 {
        let expected = inserted
            .iter()
            .filter(|r| r.key() == key)
            .cloned()
            .collect::<Vec<_>>();

        assert_eq!(expected, hash_file.find(key)?, "key {key}");
    }

    assert_eq!(300, hash_file.scan()?.len());

    Ok(())
}
