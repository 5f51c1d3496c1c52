use static_hash_file::{bucket::BucketView, hash::home_bucket, BucketIndex, Config, Record};
use std::fs::OpenOptions;
use test_log::test;

fn demo_records() -> Vec<Record> {
    vec![
        Record::new(1, "Alvaro", "A1"),
        Record::new(1, "Alfredo", "A2"),
        Record::new(1, "Alejandro", "A3"),
        Record::new(1, "Alberto", "A4"),
        Record::new(1, "Alex", "A5"),
        Record::new(2, "Brazil", "B1"),
        Record::new(3, "Carlos", "C1"),
        Record::new(4, "Diego", "D1"),
        Record::new(4, "Don", "D2"),
        Record::new(5, "Enrique", "E1"),
        Record::new(6, "Federico", "F1"),
    ]
}

#[test]
fn hash_file_demo_scenario() -> static_hash_file::Result<()> {
    let folder = tempfile::tempdir()?;
    let path = folder.path().join("hf1.bin");
    let mut hash_file = Config::new(&path).open()?;

    for record in demo_records() {
        hash_file.add(&record)?;
    }

    let ones = hash_file.find(1)?;
    assert_eq!(
        vec!["Alvaro", "Alfredo", "Alejandro", "Alberto", "Alex"],
        ones.iter()
            .map(|r| r.name_lossy().into_owned())
            .collect::<Vec<_>>(),
    );
    assert!(ones.iter().all(|r| r.key() == 1));

    // Five records do not fit into one bucket of four, so exactly one
    // overflow bucket is chained off key 1's home bucket
    assert_eq!(6, hash_file.bucket_count()?);

    let chain = hash_file.chain(1)?;
    assert_eq!(2, chain.len());
    assert_eq!(Some(&home_bucket(1, 5)), chain.first());
    assert_eq!(Some(&BucketIndex::new(5)), chain.get(1));

    {
        let layout = hash_file.layout();
        let mut file = OpenOptions::new().read(true).write(true).open(&path)?;
        let mut view = BucketView::new(&mut file, layout, BucketIndex::new(5));

        assert_eq!(vec![true, false, false, false], view.read_flags()?);
        assert_eq!(Record::new(1, "Alex", "A5"), view.read_record(0)?);
        assert_eq!(None, view.read_next()?);
    }

    assert_eq!(vec![Record::new(2, "Brazil", "B1")], hash_file.find(2)?);
    assert_eq!(vec![Record::new(6, "Federico", "F1")], hash_file.find(6)?);
    assert_eq!(
        vec![Record::new(4, "Diego", "D1"), Record::new(4, "Don", "D2")],
        hash_file.find(4)?,
    );
    assert!(hash_file.find(99)?.is_empty());

    Ok(())
}

#[test]
fn hash_file_demo_scan() -> static_hash_file::Result<()> {
    let folder = tempfile::tempdir()?;
    let mut hash_file = Config::new(folder.path().join("hf1.bin")).open()?;

    for record in demo_records() {
        hash_file.add(&record)?;
    }

    let mut scanned = hash_file.scan()?;
    assert_eq!(11, scanned.len());

    let mut expected = demo_records();
    scanned.sort_by(|a, b| (a.key(), a.name()).cmp(&(b.key(), b.name())));
    expected.sort_by(|a, b| (a.key(), a.name()).cmp(&(b.key(), b.name())));
    assert_eq!(expected, scanned);

    Ok(())
}

#[test]
fn hash_file_demo_display() -> static_hash_file::Result<()> {
    let folder = tempfile::tempdir()?;
    let mut hash_file = Config::new(folder.path().join("hf1.bin")).open()?;

    for record in demo_records() {
        hash_file.add(&record)?;
    }

    let rendered = hash_file
        .find(2)?
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    assert_eq!(vec!["<Record: 2, Brazil, B1>"], rendered);

    Ok(())
}
