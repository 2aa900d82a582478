mod common;

use std::path::PathBuf;
use wit::areas::index::Index;
use wit::artifacts::index::entry_mode::FileMode;
use wit::artifacts::index::index_entry::{EntryMetadata, IndexEntry};
use wit::artifacts::objects::object_id::ObjectId;
use wit::errors::CoreError;

fn oid(seed: u8) -> ObjectId {
    ObjectId::try_parse(format!("{seed:02x}").repeat(20)).unwrap()
}

fn entry(name: &str, seed: u8) -> IndexEntry {
    IndexEntry::new(
        PathBuf::from(name),
        oid(seed),
        EntryMetadata {
            ctime: 1_700_000_000,
            ctime_nsec: 123,
            mtime: 1_700_000_001,
            mtime_nsec: 456,
            dev: 64,
            ino: 9000 + seed as u64,
            mode: if seed % 2 == 0 {
                FileMode::Regular
            } else {
                FileMode::Executable
            },
            uid: 1000,
            gid: 1000,
            size: seed as u64,
        },
    )
}

#[test]
fn index_round_trips_across_every_padding_remainder() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repository(dir.path());
    let index_path = dir.path().join(".git").join("index");

    // path lengths 2..=9 drive (6 + len) % 8 through every remainder
    let names = [
        "ab",
        "abc",
        "abcd",
        "abcde",
        "abcdef",
        "abcdefg",
        "abcdefgh",
        "abcdefghi",
    ];

    let mut index = Index::new(index_path.clone().into_boxed_path());
    index.rehydrate()?;
    for (seed, name) in names.iter().enumerate() {
        index.add(entry(name, seed as u8 + 1));
    }
    index.write_updates()?;

    let mut reloaded = Index::new(index_path.into_boxed_path());
    reloaded.rehydrate()?;

    pretty_assertions::assert_eq!(reloaded.len(), names.len());
    for (seed, name) in names.iter().enumerate() {
        let restored = reloaded
            .entry_by_path(std::path::Path::new(name))
            .unwrap_or_else(|| panic!("missing entry {name}"));

        pretty_assertions::assert_eq!(restored.oid, oid(seed as u8 + 1));
        pretty_assertions::assert_eq!(restored.metadata.ctime, 1_700_000_000);
        pretty_assertions::assert_eq!(restored.metadata.ino, 9000 + seed as u64 + 1);
        pretty_assertions::assert_eq!(restored.metadata.size, seed as u64 + 1);
    }

    Ok(())
}

#[test]
fn bad_magic_is_corrupt() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repository(dir.path());
    let index_path = dir.path().join(".git").join("index");

    std::fs::write(&index_path, b"DIRX\x00\x00\x00\x02\x00\x00\x00\x00")?;

    let mut index = Index::new(index_path.into_boxed_path());
    let error = index.rehydrate().unwrap_err();

    assert!(matches!(
        CoreError::find_in(&error),
        Some(CoreError::Corrupt(_))
    ));

    Ok(())
}

#[test]
fn unsupported_version_is_corrupt() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repository(dir.path());
    let index_path = dir.path().join(".git").join("index");

    std::fs::write(&index_path, b"DIRC\x00\x00\x00\x03\x00\x00\x00\x00")?;

    let mut index = Index::new(index_path.into_boxed_path());
    let error = index.rehydrate().unwrap_err();

    assert!(matches!(
        CoreError::find_in(&error),
        Some(CoreError::Corrupt(_))
    ));

    Ok(())
}

#[test]
fn truncated_entry_is_corrupt() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repository(dir.path());
    let index_path = dir.path().join(".git").join("index");

    let mut index = Index::new(index_path.clone().into_boxed_path());
    index.rehydrate()?;
    index.add(entry("victim", 7));
    index.write_updates()?;

    // chop the file mid-entry
    let image = std::fs::read(&index_path)?;
    std::fs::write(&index_path, &image[..image.len() - 4])?;

    let mut reloaded = Index::new(index_path.into_boxed_path());
    let error = reloaded.rehydrate().unwrap_err();

    assert!(matches!(
        CoreError::find_in(&error),
        Some(CoreError::Corrupt(_))
    ));

    Ok(())
}

#[test]
fn empty_index_file_loads_as_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repository(dir.path());

    let mut index = Index::new(dir.path().join(".git").join("index").into_boxed_path());
    index.rehydrate()?;

    assert!(index.is_empty());

    Ok(())
}
