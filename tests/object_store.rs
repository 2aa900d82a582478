mod common;

use bytes::Bytes;
use wit::artifacts::index::entry_mode::FileMode;
use wit::artifacts::objects::blob::Blob;
use wit::artifacts::objects::object::Object;
use wit::artifacts::objects::object_id::ObjectId;
use wit::errors::CoreError;

#[test]
fn store_round_trips_kind_size_and_body() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let repository = common::init_repository(dir.path());

    let blob = Blob::new(Bytes::from_static(b"some content\n"), FileMode::Regular);
    let oid = repository.database().store(blob)?;

    let (kind, size, body) = repository.database().load_raw(&oid)?;
    pretty_assertions::assert_eq!(kind, "blob");
    pretty_assertions::assert_eq!(size, 13);
    pretty_assertions::assert_eq!(body, Bytes::from_static(b"some content\n"));

    Ok(())
}

#[test]
fn identical_content_yields_identical_address_and_restore_is_a_noop(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let repository = common::init_repository(dir.path());

    let first = repository
        .database()
        .store(Blob::new(Bytes::from_static(b"twin"), FileMode::Regular))?;
    // second store of the same bytes must short-circuit, not error
    let second = repository
        .database()
        .store(Blob::new(Bytes::from_static(b"twin"), FileMode::Regular))?;

    pretty_assertions::assert_eq!(first, second);

    let different = repository
        .database()
        .store(Blob::new(Bytes::from_static(b"not a twin"), FileMode::Regular))?;
    assert_ne!(first, different);

    Ok(())
}

#[test]
fn missing_object_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let repository = common::init_repository(dir.path());

    let absent = ObjectId::try_parse("0123456789abcdef0123456789abcdef01234567".to_string())?;
    let error = repository.database().load_raw(&absent).unwrap_err();

    assert!(matches!(
        CoreError::find_in(&error),
        Some(CoreError::NotFound(_))
    ));

    Ok(())
}

#[test]
fn undecompressable_shard_file_is_corrupt() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let repository = common::init_repository(dir.path());

    // plant garbage where an object should live
    let oid = ObjectId::try_parse("aa".repeat(20))?;
    let shard_dir = repository.database().objects_path().join("aa");
    std::fs::create_dir_all(&shard_dir)?;
    std::fs::write(shard_dir.join("aa".repeat(19)), b"definitely not zlib")?;

    let error = repository.database().load_raw(&oid).unwrap_err();
    assert!(matches!(
        CoreError::find_in(&error),
        Some(CoreError::Corrupt(_))
    ));

    Ok(())
}

#[test]
fn interpreting_as_the_wrong_kind_returns_none() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let repository = common::init_repository(dir.path());

    let blob_id = repository
        .database()
        .store(Blob::new(Bytes::from_static(b"x"), FileMode::Regular))?;

    assert!(repository.database().parse_object_as_commit(&blob_id)?.is_none());
    assert!(repository.database().parse_object_as_tree(&blob_id)?.is_none());
    assert!(repository.database().parse_object_as_blob(&blob_id)?.is_some());

    Ok(())
}

#[test]
fn blob_body_survives_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let repository = common::init_repository(dir.path());

    let content = Bytes::from((0u8..=255).collect::<Vec<u8>>());
    let oid = repository
        .database()
        .store(Blob::new(content.clone(), FileMode::Regular))?;

    let restored = repository
        .database()
        .parse_object_as_blob(&oid)?
        .expect("stored blob must parse as blob");
    pretty_assertions::assert_eq!(restored.content(), &content);
    pretty_assertions::assert_eq!(restored.object_id()?, oid);

    Ok(())
}
