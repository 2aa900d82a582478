use assert_cmd::Command;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;

// SHA-1 of "blob 7\0file 1\n"
const BLOB_SHA: &str = "366f17ff507eeda97ee143e1ae7ef7933e52f89b";
// SHA-1 of the single-entry tree "100644 file\0<raw blob sha>"
const TREE_SHA: &str = "68ac68d36c77e30dafc3e235b35e7fa76b858c1e";
// SHA-1 of the commit wrapping TREE_SHA with the pinned author below
const COMMIT_SHA: &str = "104e8a1a7849865ec35c6df0d68df50f0ddcdd0c";

fn wit(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wit").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn snapshot_stage_tree_commit_ref_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    wit(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty repository in"));

    dir.child("file").write_str("file 1\n")?;

    wit(&dir)
        .args(["hash-object", "-w", "file"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{BLOB_SHA}\n")));

    wit(&dir)
        .args(["update-index", "--cacheinfo"])
        .arg(format!("100644,{BLOB_SHA},file"))
        .assert()
        .success();

    wit(&dir)
        .arg("ls-files")
        .assert()
        .success()
        .stdout(predicate::str::diff("file\n"));

    wit(&dir)
        .arg("write-tree")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{TREE_SHA}\n")));

    wit(&dir)
        .args(["commit-tree", TREE_SHA, "-m", "initial snapshot"])
        .env("GIT_AUTHOR_NAME", "A")
        .env("GIT_AUTHOR_EMAIL", "a@x")
        .env("GIT_AUTHOR_DATE", "2024-01-01 00:00:00 +0000")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{COMMIT_SHA}\n")));

    wit(&dir)
        .args(["update-ref", "refs/heads/master", COMMIT_SHA])
        .assert()
        .success();

    let ref_content = std::fs::read_to_string(dir.path().join(".git/refs/heads/master"))?;
    pretty_assertions::assert_eq!(ref_content, format!("{COMMIT_SHA}\n"));

    Ok(())
}

#[test]
fn cat_file_reports_type_and_content() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    wit(&dir).arg("init").assert().success();
    dir.child("file").write_str("file 1\n")?;

    wit(&dir)
        .args(["hash-object", "-w", "file"])
        .assert()
        .success();

    wit(&dir)
        .args(["cat-file", "-t", BLOB_SHA])
        .assert()
        .success()
        .stdout(predicate::str::diff("blob\n"));

    wit(&dir)
        .args(["cat-file", "-p", BLOB_SHA])
        .assert()
        .success()
        .stdout(predicate::str::contains("file 1"));

    Ok(())
}

#[test]
fn hash_object_without_write_leaves_store_untouched(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    wit(&dir).arg("init").assert().success();
    dir.child("file").write_str("file 1\n")?;

    wit(&dir)
        .args(["hash-object", "file"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{BLOB_SHA}\n")));

    assert!(!dir
        .path()
        .join(".git/objects")
        .join(&BLOB_SHA[..2])
        .join(&BLOB_SHA[2..])
        .exists());

    Ok(())
}

#[test]
fn staging_order_does_not_change_the_tree_address(
) -> Result<(), Box<dyn std::error::Error>> {
    let forward = assert_fs::TempDir::new()?;
    let backward = assert_fs::TempDir::new()?;

    for (dir, files) in [
        (&forward, ["alpha.txt", "zeta.txt"]),
        (&backward, ["zeta.txt", "alpha.txt"]),
    ] {
        wit(dir).arg("init").assert().success();
        dir.child("alpha.txt").write_str("alpha\n")?;
        dir.child("zeta.txt").write_str("zeta\n")?;
        for file in files {
            wit(dir).args(["update-index", "--add", file]).assert().success();
        }
    }

    let tree_of = |dir: &assert_fs::TempDir| -> String {
        let output = wit(dir).arg("write-tree").assert().success();
        String::from_utf8(output.get_output().stdout.clone()).unwrap()
    };

    pretty_assertions::assert_eq!(tree_of(&forward), tree_of(&backward));

    Ok(())
}
