#![allow(dead_code)]

use wit::areas::repository::Repository;

/// Open a repository rooted at `dir` with its output discarded, running
/// `init` so the `.git` skeleton exists.
pub fn init_repository(dir: &std::path::Path) -> Repository {
    let repository = open_repository(dir);
    repository.init().expect("init failed");
    repository
}

/// Open a repository handle without initializing anything.
pub fn open_repository(dir: &std::path::Path) -> Repository {
    Repository::new(dir.to_str().expect("non-UTF-8 temp dir"), Box::new(std::io::sink()))
        .expect("failed to open repository")
}

/// Turn the currently staged entries into a tree plus a commit with a fixed
/// author, returning the commit address.
pub fn commit_current_index(
    repository: &Repository,
    message: &str,
) -> anyhow::Result<wit::artifacts::objects::object_id::ObjectId> {
    use wit::artifacts::objects::commit::{Author, Commit};
    use wit::artifacts::objects::tree::Tree;

    let mut index = repository.index();
    index.rehydrate()?;
    let tree = Tree::build(index.entries())?;
    drop(index);

    let tree_id = repository.database().store(tree)?;
    let author = Author::new_with_timestamp(
        "A".to_string(),
        "a@x".to_string(),
        chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
    );

    repository
        .database()
        .store(Commit::new(tree_id, author, message.to_string()))
}
