use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::CoreError;
use std::io::Write;

impl Repository {
    /// Wrap a tree address into a commit object and store it.
    ///
    /// Author and committer come from the `GIT_AUTHOR_*` environment.
    pub fn commit_tree(&self, tree_sha: &str, message: &str) -> anyhow::Result<()> {
        let tree_id = ObjectId::try_parse(tree_sha.to_string())?;

        if self.database().parse_object_as_tree(&tree_id)?.is_none() {
            return Err(CoreError::InvalidReference(format!(
                "{tree_id} does not resolve to a tree"
            ))
            .into());
        }

        let author = Author::load_from_env()?;
        let commit = Commit::new(tree_id, author, message.to_string());
        let commit_id = self.database().store(commit)?;

        writeln!(self.writer(), "{commit_id}")?;

        Ok(())
    }
}
