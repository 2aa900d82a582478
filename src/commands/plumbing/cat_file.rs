use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Pretty-print an object's body. Interprets the object, so unknown
    /// kinds are rejected.
    pub fn cat_file_pretty(&self, sha: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(sha.to_string())?;

        let display = match self.database().parse_object(&object_id)? {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        };
        writeln!(self.writer(), "{display}")?;

        Ok(())
    }

    /// Print an object's kind. Raw read, so unrecognized kinds pass through
    /// opaquely.
    pub fn cat_file_type(&self, sha: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(sha.to_string())?;
        let (kind, _, _) = self.database().load_raw(&object_id)?;

        writeln!(self.writer(), "{kind}")?;

        Ok(())
    }
}
