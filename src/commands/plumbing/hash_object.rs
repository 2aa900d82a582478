use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Hash a working-tree file as a blob, optionally persisting it.
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let object = self.workspace().parse_blob(Path::new(object_path))?;
        let object_id = object.object_id()?;

        writeln!(self.writer(), "{object_id}")?;

        if write {
            self.database().store(object)?;
        }

        Ok(())
    }
}
