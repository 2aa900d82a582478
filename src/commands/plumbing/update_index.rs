use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::index::index_entry::{EntryMetadata, IndexEntry};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::CoreError;
use std::path::{Path, PathBuf};

impl Repository {
    /// Stage working-tree files: hash and store each as a blob, then
    /// insert-or-replace its index entry. Previously staged paths survive
    /// untouched.
    pub fn update_index_add(&self, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        for path in paths {
            let path = Path::new(path);
            let blob = self.workspace().parse_blob(path)?;
            let stat = self.workspace().stat_file(path)?;

            let blob_id = self.database().store(blob)?;
            index.add(IndexEntry::new(PathBuf::from(path), blob_id, stat));
        }

        index.write_updates()?;

        Ok(())
    }

    /// Stage an explicit (mode, address, path) triple.
    ///
    /// The mode must be 100644 or 100755 and the address must resolve to an
    /// existing blob; otherwise the index is left untouched.
    pub fn update_index_cacheinfo(
        &self,
        mode: &str,
        sha: &str,
        path: &str,
    ) -> anyhow::Result<()> {
        let mode = FileMode::try_from(mode)?;
        let object_id = ObjectId::try_parse(sha.to_string())?;

        let blob = self
            .database()
            .parse_object_as_blob(&object_id)?
            .ok_or_else(|| {
                CoreError::InvalidReference(format!("{object_id} does not resolve to a blob"))
            })?;

        let mut index = self.index();
        index.rehydrate()?;

        let metadata = EntryMetadata {
            mode,
            size: blob.content().len() as u64,
            ..Default::default()
        };
        index.add(IndexEntry::new(PathBuf::from(path), object_id, metadata));

        index.write_updates()?;

        Ok(())
    }
}
