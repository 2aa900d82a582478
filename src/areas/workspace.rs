//! Working-tree access
//!
//! Thin wrapper over the repository's working directory: reading file bytes
//! and capturing the stat fields that ride along in index entries.

use crate::artifacts::index::index_entry::EntryMetadata;
use crate::artifacts::objects::blob::Blob;
use crate::errors::CoreError;
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a working-tree file into a blob, mode derived from the
    /// executable bit.
    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(path)?;
        let stat = self.stat_file(path)?;

        Ok(Blob::new(data, stat.mode))
    }

    pub fn read_file(&self, path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(path);
        if !full_path.exists() {
            return Err(CoreError::NotFound(format!("file {}", full_path.display())).into());
        }

        let data = std::fs::read(&full_path)
            .context(format!("Unable to read file {}", full_path.display()))?;

        Ok(Bytes::from(data))
    }

    pub fn stat_file(&self, path: &Path) -> anyhow::Result<EntryMetadata> {
        let full_path = self.path.join(path);
        let metadata = std::fs::metadata(&full_path)
            .context(format!("Unable to stat file {}", full_path.display()))?;

        EntryMetadata::try_from((full_path.as_path(), metadata))
    }
}
