//! Staging area
//!
//! The index is a path-keyed ordered map of staged entries, persisted in the
//! binary format described in `artifacts::index`. Every mutation loads the
//! full entry set first and rewrites the whole file afterwards, so repeated
//! staging accumulates entries and re-staging a path replaces its entry
//! (last write wins).

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::CoreError;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    /// Staged entries keyed by path
    entries: BTreeMap<Box<Path>, IndexEntry>,
    /// Index file header metadata
    header: IndexHeader,
    /// Set when the in-memory state has diverged from disk
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            header: IndexHeader::empty(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.header = IndexHeader::empty();
        self.changed = false;
    }

    /// Load the index from disk, replacing the in-memory state.
    ///
    /// A missing or empty file yields an empty index. Bad magic or an
    /// unsupported version is `Corrupt`.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.path().exists() {
            self.clear();
            std::fs::File::create(self.path())?;
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        self.clear();

        // an empty index file is a freshly initialized repository
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut content = Vec::new();
        lock.deref_mut().read_to_end(&mut content)?;
        let mut reader = Cursor::new(content);

        let entries_count = self.parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        Ok(())
    }

    fn parse_header(&mut self, reader: &mut (impl Read + std::io::BufRead)) -> anyhow::Result<u32> {
        let header = IndexHeader::deserialize(reader)
            .map_err(|_| CoreError::Corrupt("truncated index header".to_string()))?;

        if header.marker != SIGNATURE {
            return Err(CoreError::Corrupt(format!(
                "invalid index signature {:?}",
                header.marker
            ))
            .into());
        }

        if header.version != VERSION {
            return Err(CoreError::Corrupt(format!(
                "unsupported index version {}",
                header.version
            ))
            .into());
        }

        let entries_count = header.entries_count;
        self.header = header;

        Ok(entries_count)
    }

    fn parse_entries(
        &mut self,
        entries_count: u32,
        reader: &mut (impl Read + std::io::BufRead),
    ) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let entry = IndexEntry::deserialize(&mut *reader)?;
            self.entries
                .insert(entry.name.clone().into_boxed_path(), entry);
        }

        Ok(())
    }

    /// Insert-or-replace by path.
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries
            .insert(entry.name.clone().into_boxed_path(), entry);

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;
    }

    /// Rewrite the whole index file in one atomic step.
    ///
    /// The serialized image lands in a temp file that is renamed over the
    /// index, so readers never observe a half-written file.
    ///
    /// # Locking
    ///
    /// Holds an exclusive lock on the index file for the duration.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(self.path())?;
        let _lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        self.header = IndexHeader::new(String::from(SIGNATURE), VERSION, self.entries.len() as u32);

        let mut image = Vec::new();
        image.extend_from_slice(&self.header.serialize()?);
        for entry in self.entries.values() {
            image.extend_from_slice(&entry.serialize()?);
        }

        let index_dir = self
            .path
            .parent()
            .context("Index file has no parent directory")?;
        let temp_path = index_dir.join(format!("tmp-index-{}", std::process::id()));

        std::fs::write(&temp_path, &image)
            .context(format!("Unable to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, self.path())
            .context(format!("Unable to rename into {}", self.path().display()))?;

        self.changed = false;

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
