//! Tree object
//!
//! A tree is a directory snapshot: a name-sorted list of (mode, name,
//! address) entries. This store emits flat trees only — every staged path is
//! a sibling at the root; nested per-directory trees are the natural
//! extension point but out of scope here.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<octal-mode> <name>\0<20-byte-raw-address>`
//!
//! Entries are kept in a `BTreeMap` keyed by name, so serialization is
//! byte-order sorted and the tree address is canonical regardless of
//! staging order.

use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// A single (mode, address) pair; the name is the map key.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub oid: ObjectId,
}

/// Directory snapshot built from the staging area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Build a flat tree from index entries.
    ///
    /// Sorting falls out of the map's byte-wise key order, which is what
    /// makes identical entry sets hash identically whatever order they were
    /// staged in.
    pub fn build<'e>(entries: impl Iterator<Item = &'e IndexEntry>) -> anyhow::Result<Self> {
        let mut tree = Self::default();

        for entry in entries {
            let name = entry
                .name
                .to_str()
                .context("Invalid entry name")?
                .to_string();
            tree.entries
                .insert(name, TreeEntry::new(entry.metadata.mode, entry.oid.clone()));
        }

        Ok(tree)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        for (name, tree_entry) in &self.entries {
            let header = format!("{:o} {}", tree_entry.mode.as_u32(), name);
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.push(0);
            tree_entry.oid.write_raw_to(&mut content_bytes)?;
        }

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if *mode_bytes.last().unwrap() != b' ' {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }
            mode_bytes.pop();

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = u32::from_str_radix(mode_str, 8).context("unparsable entry mode")?;
            let mode = FileMode::try_from(mode)?;

            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || *name_bytes.last().unwrap() != b'\0' {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            name_bytes.pop();
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_raw_from(&mut reader).context("unexpected EOF in object id")?;

            entries.insert(name, TreeEntry::new(mode, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, tree_entry)| {
                format!("{} blob {}\t{}", tree_entry.mode.as_str(), tree_entry.oid, name)
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::index_entry::EntryMetadata;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn entry(name: &str, hex: &str) -> IndexEntry {
        IndexEntry::new(
            PathBuf::from(name),
            ObjectId::try_parse(hex.to_string()).unwrap(),
            EntryMetadata::default(),
        )
    }

    #[test]
    fn test_serialization_is_name_sorted() {
        let a = entry("alpha", &"a".repeat(40));
        let z = entry("zeta", &"b".repeat(40));

        let staged_forward = Tree::build([&a, &z].into_iter()).unwrap();
        let staged_backward = Tree::build([&z, &a].into_iter()).unwrap();

        pretty_assertions::assert_eq!(
            staged_forward.object_id().unwrap(),
            staged_backward.object_id().unwrap()
        );
    }

    #[test]
    fn test_round_trip_preserves_entries() {
        let tree = Tree::build(
            [&entry("file", &"0a".repeat(20)), &entry("other", &"1b".repeat(20))].into_iter(),
        )
        .unwrap();

        let serialized = tree.serialize().unwrap();
        let body_start = serialized.iter().position(|&b| b == 0).unwrap() + 1;
        let parsed = Tree::deserialize(Cursor::new(serialized.slice(body_start..))).unwrap();

        pretty_assertions::assert_eq!(parsed, tree);
    }
}
