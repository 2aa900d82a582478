//! Index entry codec
//!
//! One entry per staged file: path, blob address, and the stat fields
//! captured at staging time. The stat block is advisory — it never feeds the
//! content hash, it only rides along for on-disk fidelity.
//!
//! ## Entry Format
//!
//! Ten big-endian u32 fields, a raw 20-byte object ID, a u16 path length,
//! the path bytes, then NUL padding. The padded tail (length field + path +
//! padding) is brought to a multiple of 8 with `pad = 8 - ((6 + len) % 8)`,
//! so every entry carries between one and eight trailing NULs.

use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::CoreError;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::fs::Metadata;
use std::io::{BufRead, Read, Write};
use std::os::unix::prelude::MetadataExt;
use std::path::{Path, PathBuf};

/// Maximum path length representable in the on-disk length field
const MAX_PATH_SIZE: usize = 4095;

/// Entry alignment block size
pub const ENTRY_BLOCK: usize = 8;

/// Bytes in the length field plus the misalignment of the fixed prefix;
/// the quantity the padding formula closes over
const TAIL_BASE: usize = 6;

/// One staged file: path, blob address and captured stat fields.
#[derive(Debug, Clone, Default, new)]
pub struct IndexEntry {
    /// File path relative to the repository root
    pub name: PathBuf,
    /// Address of the staged blob
    pub oid: ObjectId,
    /// Filesystem stat fields captured at staging time
    pub metadata: EntryMetadata,
}

impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for IndexEntry {}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

/// Stat fields stored per entry.
///
/// Timestamps keep their native width in memory and truncate to u32 on
/// serialization (wrap, never fail).
#[derive(Debug, Clone, Default)]
pub struct EntryMetadata {
    pub ctime: i64,
    pub ctime_nsec: i64,
    pub mtime: i64,
    pub mtime_nsec: i64,
    pub dev: u64,
    pub ino: u64,
    pub mode: FileMode,
    pub uid: u32,
    pub gid: u32,
    /// Blob content length in bytes
    pub size: u64,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let entry_name = self
            .name
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid entry name"))?;
        if entry_name.len() > MAX_PATH_SIZE {
            return Err(anyhow::anyhow!(
                "Entry path too long: {} bytes",
                entry_name.len()
            ));
        }
        if entry_name.as_bytes().contains(&0) {
            return Err(anyhow::anyhow!("Entry path contains NUL"));
        }

        let mut entry_bytes = Vec::new();
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.dev as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ino as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mode.as_u32())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.uid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.gid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.size as u32)?;
        self.oid.write_raw_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(entry_name.len() as u16)?;
        entry_bytes.write_all(entry_name.as_bytes())?;

        // pad = 8 - ((6 + name_len) % 8), always 1..=8 NUL bytes
        let padding = ENTRY_BLOCK - ((TAIL_BASE + entry_name.len()) % ENTRY_BLOCK);
        entry_bytes.extend(std::iter::repeat_n(0u8, padding));

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    /// Read exactly one entry, leaving the reader positioned at the next.
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let read_u32 = |reader: &mut dyn Read| -> anyhow::Result<u32> {
            Ok(reader
                .read_u32::<byteorder::NetworkEndian>()
                .map_err(|_| CoreError::Corrupt("truncated index entry".to_string()))?)
        };

        let ctime = read_u32(&mut reader)? as i64;
        let ctime_nsec = read_u32(&mut reader)? as i64;
        let mtime = read_u32(&mut reader)? as i64;
        let mtime_nsec = read_u32(&mut reader)? as i64;
        let dev = read_u32(&mut reader)? as u64;
        let ino = read_u32(&mut reader)? as u64;
        let mode = FileMode::try_from(read_u32(&mut reader)?)?;
        let uid = read_u32(&mut reader)?;
        let gid = read_u32(&mut reader)?;
        let size = read_u32(&mut reader)? as u64;

        let oid = ObjectId::read_raw_from(&mut reader)
            .map_err(|_| CoreError::Corrupt("truncated entry address".to_string()))?;

        // only the low 12 bits of the length field are significant
        let name_len = reader
            .read_u16::<byteorder::NetworkEndian>()
            .map_err(|_| CoreError::Corrupt("truncated entry length field".to_string()))?;
        let name_len = (name_len & 0x0FFF) as usize;

        let mut name_bytes = vec![0u8; name_len];
        reader
            .read_exact(&mut name_bytes)
            .map_err(|_| CoreError::Corrupt("truncated entry path".to_string()))?;
        let name = PathBuf::from(
            std::str::from_utf8(&name_bytes)
                .map_err(|_| CoreError::Corrupt("non-UTF-8 entry path".to_string()))?,
        );

        let padding = ENTRY_BLOCK - ((TAIL_BASE + name_len) % ENTRY_BLOCK);
        let mut pad_bytes = vec![0u8; padding];
        reader
            .read_exact(&mut pad_bytes)
            .map_err(|_| CoreError::Corrupt("truncated entry padding".to_string()))?;
        if pad_bytes.iter().any(|&b| b != 0) {
            return Err(CoreError::Corrupt("non-NUL entry padding".to_string()).into());
        }

        Ok(IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime,
                ctime_nsec,
                mtime,
                mtime_nsec,
                dev,
                ino,
                mode,
                uid,
                gid,
                size,
            },
        })
    }
}

impl TryFrom<(&Path, Metadata)> for EntryMetadata {
    type Error = anyhow::Error;

    fn try_from((file_path, metadata): (&Path, Metadata)) -> Result<Self, Self::Error> {
        Ok(Self {
            ctime: metadata.ctime(),
            ctime_nsec: metadata.ctime_nsec(),
            mtime: metadata.mtime(),
            mtime_nsec: metadata.mtime_nsec(),
            dev: metadata.dev(),
            ino: metadata.ino(),
            mode: FileMode::from_workspace_path(file_path),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size(),
        })
    }
}
