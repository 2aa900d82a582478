//! Index file format
//!
//! The index (staging area) records the entries queued for the next tree
//! build, independent of working-tree state.
//!
//! ## File Format (Version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes, big-endian)
//!   - Entry count (4 bytes, big-endian)
//!
//! Entries (variable length):
//!   - 10 big-endian u32 stat fields
//!   - 20-byte raw object ID
//!   - u16 path length (low 12 bits significant on read)
//!   - path bytes, then 1..8 NUL padding bytes
//! ```

pub mod entry_mode;
pub mod index_entry;
pub mod index_header;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "DIRC";

/// Index file format version
pub const VERSION: u32 = 2;
