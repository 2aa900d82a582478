//! File permission classes
//!
//! The index and trees record exactly two file modes: regular (100644) and
//! executable (100755). Symlinks and gitlinks are unsupported; any other
//! mode is rejected with `InvalidMode`.

use crate::errors::CoreError;
use is_executable::IsExecutable;
use std::path::Path;

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

impl FileMode {
    pub fn as_str(&self) -> &str {
        match self {
            FileMode::Regular => "100644",
            FileMode::Executable => "100755",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            FileMode::Regular => 0o100644,
            FileMode::Executable => 0o100755,
        }
    }

    /// Derive the mode from a working-tree path's executable bit.
    pub fn from_workspace_path(path: &Path) -> Self {
        match path.is_executable() {
            true => FileMode::Executable,
            false => FileMode::Regular,
        }
    }
}

impl TryFrom<u32> for FileMode {
    type Error = anyhow::Error;

    fn try_from(mode: u32) -> anyhow::Result<Self> {
        match mode {
            0o100644 => Ok(FileMode::Regular),
            0o100755 => Ok(FileMode::Executable),
            other => Err(CoreError::InvalidMode(format!("{other:o}")).into()),
        }
    }
}

impl TryFrom<&str> for FileMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "100644" => Ok(FileMode::Regular),
            "100755" => Ok(FileMode::Executable),
            other => Err(CoreError::InvalidMode(other.to_string()).into()),
        }
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
