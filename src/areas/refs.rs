//! References
//!
//! A reference is a named pointer to a commit, stored as a plain text file
//! containing the 40-character hex address plus a newline. This core speaks
//! one namespace only: `refs/heads/<branch>`, a single path segment deep.
//! HEAD exists solely as scaffolding (`ref: refs/heads/master`) written at
//! init time; no reflog, no symref chasing beyond that.

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::CoreError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Accepted branch ref names: exactly one segment under refs/heads
const BRANCH_REF_REGEX: &str = r"^refs/heads/[^/\s]+$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    /// Point a branch ref at a commit.
    ///
    /// The ref name must match `refs/heads/<segment>` exactly and the
    /// address must resolve to a commit object; on any failure the ref file
    /// is left untouched.
    pub fn update_branch(
        &self,
        ref_name: &str,
        oid: &ObjectId,
        database: &Database,
    ) -> anyhow::Result<()> {
        if !regex::Regex::new(BRANCH_REF_REGEX)?.is_match(ref_name) {
            return Err(CoreError::InvalidReference(format!(
                "{ref_name:?} is not a branch ref"
            ))
            .into());
        }

        if database.parse_object_as_commit(oid)?.is_none() {
            return Err(CoreError::InvalidReference(format!(
                "{oid} does not resolve to a commit"
            ))
            .into());
        }

        let ref_path = self.path.join(ref_name);
        std::fs::create_dir_all(
            ref_path
                .parent()
                .context(format!("Invalid ref path {}", ref_path.display()))?,
        )?;

        // whole-file overwrite; no history of previous values is kept
        std::fs::write(&ref_path, format!("{oid}\n"))
            .context(format!("Unable to write ref file {}", ref_path.display()))?;

        Ok(())
    }

    /// Read a branch ref back, if present.
    pub fn read_ref(&self, ref_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.path.join(ref_name);
        if !ref_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    /// Write HEAD pointing at the given branch. Init-time scaffolding.
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        std::fs::write(self.head_path(), format!("ref: refs/heads/{branch}\n"))
            .context("Unable to write HEAD")?;

        Ok(())
    }
}
