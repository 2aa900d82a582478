use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;
use std::fs;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .git/refs/heads directory")?;

        self.refs()
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        // create the index file if it does not exist
        let index = self.index();
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .git/index file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
