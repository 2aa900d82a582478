use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the staged paths, one per line, in index order.
    pub fn ls_files(&self) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        for entry in index.entries() {
            writeln!(self.writer(), "{}", entry.name.display())?;
        }

        Ok(())
    }
}
