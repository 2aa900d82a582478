use crate::areas::repository::Repository;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;

impl Repository {
    /// Serialize the current index into a tree object and store it.
    ///
    /// Deterministic: the same staged entry set prints the same address
    /// whatever order it was staged in.
    pub fn write_tree(&self) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let tree = Tree::build(index.entries())?;
        let tree_id = self.database().store(tree)?;

        writeln!(self.writer(), "{tree_id}")?;

        Ok(())
    }
}
