use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Point a branch ref at a commit address.
    pub fn update_ref(&self, ref_name: &str, sha: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(sha.to_string())?;

        self.refs()
            .update_branch(ref_name, &object_id, self.database())
    }
}
