pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_files;
pub mod update_index;
pub mod update_ref;
pub mod write_tree;
