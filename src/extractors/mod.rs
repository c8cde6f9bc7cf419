pub mod folder;
pub mod note;
