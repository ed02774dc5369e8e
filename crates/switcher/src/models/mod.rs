//! Domain models for dropdown entities

mod account;
mod folder;
mod uri;

pub use account::{Account, AccountSettings};
pub use folder::Folder;
pub use uri::{AccountUri, FolderUri};
