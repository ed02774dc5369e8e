//! Collaborator trait definitions
//!
//! The adapter observes three host-supplied data sources. Each source
//! pairs a pull surface (query current data) with a push surface (an
//! [`EventBus`] announcing that the data changed). The adapter registers
//! observers on construction/enable and unregisters them on
//! disable/destroy.

use crate::events::EventBus;
use crate::models::{Account, Folder, FolderUri};

/// Source of the current account
pub trait AccountSource: Send + Sync {
    /// The account currently being viewed, if any is set up yet
    fn current_account(&self) -> Option<Account>;

    /// Bus announcing each newly current account
    fn changes(&self) -> &EventBus<Account>;
}

/// Source of recent folders, ranked relative to a current folder
pub trait RecentFolderSource: Send + Sync {
    /// Ordered recent folders for the given current folder (most relevant
    /// first), excluding that folder itself. `None` means no folder is
    /// current yet.
    fn recent_folders(&self, current: Option<&FolderUri>) -> Vec<Folder>;

    /// Bus announcing that the recent-folder ranking changed
    fn changes(&self) -> &EventBus<()>;
}

/// Source of fresh unread counts, keyed by folder URI
///
/// The source only tracks folders it has been told to watch; asking for
/// an unwatched folder yields nothing and the caller substitutes zero.
pub trait UnreadCountSource: Send + Sync {
    /// Begin watching a folder's unread count
    fn start_watching(&self, uri: &FolderUri);

    /// Freshest known snapshot of a watched folder
    fn folder(&self, uri: &FolderUri) -> Option<Folder>;

    /// Bus announcing that some watched count changed
    fn changes(&self) -> &EventBus<()>;
}
