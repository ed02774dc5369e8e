//! Folder model for the dropdown

use serde::{Deserialize, Serialize};

use super::FolderUri;

/// A mail folder as presented in the dropdown
///
/// The unread count is a point-in-time snapshot; an external watcher
/// refreshes it by handing the adapter a fresher `Folder` for the same URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Canonical identity
    pub uri: FolderUri,
    /// Display name (e.g. "Sent", "Outbox")
    pub name: String,
    /// Number of unread messages
    pub unread_count: u32,
    /// Block color shown as the row accent, 0xAARRGGBB; 0 means no accent
    pub block_color: u32,
}

impl Folder {
    /// Create a new folder with zero unread messages and no accent
    pub fn new(uri: FolderUri, name: impl Into<String>) -> Self {
        Self {
            uri,
            name: name.into(),
            unread_count: 0,
            block_color: 0,
        }
    }

    /// Builder method to set the unread count
    pub fn with_unread_count(mut self, count: u32) -> Self {
        self.unread_count = count;
        self
    }

    /// Builder method to set the block color
    pub fn with_block_color(mut self, color: u32) -> Self {
        self.block_color = color;
        self
    }

    /// Accent color, if one is configured
    pub fn accent_color(&self) -> Option<u32> {
        (self.block_color != 0).then_some(self.block_color)
    }
}
