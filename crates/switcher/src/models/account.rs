//! Account model for the dropdown

use serde::{Deserialize, Serialize};

use super::{AccountUri, FolderUri};

/// Per-account settings the dropdown needs
///
/// The default inbox is the folder whose unread count is shown on the
/// account row, and its display name is the row's primary text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSettings {
    /// URI of the account's designated default inbox
    pub default_inbox: FolderUri,
    /// Display name of the default inbox (e.g. "Inbox")
    pub default_inbox_name: String,
}

impl AccountSettings {
    pub fn new(default_inbox: FolderUri, default_inbox_name: impl Into<String>) -> Self {
        Self {
            default_inbox,
            default_inbox_name: default_inbox_name.into(),
        }
    }
}

/// A mail account as presented in the dropdown
///
/// Accounts are immutable snapshots: when the account list changes the
/// whole snapshot is replaced, individual accounts are never mutated in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Canonical identity
    pub uri: AccountUri,
    /// Account name (typically the address, e.g. "fifi@example.com")
    pub name: String,
    /// Accent color as 0xAARRGGBB; 0 means no accent
    pub color: u32,
    /// Dropdown-relevant settings
    pub settings: AccountSettings,
}

impl Account {
    /// Create a new account with no accent color
    pub fn new(uri: AccountUri, name: impl Into<String>, settings: AccountSettings) -> Self {
        Self {
            uri,
            name: name.into(),
            color: 0,
            settings,
        }
    }

    /// Builder method to set the accent color
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Accent color, if one is configured
    pub fn accent_color(&self) -> Option<u32> {
        (self.color != 0).then_some(self.color)
    }
}
