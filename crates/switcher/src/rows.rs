//! Row projections and the rendering seam
//!
//! The adapter never builds views itself. For each slot it produces a
//! [`RowContent`] projection carrying exactly the data a row needs, and a
//! host-supplied [`RowRenderer`] turns that projection into a view.
//!
//! Text fields that may be empty are `Option<String>`: `None` means "hide
//! this text element entirely", never "render a blank line".

use serde::{Deserialize, Serialize};

use crate::position::SlotKind;

/// Projection for an account row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow {
    /// Big text: the account's default-inbox display name
    pub primary: Option<String>,
    /// Small text: the account name
    pub secondary: Option<String>,
    /// Accent color for the color block, if any
    pub accent: Option<u32>,
    /// Unread count of the account's default inbox (0 when unknown)
    pub unread_count: u32,
}

/// Projection for the header row separating accounts from recent folders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderRow {
    /// The current account's display name; hidden when there is none
    pub title: Option<String>,
}

/// Projection for a recent-folder row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRow {
    /// The folder's display name
    pub name: Option<String>,
    /// Accent color from the folder's block color, if any
    pub accent: Option<u32>,
    /// The folder's unread count
    pub unread_count: u32,
}

/// What a row displays, by slot kind
///
/// `AllFolders` carries no data: it is a static affordance whose view is
/// entirely the host's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowContent {
    Account(AccountRow),
    Header(HeaderRow),
    RecentFolder(FolderRow),
    AllFolders,
}

impl RowContent {
    pub fn kind(&self) -> SlotKind {
        match self {
            RowContent::Account(_) => SlotKind::Account,
            RowContent::Header(_) => SlotKind::Header,
            RowContent::RecentFolder(_) => SlotKind::RecentFolder,
            RowContent::AllFolders => SlotKind::AllFolders,
        }
    }
}

/// Host-supplied rendering surface
///
/// `recycled` is a previously built view of the same kind the host wants
/// reused; implementations may update it in place or ignore it and build
/// fresh.
pub trait RowRenderer {
    type View;

    fn render(&self, content: &RowContent, recycled: Option<Self::View>) -> Self::View;
}

/// Host-supplied unread-count formatting
pub trait CountFormatter {
    /// Format an unread count for display; 0 must format as the empty
    /// string so the host hides the count element.
    fn format_unread(&self, count: u32) -> String;
}

/// Default unread-count formatting: empty for zero, capped at a maximum
///
/// Counts above the cap render as "cap+" (e.g. "999+") so a runaway
/// mailbox cannot blow out the row layout.
#[derive(Debug, Clone, Copy)]
pub struct DefaultCountFormatter {
    cap: u32,
}

impl DefaultCountFormatter {
    pub fn new(cap: u32) -> Self {
        Self { cap }
    }
}

impl Default for DefaultCountFormatter {
    fn default() -> Self {
        Self::new(999)
    }
}

impl CountFormatter for DefaultCountFormatter {
    fn format_unread(&self, count: u32) -> String {
        if count == 0 {
            String::new()
        } else if count > self.cap {
            format!("{}+", self.cap)
        } else {
            count.to_string()
        }
    }
}

/// Project a text field, mapping the empty string to "hidden"
pub(crate) fn visible_text(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
