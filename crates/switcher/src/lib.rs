//! Switcher crate - Presentation logic for the account/folder dropdown
//!
//! This crate provides the platform-independent core behind a mail
//! client's account dropdown:
//! - Domain models (Account, Folder, URI identities)
//! - Position index mapping flat list positions to semantic slots
//! - Selection state with no-op deduplication of change notifications
//! - Recent-folder cache driven by a host-supplied source
//! - Row projections and the renderer/formatter seams
//! - Publish/subscribe plumbing with explicit observer handles
//!
//! This crate has zero UI-toolkit dependencies and is designed to sit
//! between host data providers and any list-rendering surface.

pub mod events;
pub mod models;
pub mod position;
pub mod rows;
pub mod settings;
pub mod sources;
pub mod switcher;

pub use events::{EventBus, ObserverHandle};
pub use models::{Account, AccountSettings, AccountUri, Folder, FolderUri};
pub use position::{
    ALL_FOLDERS_STABLE_ID, HEADER_STABLE_ID, PositionError, Slot, SlotKind, SlotLayout,
    VIEW_TYPE_COUNT, uri_stable_id,
};
pub use rows::{
    AccountRow, CountFormatter, DefaultCountFormatter, FolderRow, HeaderRow, RowContent,
    RowRenderer,
};
pub use settings::SwitcherSettings;
pub use sources::{
    AccountSource, InMemoryAccountSource, InMemoryRecentFolders, InMemoryUnreadCounts,
    RecentFolderSource, UnreadCountSource,
};
pub use switcher::{AccountSwitcher, Item};
