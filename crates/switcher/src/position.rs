//! Position index for the flattened dropdown list
//!
//! The dropdown linearizes a two-tier structure into flat positions:
//! all accounts first, then (only while recent folders are enabled and
//! non-empty) a header row, the recent folders, and optionally a trailing
//! "show all folders" row. [`SlotLayout`] is the pure mapping between flat
//! positions and semantic slots; it owns no entity data.

use thiserror::Error;

/// Number of distinct row kinds a host has to provide views for
pub const VIEW_TYPE_COUNT: usize = 4;

/// Stable ID for the header row, out of band of any URI hash
pub const HEADER_STABLE_ID: i64 = -1;

/// Stable ID for the "show all folders" row, out of band of any URI hash
pub const ALL_FOLDERS_STABLE_ID: i64 = -2;

/// The kind of row at a position (the item view type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// An account row (user@example.com)
    Account,
    /// The separator between accounts and recent folders
    Header,
    /// A recent folder row (Sent, Outbox)
    RecentFolder,
    /// The trailing "show all folders" row
    AllFolders,
}

impl SlotKind {
    /// Whether rows of this kind can be selected by the user
    ///
    /// Only the header is inert.
    pub fn selectable(&self) -> bool {
        !matches!(self, SlotKind::Header)
    }
}

/// A resolved slot: row kind plus the index needed to look up its entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Account at this index in the account snapshot
    Account(usize),
    /// The separator row
    Header,
    /// Recent folder at this offset in the recent-folder list
    RecentFolder(usize),
    /// The trailing "show all folders" row
    AllFolders,
}

impl Slot {
    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Account(_) => SlotKind::Account,
            Slot::Header => SlotKind::Header,
            Slot::RecentFolder(_) => SlotKind::RecentFolder,
            Slot::AllFolders => SlotKind::AllFolders,
        }
    }
}

/// Typed error for position lookups at the host boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position {position} out of range for count {count}")]
    OutOfRange { position: usize, count: usize },
}

/// The shape of the flattened list at one instant
///
/// A value of this type is derived from adapter state on demand and
/// thrown away; it is only valid as long as the counts it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    num_accounts: usize,
    recent_visible: bool,
    recent_count: usize,
    show_all_folders: bool,
}

impl SlotLayout {
    pub fn new(
        num_accounts: usize,
        recent_visible: bool,
        recent_count: usize,
        show_all_folders: bool,
    ) -> Self {
        Self {
            num_accounts,
            recent_visible,
            recent_count,
            show_all_folders,
        }
    }

    /// Total number of rows
    ///
    /// The folder section (header + recents + optional footer) only exists
    /// while recent folders are enabled and at least one is cached.
    pub fn count(&self) -> usize {
        let folder_rows = if self.recent_visible && self.recent_count > 0 {
            1 + self.recent_count + usize::from(self.show_all_folders)
        } else {
            0
        };
        self.num_accounts + folder_rows
    }

    /// Resolve a position to its slot
    ///
    /// # Panics
    /// Panics if `position >= count()`; an out-of-range position is a
    /// programming error on the caller's side. Use [`Self::try_slot_at`]
    /// where a typed error is preferred.
    pub fn slot_at(&self, position: usize) -> Slot {
        match self.try_slot_at(position) {
            Ok(slot) => slot,
            Err(e) => panic!("{e}"),
        }
    }

    /// Resolve a position to its slot, or report it as out of range
    pub fn try_slot_at(&self, position: usize) -> Result<Slot, PositionError> {
        let count = self.count();
        if position >= count {
            return Err(PositionError::OutOfRange { position, count });
        }
        // First the accounts
        if position < self.num_accounts {
            return Ok(Slot::Account(position));
        }
        // Then the header
        if position == self.num_accounts {
            return Ok(Slot::Header);
        }
        let offset = self.recent_offset(position);
        if self.show_all_folders && offset >= self.recent_count {
            return Ok(Slot::AllFolders);
        }
        // Finally, the recent folders
        Ok(Slot::RecentFolder(offset))
    }

    /// Offset into the recent-folder list for a position past the header
    fn recent_offset(&self, position: usize) -> usize {
        position - self.num_accounts - 1
    }
}

/// Stable row ID for an entity identified by URI
///
/// Any deterministic hash works here; only injectivity over the URIs in
/// one snapshot and disjointness from the sentinel IDs matter. The result
/// is masked non-negative so it can never collide with
/// [`HEADER_STABLE_ID`] or [`ALL_FOLDERS_STABLE_ID`].
pub fn uri_stable_id(uri: &str) -> i64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    uri.hash(&mut hasher);
    (hasher.finish() & i64::MAX as u64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_formula() {
        for num_accounts in 0..4 {
            for recent_visible in [false, true] {
                for recent_count in 0..4 {
                    for show_all in [false, true] {
                        let layout =
                            SlotLayout::new(num_accounts, recent_visible, recent_count, show_all);
                        let expected = num_accounts
                            + if recent_visible && recent_count > 0 {
                                1 + recent_count + usize::from(show_all)
                            } else {
                                0
                            };
                        assert_eq!(layout.count(), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_accounts_only_when_disabled() {
        let layout = SlotLayout::new(2, false, 3, true);
        assert_eq!(layout.count(), 2);
        assert_eq!(layout.slot_at(0), Slot::Account(0));
        assert_eq!(layout.slot_at(1), Slot::Account(1));
    }

    #[test]
    fn test_full_shape_with_footer() {
        // 2 accounts + header + 3 recents + footer
        let layout = SlotLayout::new(2, true, 3, true);
        assert_eq!(layout.count(), 7);
        assert_eq!(layout.slot_at(0).kind(), SlotKind::Account);
        assert_eq!(layout.slot_at(1).kind(), SlotKind::Account);
        assert_eq!(layout.slot_at(2), Slot::Header);
        assert_eq!(layout.slot_at(3), Slot::RecentFolder(0));
        assert_eq!(layout.slot_at(4), Slot::RecentFolder(1));
        assert_eq!(layout.slot_at(5), Slot::RecentFolder(2));
        assert_eq!(layout.slot_at(6), Slot::AllFolders);
    }

    #[test]
    fn test_no_footer_when_hidden() {
        let layout = SlotLayout::new(1, true, 2, false);
        assert_eq!(layout.count(), 4);
        assert_eq!(layout.slot_at(3), Slot::RecentFolder(1));
    }

    #[test]
    fn test_section_collapses_when_no_recents() {
        let layout = SlotLayout::new(3, true, 0, true);
        assert_eq!(layout.count(), 3);
        assert_eq!(layout.slot_at(2), Slot::Account(2));
    }

    #[test]
    fn test_header_is_exactly_at_num_accounts() {
        for num_accounts in 0..4 {
            let layout = SlotLayout::new(num_accounts, true, 2, true);
            assert_eq!(layout.slot_at(num_accounts), Slot::Header);
        }
    }

    #[test]
    fn test_footer_is_last_position() {
        let layout = SlotLayout::new(2, true, 3, true);
        assert_eq!(layout.slot_at(layout.count() - 1), Slot::AllFolders);
    }

    #[test]
    fn test_try_slot_at_out_of_range() {
        let layout = SlotLayout::new(2, false, 0, false);
        assert_eq!(
            layout.try_slot_at(2),
            Err(PositionError::OutOfRange {
                position: 2,
                count: 2
            })
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_slot_at_panics_out_of_range() {
        SlotLayout::new(1, false, 0, false).slot_at(1);
    }

    #[test]
    fn test_only_header_is_not_selectable() {
        assert!(SlotKind::Account.selectable());
        assert!(!SlotKind::Header.selectable());
        assert!(SlotKind::RecentFolder.selectable());
        assert!(SlotKind::AllFolders.selectable());
    }

    #[test]
    fn test_stable_id_deterministic_and_distinct() {
        let a = uri_stable_id("vega://accounts/1");
        let b = uri_stable_id("vega://accounts/1");
        let c = uri_stable_id("vega://accounts/2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_stable_id_disjoint_from_sentinels() {
        for uri in ["vega://a", "vega://b", "vega://c/d?e=f"] {
            let id = uri_stable_id(uri);
            assert!(id >= 0);
            assert_ne!(id, HEADER_STABLE_ID);
            assert_ne!(id, ALL_FOLDERS_STABLE_ID);
        }
    }
}
