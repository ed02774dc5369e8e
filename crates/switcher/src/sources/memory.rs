//! In-memory source implementations
//!
//! These implementations back the integration tests and the preview app,
//! and serve as stubs until a host wires in its real providers.

use chrono::{DateTime, Utc};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::{AccountSource, RecentFolderSource, UnreadCountSource};
use crate::events::EventBus;
use crate::models::{Account, Folder, FolderUri};

/// In-memory implementation of [`AccountSource`]
///
/// The host (or a test) makes an account current with
/// [`set_current`](Self::set_current), which announces it on the bus.
pub struct InMemoryAccountSource {
    current: RwLock<Option<Account>>,
    changes: EventBus<Account>,
}

impl InMemoryAccountSource {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            changes: EventBus::new(),
        }
    }

    /// Create a source with an account already current (no announcement)
    pub fn with_current(account: Account) -> Self {
        Self {
            current: RwLock::new(Some(account)),
            changes: EventBus::new(),
        }
    }

    /// Make an account current and announce the change
    pub fn set_current(&self, account: Account) {
        *self.current.write().unwrap() = Some(account.clone());
        self.changes.emit(&account);
    }
}

impl Default for InMemoryAccountSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountSource for InMemoryAccountSource {
    fn current_account(&self) -> Option<Account> {
        self.current.read().unwrap().clone()
    }

    fn changes(&self) -> &EventBus<Account> {
        &self.changes
    }
}

/// In-memory implementation of [`RecentFolderSource`]
///
/// Ranks folders by most recent visit, excludes the folder being asked
/// about, and caps the list length. Visits are recorded with
/// [`touch`](Self::touch).
pub struct InMemoryRecentFolders {
    visits: RwLock<HashMap<FolderUri, (Folder, DateTime<Utc>)>>,
    max_entries: usize,
    changes: EventBus<()>,
}

impl InMemoryRecentFolders {
    pub fn new(max_entries: usize) -> Self {
        Self {
            visits: RwLock::new(HashMap::new()),
            max_entries,
            changes: EventBus::new(),
        }
    }

    /// Record a visit to a folder now and announce the change
    pub fn touch(&self, folder: Folder) {
        self.touch_at(folder, Utc::now());
    }

    /// Record a visit at an explicit time and announce the change
    pub fn touch_at(&self, folder: Folder, when: DateTime<Utc>) {
        self.visits
            .write()
            .unwrap()
            .insert(folder.uri.clone(), (folder, when));
        self.changes.emit(&());
    }
}

impl RecentFolderSource for InMemoryRecentFolders {
    fn recent_folders(&self, current: Option<&FolderUri>) -> Vec<Folder> {
        let visits = self.visits.read().unwrap();
        let mut ranked: Vec<(&Folder, DateTime<Utc>)> = visits
            .values()
            .filter(|(folder, _)| Some(&folder.uri) != current)
            .map(|(folder, when)| (folder, *when))
            .collect();
        // Most recent first; URI as tie-breaker for a deterministic order
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.0.uri.as_str().cmp(b.0.uri.as_str()))
        });
        ranked
            .into_iter()
            .take(self.max_entries)
            .map(|(folder, _)| folder.clone())
            .collect()
    }

    fn changes(&self) -> &EventBus<()> {
        &self.changes
    }
}

/// In-memory implementation of [`UnreadCountSource`]
///
/// Holds the freshest [`Folder`] snapshot per watched URI. Updates to
/// folders nobody watches are dropped.
pub struct InMemoryUnreadCounts {
    watched: RwLock<HashSet<FolderUri>>,
    folders: RwLock<HashMap<FolderUri, Folder>>,
    changes: EventBus<()>,
}

impl InMemoryUnreadCounts {
    pub fn new() -> Self {
        Self {
            watched: RwLock::new(HashSet::new()),
            folders: RwLock::new(HashMap::new()),
            changes: EventBus::new(),
        }
    }

    /// Deliver a fresher snapshot of a folder and announce the change
    pub fn set_folder(&self, folder: Folder) {
        if !self.watched.read().unwrap().contains(&folder.uri) {
            debug!("ignoring update for unwatched folder {}", folder.uri);
            return;
        }
        self.folders
            .write()
            .unwrap()
            .insert(folder.uri.clone(), folder);
        self.changes.emit(&());
    }
}

impl Default for InMemoryUnreadCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl UnreadCountSource for InMemoryUnreadCounts {
    fn start_watching(&self, uri: &FolderUri) {
        self.watched.write().unwrap().insert(uri.clone());
    }

    fn folder(&self, uri: &FolderUri) -> Option<Folder> {
        self.folders.read().unwrap().get(uri).cloned()
    }

    fn changes(&self) -> &EventBus<()> {
        &self.changes
    }
}
