//! The account/folder dropdown adapter
//!
//! [`AccountSwitcher`] is the presentation core behind the dropdown: it
//! owns the account snapshot, the current account/folder, and the cached
//! recent-folder list, reacts to change notifications from its sources,
//! and answers position queries for the host list UI.
//!
//! The adapter is handed out as `Arc<AccountSwitcher>`. Its subscriptions
//! hold only weak back-references, so a source can never keep a dropped
//! adapter alive; `destroy` must still be called to release the observer
//! registrations themselves.

use log::{debug, warn};
use std::collections::HashSet;
use std::sync::{Arc, RwLock, Weak};

use crate::events::{EventBus, ObserverHandle};
use crate::models::{Account, Folder};
use crate::position::{
    ALL_FOLDERS_STABLE_ID, HEADER_STABLE_ID, Slot, SlotKind, SlotLayout, VIEW_TYPE_COUNT,
    uri_stable_id,
};
use crate::rows::{AccountRow, FolderRow, HeaderRow, RowContent, RowRenderer, visible_text};
use crate::settings::SwitcherSettings;
use crate::sources::{AccountSource, RecentFolderSource, UnreadCountSource};

/// The entity resolved at a position
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Account(Account),
    Header,
    RecentFolder(Folder),
    AllFolders,
}

#[derive(Default)]
struct SwitcherState {
    /// Snapshot of all accounts, replaced wholesale on update
    accounts: Vec<Account>,
    /// The account currently being viewed
    current_account: Option<Account>,
    /// The folder currently being viewed
    current_folder: Option<Folder>,
    /// Cached recent folders for the current folder; empty while disabled
    recent_folders: Vec<Folder>,
    /// Whether the recent-folder section is enabled
    recent_visible: bool,
}

#[derive(Default)]
struct Subscriptions {
    account: Option<ObserverHandle>,
    unread: Option<ObserverHandle>,
    /// Only present while the recent-folder feature is enabled
    recent: Option<ObserverHandle>,
}

/// Presentation adapter for the account/folder dropdown
pub struct AccountSwitcher {
    self_ref: Weak<Self>,
    accounts_src: Arc<dyn AccountSource>,
    recents_src: Arc<dyn RecentFolderSource>,
    unread_src: Arc<dyn UnreadCountSource>,
    /// Whether the trailing "show all folders" row is offered
    show_all_folders: bool,
    state: RwLock<SwitcherState>,
    subs: RwLock<Subscriptions>,
    /// Redraw bus: one emission per presentation-state change
    changed: EventBus<()>,
}

impl AccountSwitcher {
    /// Create the adapter and register its source observers
    ///
    /// The current account is seeded from the account source, matching a
    /// host that constructs the dropdown after accounts are known. Call
    /// [`destroy`](Self::destroy) when the hosting screen goes away.
    pub fn new(
        accounts_src: Arc<dyn AccountSource>,
        recents_src: Arc<dyn RecentFolderSource>,
        unread_src: Arc<dyn UnreadCountSource>,
        settings: &SwitcherSettings,
    ) -> Arc<Self> {
        let current_account = accounts_src.current_account();
        let switcher = Arc::new_cyclic(|weak| Self {
            self_ref: weak.clone(),
            accounts_src,
            recents_src,
            unread_src,
            show_all_folders: settings.show_all_folders,
            state: RwLock::new(SwitcherState {
                current_account,
                ..Default::default()
            }),
            subs: RwLock::new(Subscriptions::default()),
            changed: EventBus::new(),
        });

        let weak = switcher.self_ref.clone();
        let account_handle = switcher.accounts_src.changes().subscribe(move |account| {
            if let Some(switcher) = weak.upgrade() {
                switcher.handle_account_changed(account);
            }
        });
        let weak = switcher.self_ref.clone();
        let unread_handle = switcher.unread_src.changes().subscribe(move |()| {
            if let Some(switcher) = weak.upgrade() {
                switcher.changed.emit(&());
            }
        });

        let mut subs = switcher.subs.write().unwrap();
        subs.account = Some(account_handle);
        subs.unread = Some(unread_handle);
        drop(subs);

        switcher
    }

    /// Redraw notifications for the host
    ///
    /// Emitted once per effective presentation-state change; redundant
    /// notifications from the sources are swallowed.
    pub fn changes(&self) -> &EventBus<()> {
        &self.changed
    }

    // === Host data entry points ===

    /// Replace the account snapshot
    ///
    /// Re-derives nothing else; the default inbox of every account is
    /// registered with the unread-count source so account rows can show
    /// live counts.
    pub fn set_accounts(&self, accounts: Vec<Account>) {
        let mut seen = HashSet::new();
        for account in &accounts {
            if !seen.insert(account.uri.clone()) {
                warn!("duplicate account uri in snapshot: {}", account.uri);
                debug_assert!(false, "duplicate account uri in snapshot: {}", account.uri);
            }
            self.unread_src.start_watching(&account.settings.default_inbox);
        }
        debug!("account snapshot replaced ({} accounts)", accounts.len());
        self.state.write().unwrap().accounts = accounts;
        self.changed.emit(&());
    }

    /// Set the folder currently being viewed
    ///
    /// A folder identity-equal to the current one is a no-op. Returns
    /// whether a change occurred.
    pub fn set_current_folder(&self, folder: &Folder) -> bool {
        let recompute = {
            let mut state = self.state.write().unwrap();
            let same = state
                .current_folder
                .as_ref()
                .is_some_and(|f| f.uri == folder.uri);
            if same {
                return false;
            }
            state.current_folder = Some(folder.clone());
            state.recent_visible
        };
        debug!("current folder set to {}", folder.uri);
        self.load_recent_folders();
        if recompute {
            self.changed.emit(&());
        }
        true
    }

    /// Notify that the current folder's data changed (same identity,
    /// fresher counts)
    pub fn on_folder_updated(&self, folder: &Folder) {
        self.state.write().unwrap().current_folder = Some(folder.clone());
        self.changed.emit(&());
    }

    // === Recent-folder feature ===

    /// Enable the recent-folder section
    ///
    /// Idempotent. An existing non-empty cache is reused as-is and only a
    /// redraw is signaled; an empty cache is populated immediately.
    pub fn enable_recent_folders(&self) {
        {
            let state = self.state.read().unwrap();
            if state.recent_visible {
                return;
            }
        }

        let weak = self.self_ref.clone();
        let handle = self.recents_src.changes().subscribe(move |()| {
            if let Some(switcher) = weak.upgrade() {
                switcher.handle_recent_list_changed();
            }
        });
        self.subs.write().unwrap().recent = Some(handle);

        let needs_fetch = {
            let mut state = self.state.write().unwrap();
            state.recent_visible = true;
            state.recent_folders.is_empty()
        };
        if needs_fetch {
            self.load_recent_folders();
        }
        self.changed.emit(&());
    }

    /// Disable the recent-folder section and discard its cache
    ///
    /// Idempotent.
    pub fn disable_recent_folders(&self) {
        {
            let state = self.state.read().unwrap();
            if !state.recent_visible {
                return;
            }
        }

        if let Some(handle) = self.subs.write().unwrap().recent.take() {
            self.recents_src.changes().unsubscribe(handle);
        }
        {
            let mut state = self.state.write().unwrap();
            state.recent_visible = false;
            state.recent_folders.clear();
        }
        self.changed.emit(&());
    }

    /// Whether any recent folders are cached
    pub fn has_recent_folders(&self) -> bool {
        !self.state.read().unwrap().recent_folders.is_empty()
    }

    /// Tear down every observer registration
    ///
    /// Idempotent and safe in any order relative to
    /// [`disable_recent_folders`](Self::disable_recent_folders).
    pub fn destroy(&self) {
        let (account, unread, recent) = {
            let mut subs = self.subs.write().unwrap();
            (subs.account.take(), subs.unread.take(), subs.recent.take())
        };
        if let Some(handle) = account {
            self.accounts_src.changes().unsubscribe(handle);
        }
        if let Some(handle) = unread {
            self.unread_src.changes().unsubscribe(handle);
        }
        if let Some(handle) = recent {
            self.recents_src.changes().unsubscribe(handle);
        }
        debug!("dropdown adapter destroyed");
    }

    // === Position queries ===

    /// Total number of rows
    pub fn count(&self) -> usize {
        self.layout(&self.state.read().unwrap()).count()
    }

    /// Number of distinct row kinds (fixed)
    pub fn view_type_count(&self) -> usize {
        VIEW_TYPE_COUNT
    }

    /// Row kind at a position
    ///
    /// # Panics
    /// Panics if `position >= count()`.
    pub fn item_view_type(&self, position: usize) -> SlotKind {
        self.layout(&self.state.read().unwrap())
            .slot_at(position)
            .kind()
    }

    /// Whether the row at a position is selectable (all but the header)
    pub fn is_enabled(&self, position: usize) -> bool {
        self.item_view_type(position).selectable()
    }

    /// The entity resolved at a position
    ///
    /// # Panics
    /// Panics if `position >= count()`.
    pub fn item(&self, position: usize) -> Item {
        let state = self.state.read().unwrap();
        match self.layout(&state).slot_at(position) {
            Slot::Account(index) => Item::Account(state.accounts[index].clone()),
            Slot::Header => Item::Header,
            Slot::RecentFolder(offset) => Item::RecentFolder(state.recent_folders[offset].clone()),
            Slot::AllFolders => Item::AllFolders,
        }
    }

    /// Stable row identity at a position
    ///
    /// Entity rows hash their URI; the header and footer use fixed
    /// out-of-band sentinels.
    ///
    /// # Panics
    /// Panics if `position >= count()`.
    pub fn stable_id(&self, position: usize) -> i64 {
        let state = self.state.read().unwrap();
        match self.layout(&state).slot_at(position) {
            Slot::Account(index) => uri_stable_id(state.accounts[index].uri.as_str()),
            Slot::Header => HEADER_STABLE_ID,
            Slot::RecentFolder(offset) => {
                uri_stable_id(state.recent_folders[offset].uri.as_str())
            }
            Slot::AllFolders => ALL_FOLDERS_STABLE_ID,
        }
    }

    // === Rendering ===

    /// Project the row at a position into its renderable content
    ///
    /// # Panics
    /// Panics if `position >= count()`.
    pub fn project(&self, position: usize) -> RowContent {
        let state = self.state.read().unwrap();
        match self.layout(&state).slot_at(position) {
            Slot::Account(index) => {
                let account = &state.accounts[index];
                let inbox = self.unread_src.folder(&account.settings.default_inbox);
                RowContent::Account(AccountRow {
                    primary: visible_text(&account.settings.default_inbox_name),
                    secondary: visible_text(&account.name),
                    accent: account.accent_color(),
                    unread_count: inbox.map(|f| f.unread_count).unwrap_or(0),
                })
            }
            Slot::Header => {
                let title = state
                    .current_account
                    .as_ref()
                    .map(|a| a.name.as_str())
                    .unwrap_or("");
                RowContent::Header(HeaderRow {
                    title: visible_text(title),
                })
            }
            Slot::RecentFolder(offset) => {
                let folder = &state.recent_folders[offset];
                RowContent::RecentFolder(FolderRow {
                    name: visible_text(&folder.name),
                    accent: folder.accent_color(),
                    unread_count: folder.unread_count,
                })
            }
            Slot::AllFolders => RowContent::AllFolders,
        }
    }

    /// Render the row at a position through the host's renderer
    ///
    /// # Panics
    /// Panics if `position >= count()`.
    pub fn render<R: RowRenderer>(
        &self,
        position: usize,
        renderer: &R,
        recycled: Option<R::View>,
    ) -> R::View {
        let content = self.project(position);
        renderer.render(&content, recycled)
    }

    // === Accessors ===

    /// The account currently being viewed
    pub fn current_account(&self) -> Option<Account> {
        self.state.read().unwrap().current_account.clone()
    }

    /// The folder currently being viewed
    pub fn current_folder(&self) -> Option<Folder> {
        self.state.read().unwrap().current_folder.clone()
    }

    // === Change handlers ===

    fn handle_account_changed(&self, new_account: &Account) {
        let recompute = {
            let mut state = self.state.write().unwrap();
            let same = state
                .current_account
                .as_ref()
                .is_some_and(|a| a.uri == new_account.uri);
            if same {
                debug!("account change to {} is a no-op", new_account.uri);
                return;
            }
            let position = state
                .accounts
                .iter()
                .position(|a| a.uri == new_account.uri);
            debug!(
                "current account set to {} (snapshot position {:?})",
                new_account.uri, position
            );
            state.current_account = Some(new_account.clone());
            state.recent_visible
        };
        if recompute {
            self.load_recent_folders();
        }
        self.changed.emit(&());
    }

    fn handle_recent_list_changed(&self) {
        self.load_recent_folders();
        self.changed.emit(&());
    }

    /// Refresh the recent-folder cache from the source
    ///
    /// While disabled the cache is kept empty. Emitting the redraw is the
    /// caller's business, so one user-visible change never signals twice.
    fn load_recent_folders(&self) {
        let (visible, current) = {
            let state = self.state.read().unwrap();
            (
                state.recent_visible,
                state.current_folder.as_ref().map(|f| f.uri.clone()),
            )
        };
        if !visible {
            self.state.write().unwrap().recent_folders.clear();
            return;
        }
        let folders = self.recents_src.recent_folders(current.as_ref());
        debug!("recent folders recomputed ({} entries)", folders.len());
        self.state.write().unwrap().recent_folders = folders;
    }

    fn layout(&self, state: &SwitcherState) -> SlotLayout {
        SlotLayout::new(
            state.accounts.len(),
            state.recent_visible,
            state.recent_folders.len(),
            self.show_all_folders,
        )
    }
}
