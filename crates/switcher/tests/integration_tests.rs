//! Integration tests for the switcher crate
//!
//! These tests verify the complete flow from source notifications through
//! the adapter to rendered rows, using the in-memory sources and a
//! plain-text renderer.

use chrono::{Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use switcher::{
    Account, AccountSettings, AccountSwitcher, AccountUri, CountFormatter, DefaultCountFormatter,
    Folder, FolderUri, InMemoryAccountSource, InMemoryRecentFolders, InMemoryUnreadCounts, Item,
    RowContent, RowRenderer, SlotKind, SwitcherSettings,
};

/// Helper to create test accounts
fn make_account(n: u32) -> Account {
    let settings = AccountSettings::new(
        FolderUri::parse(&format!("vega://accounts/{n}/folders/inbox")).unwrap(),
        "Inbox",
    );
    Account::new(
        AccountUri::parse(&format!("vega://accounts/{n}")).unwrap(),
        format!("user{n}@example.com"),
        settings,
    )
    .with_color(0xFF224466 + n)
}

/// Helper to create test folders
fn make_folder(slug: &str, unread: u32) -> Folder {
    Folder::new(
        FolderUri::parse(&format!("vega://accounts/1/folders/{slug}")).unwrap(),
        slug.to_string(),
    )
    .with_unread_count(unread)
    .with_block_color(0xFF113355)
}

/// Plain-text renderer standing in for a host view layer
struct TextRenderer {
    formatter: DefaultCountFormatter,
}

impl TextRenderer {
    fn new() -> Self {
        Self {
            formatter: DefaultCountFormatter::default(),
        }
    }
}

impl RowRenderer for TextRenderer {
    type View = String;

    fn render(&self, content: &RowContent, recycled: Option<String>) -> String {
        let mut line = recycled.unwrap_or_default();
        line.clear();
        match content {
            RowContent::Account(row) => {
                if let Some(primary) = &row.primary {
                    line.push_str(primary);
                }
                if let Some(secondary) = &row.secondary {
                    line.push_str(" / ");
                    line.push_str(secondary);
                }
                let count = self.formatter.format_unread(row.unread_count);
                if !count.is_empty() {
                    line.push_str(&format!(" ({count})"));
                }
            }
            RowContent::Header(row) => {
                if let Some(title) = &row.title {
                    line.push_str(&format!("-- {title} --"));
                }
            }
            RowContent::RecentFolder(row) => {
                if let Some(name) = &row.name {
                    line.push_str(name);
                }
                let count = self.formatter.format_unread(row.unread_count);
                if !count.is_empty() {
                    line.push_str(&format!(" ({count})"));
                }
            }
            RowContent::AllFolders => line.push_str("Show all folders"),
        }
        line
    }
}

struct Harness {
    accounts: Arc<InMemoryAccountSource>,
    recents: Arc<InMemoryRecentFolders>,
    unread: Arc<InMemoryUnreadCounts>,
    switcher: Arc<AccountSwitcher>,
    redraws: Arc<AtomicUsize>,
}

fn setup() -> Harness {
    let settings = SwitcherSettings::default();
    let accounts = Arc::new(InMemoryAccountSource::new());
    let recents = Arc::new(InMemoryRecentFolders::new(settings.max_recent_folders));
    let unread = Arc::new(InMemoryUnreadCounts::new());
    let switcher = AccountSwitcher::new(
        accounts.clone(),
        recents.clone(),
        unread.clone(),
        &settings,
    );

    let redraws = Arc::new(AtomicUsize::new(0));
    let redraws_clone = redraws.clone();
    switcher.changes().subscribe(move |()| {
        redraws_clone.fetch_add(1, Ordering::SeqCst);
    });

    Harness {
        accounts,
        recents,
        unread,
        switcher,
        redraws,
    }
}

#[test]
fn test_full_dropdown_flow() {
    let harness = setup();
    let switcher = &harness.switcher;

    // Accounts arrive, one becomes current
    switcher.set_accounts(vec![make_account(1), make_account(2)]);
    harness.accounts.set_current(make_account(1));
    assert_eq!(switcher.count(), 2);

    // Recent folders enabled, three folders visited
    switcher.enable_recent_folders();
    let base = Utc::now();
    harness
        .recents
        .touch_at(make_folder("archive", 0), base - Duration::minutes(3));
    harness
        .recents
        .touch_at(make_folder("outbox", 2), base - Duration::minutes(2));
    harness
        .recents
        .touch_at(make_folder("sent", 0), base - Duration::minutes(1));

    assert_eq!(switcher.count(), 7);
    assert!(switcher.has_recent_folders());

    let kinds: Vec<SlotKind> = (0..switcher.count())
        .map(|p| switcher.item_view_type(p))
        .collect();
    assert_eq!(
        kinds,
        vec![
            SlotKind::Account,
            SlotKind::Account,
            SlotKind::Header,
            SlotKind::RecentFolder,
            SlotKind::RecentFolder,
            SlotKind::RecentFolder,
            SlotKind::AllFolders,
        ]
    );

    // Most recently visited folder leads the section
    match switcher.item(3) {
        Item::RecentFolder(folder) => assert_eq!(folder.name, "sent"),
        other => panic!("expected recent folder at 3, got {other:?}"),
    }

    // Unread count for the current account's inbox flows into the row
    harness.unread.set_folder(
        Folder::new(make_account(1).settings.default_inbox, "Inbox").with_unread_count(5),
    );
    let renderer = TextRenderer::new();
    assert_eq!(switcher.render(0, &renderer, None), "Inbox / user1@example.com (5)");
    assert_eq!(switcher.render(2, &renderer, None), "-- user1@example.com --");
    assert_eq!(switcher.render(4, &renderer, None), "outbox (2)");
    assert_eq!(switcher.render(6, &renderer, None), "Show all folders");
}

#[test]
fn test_render_reuses_recycled_view() {
    let harness = setup();
    harness.switcher.set_accounts(vec![make_account(1)]);

    let renderer = TextRenderer::new();
    let first = harness.switcher.render(0, &renderer, None);
    let recycled = harness.switcher.render(0, &renderer, Some(first));
    assert_eq!(recycled, "Inbox / user1@example.com");
}

#[test]
fn test_unread_zero_renders_without_count() {
    let harness = setup();
    harness.switcher.set_accounts(vec![make_account(1)]);
    harness.accounts.set_current(make_account(1));

    // No unread data at all: the count element stays hidden
    let renderer = TextRenderer::new();
    assert_eq!(harness.switcher.render(0, &renderer, None), "Inbox / user1@example.com");

    let formatter = DefaultCountFormatter::default();
    assert_eq!(formatter.format_unread(0), "");
    assert_eq!(formatter.format_unread(5), "5");
    assert_eq!(formatter.format_unread(1234), "999+");
}

#[test]
fn test_switching_folders_rebuilds_recents() {
    let harness = setup();
    let switcher = &harness.switcher;
    switcher.set_accounts(vec![make_account(1)]);
    switcher.enable_recent_folders();

    harness.recents.touch(make_folder("sent", 0));
    harness.recents.touch(make_folder("outbox", 0));

    // Viewing "sent" hides it from its own recent list
    assert!(switcher.set_current_folder(&make_folder("sent", 0)));
    let names: Vec<String> = (0..switcher.count())
        .filter_map(|p| match switcher.item(p) {
            Item::RecentFolder(folder) => Some(folder.name),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["outbox"]);

    // Moving on to "outbox" brings "sent" back
    assert!(switcher.set_current_folder(&make_folder("outbox", 0)));
    let names: Vec<String> = (0..switcher.count())
        .filter_map(|p| match switcher.item(p) {
            Item::RecentFolder(folder) => Some(folder.name),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["sent"]);
}

#[test]
fn test_disable_collapses_to_accounts() {
    let harness = setup();
    let switcher = &harness.switcher;
    switcher.set_accounts(vec![make_account(1), make_account(2)]);
    switcher.enable_recent_folders();
    harness.recents.touch(make_folder("sent", 0));
    assert!(switcher.count() > 2);

    switcher.disable_recent_folders();
    assert_eq!(switcher.count(), 2);
    assert!(!switcher.has_recent_folders());

    // Further visits while disabled do not resurrect the section
    harness.recents.touch(make_folder("outbox", 0));
    assert_eq!(switcher.count(), 2);
}

#[test]
fn test_notifications_before_data_are_harmless() {
    let harness = setup();

    // No accounts, no folder, nothing enabled: events arrive anyway
    harness.recents.touch(make_folder("sent", 0));
    harness
        .unread
        .set_folder(make_folder("inbox", 3));
    harness.accounts.set_current(make_account(1));

    assert_eq!(harness.switcher.count(), 0);
    assert_eq!(
        harness.switcher.current_account().unwrap().uri,
        make_account(1).uri
    );
}

#[test]
fn test_teardown_end_to_end() {
    let harness = setup();
    let switcher = &harness.switcher;
    switcher.set_accounts(vec![make_account(1)]);
    switcher.enable_recent_folders();

    switcher.destroy();
    let redraws = harness.redraws.load(Ordering::SeqCst);

    // Every source notification is now inert
    harness.accounts.set_current(make_account(2));
    harness.recents.touch(make_folder("sent", 0));
    harness
        .unread
        .set_folder(make_folder("inbox", 1));
    assert_eq!(harness.redraws.load(Ordering::SeqCst), redraws);

    // destroy stays idempotent after a disable as well
    switcher.disable_recent_folders();
    switcher.destroy();
}
