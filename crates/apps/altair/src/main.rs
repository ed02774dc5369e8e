//! Altair - terminal preview of the account/folder dropdown
//!
//! Wires the in-memory sources to the switcher adapter, renders the
//! dropdown as plain text, and replays a short session (folder visits,
//! unread updates, an account switch) so every notification path is
//! exercised end to end.

use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use switcher::{
    Account, AccountSettings, AccountSwitcher, AccountUri, CountFormatter, DefaultCountFormatter,
    Folder, FolderUri, InMemoryAccountSource, InMemoryRecentFolders, InMemoryUnreadCounts,
    RowContent, RowRenderer, SwitcherSettings,
};

/// Renders each row as one line of text
struct TextRenderer {
    formatter: DefaultCountFormatter,
}

impl TextRenderer {
    fn new(unread_count_cap: u32) -> Self {
        Self {
            formatter: DefaultCountFormatter::new(unread_count_cap),
        }
    }

    fn count_suffix(&self, count: u32) -> String {
        let formatted = self.formatter.format_unread(count);
        if formatted.is_empty() {
            formatted
        } else {
            format!("  [{formatted}]")
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
                line.push_str("  ");
                if let Some(primary) = &row.primary {
                    line.push_str(primary);
                }
                if let Some(secondary) = &row.secondary {
                    line.push_str(&format!("  <{secondary}>"));
                }
                line.push_str(&self.count_suffix(row.unread_count));
            }
            RowContent::Header(row) => {
                line.push_str("── ");
                if let Some(title) = &row.title {
                    line.push_str(title);
                    line.push(' ');
                }
                line.push_str("──");
            }
            RowContent::RecentFolder(row) => {
                line.push_str("  ");
                if let Some(name) = &row.name {
                    line.push_str(name);
                }
                line.push_str(&self.count_suffix(row.unread_count));
            }
            RowContent::AllFolders => line.push_str("  Show all folders…"),
        }
        line
    }
}

fn make_account(n: u32, name: &str) -> Result<Account> {
    let settings = AccountSettings::new(
        FolderUri::parse(&format!("vega://accounts/{n}/folders/inbox"))?,
        "Inbox",
    );
    Ok(Account::new(
        AccountUri::parse(&format!("vega://accounts/{n}"))?,
        name,
        settings,
    )
    .with_color(0xFF3366AA + n * 0x1111))
}

fn make_folder(account: u32, slug: &str, unread: u32) -> Result<Folder> {
    Ok(Folder::new(
        FolderUri::parse(&format!("vega://accounts/{account}/folders/{slug}"))?,
        slug,
    )
    .with_unread_count(unread)
    .with_block_color(0xFF808080))
}

fn print_dropdown(switcher: &AccountSwitcher, renderer: &TextRenderer, caption: &str) {
    println!("{caption}");
    for position in 0..switcher.count() {
        let marker = if switcher.is_enabled(position) { ' ' } else { '·' };
        let line = switcher.render(position, renderer, None);
        println!("{marker}{line}");
    }
    println!();
}

fn run() -> Result<()> {
    config::init()?;
    let settings = SwitcherSettings::load();
    info!("dropdown settings: {settings:?}");

    let accounts = Arc::new(InMemoryAccountSource::new());
    let recents = Arc::new(InMemoryRecentFolders::new(settings.max_recent_folders));
    let unread = Arc::new(InMemoryUnreadCounts::new());
    let switcher = AccountSwitcher::new(
        accounts.clone(),
        recents.clone(),
        unread.clone(),
        &settings,
    );
    switcher.changes().subscribe(|()| {
        info!("dropdown changed, host would redraw");
    });

    let renderer = TextRenderer::new(settings.unread_count_cap);

    // Two accounts appear; the first becomes current
    switcher.set_accounts(vec![
        make_account(1, "fifi@example.com")?,
        make_account(2, "work@example.org")?,
    ]);
    accounts.set_current(make_account(1, "fifi@example.com")?);
    print_dropdown(&switcher, &renderer, "Accounts only:");

    // Unread counts come in for both inboxes
    unread.set_folder(make_folder(1, "inbox", 4)?);
    unread.set_folder(make_folder(2, "inbox", 1250)?);
    print_dropdown(&switcher, &renderer, "With unread counts:");

    // The user browses a few folders; the dropdown gains its folder section
    switcher.enable_recent_folders();
    for (slug, unread_count) in [("archive", 0), ("outbox", 2), ("sent", 0)] {
        recents.touch(make_folder(1, slug, unread_count)?);
    }
    switcher.set_current_folder(&make_folder(1, "inbox", 4)?);
    print_dropdown(&switcher, &renderer, "With recent folders:");

    // Switching accounts recomputes the folder section
    accounts.set_current(make_account(2, "work@example.org")?);
    print_dropdown(&switcher, &renderer, "After switching accounts:");

    switcher.destroy();
    Ok(())
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run() {
        error!("altair failed: {e:#}");
        std::process::exit(1);
    }
}
