//! Dropdown settings
//!
//! Loaded from `switcher.json` in the Vega config directory. Every field
//! has a default, so a missing or partial file is fine.

use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings filename in the Vega config directory
const SETTINGS_FILE: &str = "switcher.json";

/// Presentation settings for the account/folder dropdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitcherSettings {
    /// Whether the trailing "show all folders" row is offered
    #[serde(default = "default_show_all_folders")]
    pub show_all_folders: bool,
    /// Cap on the number of recent folders shown
    #[serde(default = "default_max_recent_folders")]
    pub max_recent_folders: usize,
    /// Unread counts above this render as "cap+"
    #[serde(default = "default_unread_count_cap")]
    pub unread_count_cap: u32,
}

fn default_show_all_folders() -> bool {
    true
}

fn default_max_recent_folders() -> usize {
    5
}

fn default_unread_count_cap() -> u32 {
    999
}

impl Default for SwitcherSettings {
    fn default() -> Self {
        Self {
            show_all_folders: default_show_all_folders(),
            max_recent_folders: default_max_recent_folders(),
            unread_count_cap: default_unread_count_cap(),
        }
    }
}

impl SwitcherSettings {
    /// Load settings from the Vega config directory, with defaults when
    /// the file is absent
    ///
    /// A file that exists but cannot be parsed logs a warning and falls
    /// back to defaults rather than failing the hosting screen.
    pub fn load() -> Self {
        match config::load_json_or_default(SETTINGS_FILE) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Falling back to default dropdown settings: {e:#}");
                Self::default()
            }
        }
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Save settings to the Vega config directory
    pub fn save(&self) -> Result<()> {
        config::save_json(SETTINGS_FILE, self)
    }
}
