//! Data-source traits and implementations
//!
//! This module defines the seams between the adapter and its host: where
//! the current account comes from, how recent folders are ranked, and who
//! keeps unread counts fresh. The trait-based design lets tests and the
//! preview app run entirely on the in-memory implementations.

mod memory;
mod traits;

pub use memory::{InMemoryAccountSource, InMemoryRecentFolders, InMemoryUnreadCounts};
pub use traits::{AccountSource, RecentFolderSource, UnreadCountSource};
