//! URI identity newtypes for accounts and folders
//!
//! Every account and folder carries a URI as its canonical identity.
//! Equality of these newtypes is URL equality; nothing in this crate ever
//! compares entities by name or position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Canonical identity of an account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountUri(pub Url);

impl AccountUri {
    /// Parse an account URI from a string
    pub fn parse(s: &str) -> Result<Self, url::ParseError> {
        Ok(Self(Url::parse(s)?))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Url> for AccountUri {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl FromStr for AccountUri {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Canonical identity of a folder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderUri(pub Url);

impl FolderUri {
    /// Parse a folder URI from a string
    pub fn parse(s: &str) -> Result<Self, url::ParseError> {
        Ok(Self(Url::parse(s)?))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Url> for FolderUri {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl FromStr for FolderUri {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FolderUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
