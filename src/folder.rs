//! Folder names
//!
//! A SELECT target is a plain mailbox name on the wire, with one
//! protocol quirk: INBOX is required to exist and matches
//! case-insensitively, while every other name is exact. The
//! selection cache compares folder names to decide whether a SELECT
//! round trip can be skipped, so `"inbox"` and `"INBOX"` must
//! normalize to the same value — otherwise casing alone would defeat
//! the cache or, worse, trigger a redundant SELECT mid-sequence.

use serde::Serialize;
use std::fmt;

/// A mailbox name, normalized for use as a selection-cache key.
///
/// Only INBOX gets special treatment; any other name is handed to
/// SELECT exactly as the caller wrote it, including casing and
/// hierarchy delimiters.
///
/// # Examples
///
/// ```
/// use mailcore_imap::Folder;
///
/// assert_eq!(Folder::from("inbox"), Folder::Inbox);
/// assert_eq!(Folder::from("Archive/2024").as_str(), "Archive/2024");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Folder {
    /// The INBOX mailbox. All casings of `inbox` normalize here.
    Inbox,
    /// Any other mailbox, name passed to SELECT verbatim.
    Named(String),
}

impl Folder {
    /// The wire-level mailbox name for SELECT.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Inbox => "INBOX",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Folder {
    fn from(name: &str) -> Self {
        if name.eq_ignore_ascii_case("inbox") {
            Self::Inbox
        } else {
            Self::Named(name.to_string())
        }
    }
}

impl From<String> for Folder {
    fn from(name: String) -> Self {
        if name.eq_ignore_ascii_case("inbox") {
            Self::Inbox
        } else {
            Self::Named(name)
        }
    }
}
