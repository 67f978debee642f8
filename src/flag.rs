//! IMAP message flags
//!
//! Provides a strongly-typed enum for the standard IMAP system flags
//! instead of raw strings, plus the classifier that splits a raw flag
//! list into standard and custom keyword sets.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A standard IMAP system flag (`\`-prefixed on the wire).
///
/// Keyword flags without a dedicated variant are kept as strings in
/// [`FlagSet::custom`].
///
/// # Examples
///
/// ```
/// use mailcore_imap::Flag;
///
/// let seen = Flag::Seen;
/// assert_eq!(seen.as_imap_str(), "\\Seen");
/// assert_eq!(Flag::from_imap("\\SEEN"), Some(Flag::Seen));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Flag {
    /// Message has been read (`\Seen`).
    Seen,
    /// Message has been answered (`\Answered`).
    Answered,
    /// Message is flagged for attention (`\Flagged`).
    Flagged,
    /// Message is marked for deletion (`\Deleted`).
    Deleted,
    /// Message is a draft (`\Draft`).
    Draft,
    /// Message is new to this session (`\Recent`).
    Recent,
}

/// All standard system flags, in canonical order.
const STANDARD_FLAGS: [Flag; 6] = [
    Flag::Seen,
    Flag::Answered,
    Flag::Flagged,
    Flag::Deleted,
    Flag::Draft,
    Flag::Recent,
];

impl Flag {
    /// The IMAP wire representation of this flag, including the
    /// leading backslash.
    #[must_use]
    pub const fn as_imap_str(self) -> &'static str {
        match self {
            Self::Seen => "\\Seen",
            Self::Answered => "\\Answered",
            Self::Flagged => "\\Flagged",
            Self::Deleted => "\\Deleted",
            Self::Draft => "\\Draft",
            Self::Recent => "\\Recent",
        }
    }

    /// Parse a raw wire token into a standard flag.
    ///
    /// Matching is case-insensitive; anything that is not one of the
    /// six system flags (including non-backslash keywords like
    /// `$Forwarded`) yields `None`.
    #[must_use]
    pub fn from_imap(token: &str) -> Option<Self> {
        STANDARD_FLAGS
            .into_iter()
            .find(|flag| token.eq_ignore_ascii_case(flag.as_imap_str()))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_imap_str())
    }
}

/// Classified message flags: standard system flags plus custom
/// keywords, disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    /// Standard system flags, case-normalized.
    pub standard: HashSet<Flag>,
    /// Keyword flags with no dedicated variant, original casing
    /// preserved.
    pub custom: HashSet<String>,
}

impl FlagSet {
    /// Split raw wire flag tokens into standard and custom sets.
    ///
    /// Standard flags are matched case-insensitively; unmatched tokens
    /// are retained verbatim as custom keywords. No token lands in
    /// both sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailcore_imap::{Flag, FlagSet};
    ///
    /// let set = FlagSet::classify(["\\Seen", "$Forwarded"]);
    /// assert!(set.standard.contains(&Flag::Seen));
    /// assert!(set.custom.contains("$Forwarded"));
    /// ```
    pub fn classify<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for token in tokens {
            let token = token.as_ref();
            match Flag::from_imap(token) {
                Some(flag) => {
                    set.standard.insert(flag);
                }
                None => {
                    set.custom.insert(token.to_string());
                }
            }
        }
        set
    }
}
