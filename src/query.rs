//! IMAP search criteria
//!
//! Builds the token sequences handed to the transport's search
//! primitives. The UID-range form deliberately emits only the range
//! expression: the UID-mode keyword is selected by calling
//! [`ImapTransport::uid_search`](crate::ImapTransport::uid_search),
//! never embedded in the criterion. A stray `UID` token would be read
//! by the server as a search term and silently turn a bounded query
//! into "match everything".

use chrono::NaiveDate;
use serde::Serialize;

/// Upper bound of a UID range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UidBound {
    /// Inclusive upper bound.
    At(u32),
    /// The protocol wildcard `*`: no upper bound.
    Unbounded,
}

/// A search criterion ready for tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SearchCriterion {
    /// A single UID range, `low:high` or `low:*`.
    UidRange { low: u32, high: UidBound },
    /// Caller-supplied search terms, passed through unchanged.
    RawTerms(Vec<String>),
}

impl SearchCriterion {
    /// Criterion matching UIDs in `[low, high]` (both inclusive).
    #[must_use]
    pub const fn uid_range(low: u32, high: UidBound) -> Self {
        Self::UidRange { low, high }
    }

    /// Pass-through criterion wrapping caller-supplied terms.
    pub fn raw<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RawTerms(terms.into_iter().map(Into::into).collect())
    }

    /// Criterion for messages received in `[since, before)`.
    ///
    /// IMAP semantics: SINCE matches dates >= `since`, BEFORE matches
    /// dates < `before`. Dates use the protocol's `d-MMM-yyyy` form.
    #[must_use]
    pub fn date_range(since: NaiveDate, before: NaiveDate) -> Self {
        Self::RawTerms(vec![
            "SINCE".to_string(),
            since.format("%-d-%b-%Y").to_string(),
            "BEFORE".to_string(),
            before.format("%-d-%b-%Y").to_string(),
        ])
    }

    /// The wire tokens for this criterion.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::UidRange { low, high } => {
                let range = match high {
                    UidBound::At(high) => format!("{low}:{high}"),
                    UidBound::Unbounded => format!("{low}:*"),
                };
                vec![range]
            }
            Self::RawTerms(terms) => terms.clone(),
        }
    }
}
