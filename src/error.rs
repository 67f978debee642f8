//! Error types for mailcore-imap
//!
//! The adapter exposes a small, fixed taxonomy to the domain layer.
//! Transport failures are never discarded: every variant that wraps
//! one carries it as a `source` so the causal chain survives into
//! diagnostics.

use thiserror::Error;

/// Opaque failure raised by the underlying transport.
///
/// The transport is a black box; all the adapter may rely on is the
/// error's display text (for heuristic classification) and its place
/// in the source chain.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    /// The requested folder does not exist on the server.
    ///
    /// Recoverable by the caller, e.g. by retrying with a different
    /// folder name.
    #[error("folder not found: {folder}")]
    FolderNotFound {
        folder: String,
        #[source]
        source: TransportError,
    },

    /// Any other transport-level failure, including timeouts.
    ///
    /// Generally fatal for the current operation; retry policy is a
    /// caller concern.
    #[error("IMAP protocol error")]
    Protocol {
        #[source]
        source: TransportError,
    },

    /// A protocol extension this adapter configuration cannot drive.
    ///
    /// Permanent for this adapter; the hint points the caller at an
    /// alternative.
    #[error("unsupported capability `{feature}`: {hint}")]
    UnsupportedCapability {
        feature: &'static str,
        hint: &'static str,
    },

    /// Configuration error (missing or malformed environment values).
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn protocol(source: impl Into<TransportError>) -> Self {
        Self::Protocol {
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Substrings (matched against lowercased failure text) that identify
/// a missing-mailbox SELECT failure across common server dialects.
///
/// Heuristic: server phrasings vary, and this list is not exhaustive.
/// A miss falls back to [`Error::Protocol`], never to a wrong
/// `FolderNotFound`.
const FOLDER_NOT_FOUND_MARKERS: &[&str] = &[
    "nonexistent namespace",
    "does not exist",
    "no such mailbox",
];

/// Classify a failed SELECT into a domain error.
///
/// The transport failure text decides the variant; the failure itself
/// is chained as the source either way.
#[must_use]
pub fn classify_select_failure(folder: &str, cause: TransportError) -> Error {
    let text = cause.to_string().to_lowercase();
    if FOLDER_NOT_FOUND_MARKERS.iter().any(|m| text.contains(m)) {
        Error::FolderNotFound {
            folder: folder.to_string(),
            source: cause,
        }
    } else {
        Error::Protocol { source: cause }
    }
}
