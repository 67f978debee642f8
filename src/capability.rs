//! IMAP capability model
//!
//! Capabilities a transport connection may advertise, as a tagged
//! variant rather than raw strings. Stub operations consult the
//! session's [`CapabilitySet`] and fail explicitly when a capability
//! is absent, instead of raising ad hoc per operation.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;

/// A protocol extension the adapter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    /// RFC 2177 IDLE: server-pushed mailbox change notifications.
    Idle,
    /// RFC 6851 MOVE.
    Move,
    /// RFC 4315 UIDPLUS.
    UidPlus,
}

impl Capability {
    /// Stable feature name used in error reporting.
    #[must_use]
    pub const fn feature(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::UidPlus => "uidplus",
        }
    }

    /// What a caller should do instead when this capability is
    /// unavailable.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Idle => "use a transport supporting asynchronous push notifications",
            Self::Move => "fall back to COPY followed by STORE \\Deleted and EXPUNGE",
            Self::UidPlus => "re-list the destination folder to discover new UIDs",
        }
    }
}

/// The set of capabilities usable through one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    supported: HashSet<Capability>,
}

impl CapabilitySet {
    /// An empty set: nothing beyond the base protocol.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, cap: Capability) -> Self {
        self.supported.insert(cap);
        self
    }

    /// Remove a capability, e.g. one the adapter cannot drive even
    /// when the server advertises it.
    #[must_use]
    pub fn without(mut self, cap: Capability) -> Self {
        self.supported.remove(&cap);
        self
    }

    #[must_use]
    pub fn supports(&self, cap: Capability) -> bool {
        self.supported.contains(&cap)
    }

    /// Fail with [`Error::UnsupportedCapability`] unless `cap` is
    /// present.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedCapability` naming the feature and a hint
    /// when the capability is absent.
    pub fn require(&self, cap: Capability) -> Result<()> {
        if self.supports(cap) {
            Ok(())
        } else {
            Err(Error::UnsupportedCapability {
                feature: cap.feature(),
                hint: cap.hint(),
            })
        }
    }
}
