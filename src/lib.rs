//! IMAP protocol adapter for a mail domain layer
//!
//! Translates the command/response model of a synchronous IMAP
//! transport into the semantics a higher-level mail abstraction
//! expects: search criterion construction, BODYSTRUCTURE resolution,
//! flag classification, per-session folder-selection caching, and a
//! precise domain error taxonomy.
//!
//! The transport is a black box behind [`ImapTransport`]; blocking
//! calls are offloaded to worker threads so the public surface can be
//! `async` without pretending to be non-blocking I/O.

mod capability;
mod config;
mod error;
mod flag;
mod folder;
mod query;
mod session;
mod structure;
mod transport;

pub use capability::{Capability, CapabilitySet};
pub use config::ImapConfig;
pub use error::{Error, Result, TransportError, classify_select_failure};
pub use flag::{Flag, FlagSet};
pub use folder::Folder;
pub use query::{SearchCriterion, UidBound};
pub use session::{FolderState, ImapSession, MessageBody};
pub use structure::{BodyPartDescriptor, StructureNode, resolve};
pub use transport::{ImapTransport, SelectSummary, StoreAction, TransportResult};
