//! Blocking IMAP transport abstraction
//!
//! The adapter does not own a socket. It drives any implementor of
//! [`ImapTransport`]: a strictly synchronous, call-and-block wrapper
//! around the wire protocol. Every method blocks the calling thread
//! until the server answers; the session layer is responsible for
//! keeping those calls off async executor threads.
//!
//! Transport failures are opaque. Implementors return whatever error
//! type they like boxed as [`TransportError`]; the adapter only ever
//! inspects the display text.

use crate::capability::CapabilitySet;
use crate::error::TransportError;
use crate::structure::StructureNode;

/// Result alias for transport primitives.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Untagged data returned by a successful SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectSummary {
    /// EXISTS count: number of messages in the folder.
    pub exists: u32,
    /// RECENT count.
    pub recent: u32,
    /// UIDVALIDITY token. Changes when UID assignment is reset.
    pub uid_validity: u32,
}

/// Direction of a flag STORE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    /// `+FLAGS`: add the given flags.
    Add,
    /// `-FLAGS`: remove the given flags.
    Remove,
}

/// A synchronous IMAP transport.
///
/// One value of this trait represents one authenticated protocol
/// session, with its single server-side "currently selected folder".
/// All methods block until the server responds.
pub trait ImapTransport: Send {
    /// SELECT a folder, making it the session's current folder.
    fn select(&mut self, folder: &str) -> TransportResult<SelectSummary>;

    /// UID SEARCH over the currently selected folder.
    ///
    /// `criteria` are raw search tokens; the UID-mode keyword is
    /// implied by this primitive and must not appear among them.
    fn uid_search(&mut self, criteria: &[String]) -> TransportResult<Vec<u32>>;

    /// Plain SEARCH (sequence-number mode) over the selected folder.
    fn search(&mut self, criteria: &[String]) -> TransportResult<Vec<u32>>;

    /// Fetch the BODYSTRUCTURE of one message as a parsed part tree.
    fn fetch_structure(&mut self, uid: u32) -> TransportResult<StructureNode>;

    /// Fetch the raw content of the given body parts in one round
    /// trip. The result is aligned with `part_ids`; a missing part
    /// yields `None` at its position.
    ///
    /// An empty `part_id` means the whole body.
    fn fetch_parts(
        &mut self,
        uid: u32,
        part_ids: &[String],
    ) -> TransportResult<Vec<Option<Vec<u8>>>>;

    /// STORE flags on one message. Flag tokens are passed through to
    /// the wire unchanged.
    fn store_flags(
        &mut self,
        uid: u32,
        action: StoreAction,
        flags: &[String],
    ) -> TransportResult<()>;

    /// Extensions advertised by the server for this connection.
    fn capabilities(&self) -> CapabilitySet;
}
