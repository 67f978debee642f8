//! Adapter session: folder-selection cache and domain operations
//!
//! [`ImapSession`] owns one blocking transport connection and exposes
//! the async surface the mail domain layer expects. The async-ness is
//! a scheduling accommodation only: every operation runs its blocking
//! protocol round trips on a `spawn_blocking` worker thread. It does
//! NOT make the transport non-blocking, and throughput stays that of
//! one synchronous connection.
//!
//! The protocol session has exactly one "currently selected folder",
//! so a select-then-use sequence is a critical section. The transport
//! and the selection cache live behind one mutex that is held for the
//! whole sequence on the worker thread, which enforces the required
//! single-writer discipline. Separate sessions are independent.

use crate::capability::{Capability, CapabilitySet};
use crate::error::{Error, Result, classify_select_failure};
use crate::flag::FlagSet;
use crate::folder::Folder;
use crate::query::{SearchCriterion, UidBound};
use crate::structure::resolve;
use crate::transport::{ImapTransport, StoreAction};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task;
use tracing::{debug, info, warn};

/// State of the currently selected folder, as reported by SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderState {
    pub folder: String,
    pub message_count: u32,
    pub recent_count: u32,
    /// UIDVALIDITY: changes when the folder's UID assignment is
    /// reset, invalidating any cached UID-based state.
    pub uid_validity: u32,
}

/// Body content of a message, keyed by representation.
///
/// Both fields `None` means the message has no renderable body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub text: Option<String>,
    pub html: Option<String>,
}

impl MessageBody {
    /// True when no textual representation was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.html.is_none()
    }
}

/// Cache entry for the session's selected folder.
struct SelectedFolder {
    state: FolderState,
    /// Only `true` while the last SELECT (for any folder) succeeded.
    valid: bool,
}

struct SessionInner<T> {
    transport: T,
    selected: Option<SelectedFolder>,
}

impl<T: ImapTransport> SessionInner<T> {
    /// Select `folder` unless it is already the valid cached
    /// selection.
    ///
    /// On any SELECT failure the cache entry is unconditionally
    /// invalidated before the error is raised: one bad access must
    /// not leave a later, unrelated operation believing an old folder
    /// is still selected.
    fn ensure_selected(&mut self, folder: &Folder) -> Result<FolderState> {
        if let Some(selected) = &self.selected
            && selected.valid
            && selected.state.folder == folder.as_str()
        {
            debug!(%folder, "SELECT skipped, folder already selected");
            return Ok(selected.state.clone());
        }

        debug!(%folder, "issuing SELECT");
        match self.transport.select(folder.as_str()) {
            Ok(summary) => {
                let state = FolderState {
                    folder: folder.as_str().to_string(),
                    message_count: summary.exists,
                    recent_count: summary.recent,
                    uid_validity: summary.uid_validity,
                };
                self.selected = Some(SelectedFolder {
                    state: state.clone(),
                    valid: true,
                });
                info!(%folder, exists = state.message_count, "folder selected");
                Ok(state)
            }
            Err(cause) => {
                // Unknown failures are untrusted state.
                self.selected = None;
                warn!(%folder, error = %cause, "SELECT failed, selection cache invalidated");
                Err(classify_select_failure(folder.as_str(), cause))
            }
        }
    }

    fn search_uids(
        &mut self,
        folder: &Folder,
        criterion: &SearchCriterion,
        uid_mode: bool,
    ) -> Result<Vec<u32>> {
        self.ensure_selected(folder)?;
        let tokens = criterion.tokens();
        let mut uids = if uid_mode {
            self.transport.uid_search(&tokens)
        } else {
            self.transport.search(&tokens)
        }
        .map_err(Error::protocol)?;
        // Servers return matches in arbitrary order.
        uids.sort_unstable();
        debug!(%folder, matches = uids.len(), "search completed");
        Ok(uids)
    }

    /// Two round trips, exactly: one BODYSTRUCTURE fetch to locate
    /// the textual parts, one partial fetch for the resolved ids.
    fn fetch_body(&mut self, folder: &Folder, uid: u32) -> Result<MessageBody> {
        self.ensure_selected(folder)?;

        let root = self
            .transport
            .fetch_structure(uid)
            .map_err(Error::protocol)?;
        let parts = resolve(&root);
        if parts.is_empty() {
            debug!(%folder, uid, "message has no renderable body");
            return Ok(MessageBody::default());
        }

        let part_ids: Vec<String> = parts.iter().map(|p| p.part_id.clone()).collect();
        let contents = self
            .transport
            .fetch_parts(uid, &part_ids)
            .map_err(Error::protocol)?;

        let mut body = MessageBody::default();
        for (descriptor, content) in parts.iter().zip(contents) {
            let Some(bytes) = content else { continue };
            let decoded = String::from_utf8_lossy(&bytes).into_owned();
            if descriptor.is_html() {
                body.html = Some(decoded);
            } else {
                body.text = Some(decoded);
            }
        }
        Ok(body)
    }

    fn store_flags(
        &mut self,
        folder: &Folder,
        uid: u32,
        action: StoreAction,
        flags: &[String],
    ) -> Result<()> {
        self.ensure_selected(folder)?;
        self.transport
            .store_flags(uid, action, flags)
            .map_err(Error::protocol)
    }
}

/// One adapter session over one blocking transport connection.
///
/// Deliberately not `Clone`: a session maps one-to-one onto one
/// protocol connection and its single selected-folder fact.
pub struct ImapSession<T: ImapTransport> {
    inner: Arc<Mutex<SessionInner<T>>>,
    capabilities: CapabilitySet,
}

impl<T: ImapTransport + 'static> ImapSession<T> {
    /// Wrap an authenticated transport connection.
    ///
    /// The session's capability set is what the transport advertises
    /// minus IDLE: the blocking offload model cannot hold a
    /// continuation open, so push notifications are never drivable
    /// here regardless of what the server offers.
    pub fn new(transport: T) -> Self {
        let capabilities = transport.capabilities().without(Capability::Idle);
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                transport,
                selected: None,
            })),
            capabilities,
        }
    }

    /// Capabilities usable through this session.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Run one select-then-use sequence on a blocking worker thread,
    /// holding the session mutex for its whole duration.
    async fn run_blocking<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&mut SessionInner<T>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        task::spawn_blocking(move || {
            let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
            op(&mut guard)
        })
        .await
        .map_err(Error::protocol)?
    }

    /// Select a folder, using the session cache when it is already
    /// the valid current selection.
    ///
    /// # Errors
    ///
    /// [`Error::FolderNotFound`] when the server reports a missing
    /// mailbox, [`Error::Protocol`] for any other SELECT failure.
    pub async fn select_folder(&self, folder: impl Into<Folder>) -> Result<FolderState> {
        let folder = folder.into();
        self.run_blocking(move |session| session.ensure_selected(&folder))
            .await
    }

    /// UIDs within `[low, high]` present in `folder`, ascending.
    ///
    /// Issues a UID-mode search with a single range token; the range
    /// criterion itself carries no mode keyword.
    ///
    /// # Errors
    ///
    /// Same as [`Self::select_folder`], plus [`Error::Protocol`] for
    /// search failures.
    pub async fn uid_range(
        &self,
        folder: impl Into<Folder>,
        low: u32,
        high: UidBound,
    ) -> Result<Vec<u32>> {
        let folder = folder.into();
        let criterion = SearchCriterion::uid_range(low, high);
        self.run_blocking(move |session| session.search_uids(&folder, &criterion, true))
            .await
    }

    /// General search with caller-supplied criteria, ascending ids.
    ///
    /// # Errors
    ///
    /// Same as [`Self::uid_range`].
    pub async fn search(
        &self,
        folder: impl Into<Folder>,
        criterion: SearchCriterion,
    ) -> Result<Vec<u32>> {
        let folder = folder.into();
        self.run_blocking(move |session| session.search_uids(&folder, &criterion, false))
            .await
    }

    /// Fetch the displayable body of one message.
    ///
    /// Costs exactly two round trips: one structure fetch, one part
    /// fetch for the resolved id(s). An empty [`MessageBody`] means
    /// the message has no textual representation.
    ///
    /// # Errors
    ///
    /// Same as [`Self::select_folder`], plus [`Error::Protocol`] for
    /// fetch failures.
    pub async fn fetch_message_body(
        &self,
        folder: impl Into<Folder>,
        uid: u32,
    ) -> Result<MessageBody> {
        let folder = folder.into();
        self.run_blocking(move |session| session.fetch_body(&folder, uid))
            .await
    }

    /// STORE flags on one message. Flag tokens are delegated to the
    /// transport unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`Self::select_folder`], plus [`Error::Protocol`] for
    /// store failures.
    pub async fn store_flags(
        &self,
        folder: impl Into<Folder>,
        uid: u32,
        action: StoreAction,
        flags: Vec<String>,
    ) -> Result<()> {
        let folder = folder.into();
        self.run_blocking(move |session| session.store_flags(&folder, uid, action, &flags))
            .await
    }

    /// Classify raw flag tokens into standard and custom sets.
    pub fn classify_flags<I, S>(tokens: I) -> FlagSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FlagSet::classify(tokens)
    }

    /// Enter IDLE mode.
    ///
    /// Always fails with [`Error::UnsupportedCapability`]: the
    /// blocking transport has no suspension point, so push
    /// notifications cannot be driven through this adapter. Callers
    /// relying on the failure to pick a polling code path get a
    /// deterministic error, never a silent no-op.
    ///
    /// # Errors
    ///
    /// Always `UnsupportedCapability { feature: "idle", .. }`.
    pub async fn idle_start(&self) -> Result<()> {
        self.capabilities.require(Capability::Idle)
    }

    /// Wait for an IDLE notification. See [`Self::idle_start`].
    ///
    /// # Errors
    ///
    /// Always `UnsupportedCapability { feature: "idle", .. }`.
    pub async fn idle_wait(&self) -> Result<()> {
        self.capabilities.require(Capability::Idle)
    }

    /// Leave IDLE mode. See [`Self::idle_start`].
    ///
    /// # Errors
    ///
    /// Always `UnsupportedCapability { feature: "idle", .. }`.
    pub async fn idle_done(&self) -> Result<()> {
        self.capabilities.require(Capability::Idle)
    }
}
