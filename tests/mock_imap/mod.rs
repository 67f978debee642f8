//! Scripted in-memory transport for adapter tests.
//!
//! Plays the role of the blocking IMAP connection: tests script
//! folders, structures, and part content through `MockImapBuilder`,
//! then inspect call counters and stored flags through handles that
//! survive moving the transport into the session.

use mailcore_imap::{
    CapabilitySet, ImapTransport, SelectSummary, StoreAction, StructureNode, TransportResult,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn transport_err(msg: impl Into<String>) -> Box<dyn std::error::Error + Send + Sync> {
    msg.into().into()
}

/// One scripted folder.
struct FolderFixture {
    uids: Vec<u32>,
    recent: u32,
    uid_validity: u32,
}

/// Call counters shared with the test after the transport moves into
/// the session.
#[derive(Default)]
pub struct Counters {
    pub selects: AtomicUsize,
    pub uid_searches: AtomicUsize,
    pub structure_fetches: AtomicUsize,
    pub part_fetches: AtomicUsize,
}

impl Counters {
    pub fn selects(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn uid_searches(&self) -> usize {
        self.uid_searches.load(Ordering::SeqCst)
    }

    pub fn structure_fetches(&self) -> usize {
        self.structure_fetches.load(Ordering::SeqCst)
    }

    pub fn part_fetches(&self) -> usize {
        self.part_fetches.load(Ordering::SeqCst)
    }
}

type StoreLog = Vec<(u32, StoreAction, Vec<String>)>;

pub struct MockImap {
    folders: HashMap<String, FolderFixture>,
    structures: HashMap<u32, StructureNode>,
    parts: HashMap<(u32, String), Vec<u8>>,
    capabilities: CapabilitySet,
    selected: Option<String>,
    counters: Arc<Counters>,
    stored: Arc<Mutex<StoreLog>>,
}

impl MockImap {
    pub fn builder() -> MockImapBuilder {
        MockImapBuilder::default()
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    pub fn store_log(&self) -> Arc<Mutex<StoreLog>> {
        Arc::clone(&self.stored)
    }

    fn selected_fixture(&self) -> TransportResult<&FolderFixture> {
        let name = self
            .selected
            .as_ref()
            .ok_or_else(|| transport_err("BAD no folder selected"))?;
        self.folders
            .get(name)
            .ok_or_else(|| transport_err("BAD selected folder vanished"))
    }

    fn matching_uids(&self, criteria: &[String]) -> TransportResult<Vec<u32>> {
        // Reject a leaked mode keyword the way a real server would
        // not: by failing loudly instead of matching everything.
        if criteria.iter().any(|t| t.eq_ignore_ascii_case("UID")) {
            return Err(transport_err("mode keyword found among search terms"));
        }

        let fixture = self.selected_fixture()?;
        if criteria.len() == 1 && criteria[0] == "ALL" {
            return Ok(fixture.uids.clone());
        }

        // Single range token: "low:high" or "low:*".
        let token = criteria
            .first()
            .ok_or_else(|| transport_err("empty search criteria"))?;
        let (low, high) = token
            .split_once(':')
            .ok_or_else(|| transport_err(format!("unsupported criteria {criteria:?}")))?;
        let low: u32 = low
            .parse()
            .map_err(|e: std::num::ParseIntError| transport_err(e.to_string()))?;
        let high: Option<u32> = if high == "*" {
            None
        } else {
            Some(
                high.parse()
                    .map_err(|e: std::num::ParseIntError| transport_err(e.to_string()))?,
            )
        };

        Ok(fixture
            .uids
            .iter()
            .copied()
            .filter(|uid| *uid >= low && high.is_none_or(|h| *uid <= h))
            .collect())
    }
}

impl ImapTransport for MockImap {
    fn select(&mut self, folder: &str) -> TransportResult<SelectSummary> {
        self.counters.selects.fetch_add(1, Ordering::SeqCst);
        match self.folders.get(folder) {
            Some(fixture) => {
                self.selected = Some(folder.to_string());
                Ok(SelectSummary {
                    exists: u32::try_from(fixture.uids.len()).unwrap(),
                    recent: fixture.recent,
                    uid_validity: fixture.uid_validity,
                })
            }
            None => Err(transport_err(format!(
                "SELECT failed: mailbox {folder} does not exist"
            ))),
        }
    }

    fn uid_search(&mut self, criteria: &[String]) -> TransportResult<Vec<u32>> {
        self.counters.uid_searches.fetch_add(1, Ordering::SeqCst);
        self.matching_uids(criteria)
    }

    fn search(&mut self, criteria: &[String]) -> TransportResult<Vec<u32>> {
        // Sequence-number mode: positions within the folder, 1-based.
        let matched = self.matching_uids(criteria)?;
        let fixture = self.selected_fixture()?;
        Ok(fixture
            .uids
            .iter()
            .enumerate()
            .filter(|(_, uid)| matched.contains(uid))
            .map(|(i, _)| u32::try_from(i + 1).unwrap())
            .collect())
    }

    fn fetch_structure(&mut self, uid: u32) -> TransportResult<StructureNode> {
        self.counters.structure_fetches.fetch_add(1, Ordering::SeqCst);
        self.selected_fixture()?;
        self.structures
            .get(&uid)
            .cloned()
            .ok_or_else(|| transport_err(format!("no such message {uid}")))
    }

    fn fetch_parts(
        &mut self,
        uid: u32,
        part_ids: &[String],
    ) -> TransportResult<Vec<Option<Vec<u8>>>> {
        self.counters.part_fetches.fetch_add(1, Ordering::SeqCst);
        self.selected_fixture()?;
        Ok(part_ids
            .iter()
            .map(|id| self.parts.get(&(uid, id.clone())).cloned())
            .collect())
    }

    fn store_flags(
        &mut self,
        uid: u32,
        action: StoreAction,
        flags: &[String],
    ) -> TransportResult<()> {
        self.selected_fixture()?;
        self.stored
            .lock()
            .unwrap()
            .push((uid, action, flags.to_vec()));
        Ok(())
    }

    fn capabilities(&self) -> CapabilitySet {
        self.capabilities.clone()
    }
}

#[derive(Default)]
pub struct MockImapBuilder {
    folders: HashMap<String, FolderFixture>,
    structures: HashMap<u32, StructureNode>,
    parts: HashMap<(u32, String), Vec<u8>>,
    capabilities: CapabilitySet,
}

impl MockImapBuilder {
    pub fn folder(mut self, name: &str, uids: &[u32]) -> Self {
        self.folders.insert(
            name.to_string(),
            FolderFixture {
                uids: uids.to_vec(),
                recent: 0,
                uid_validity: 1,
            },
        );
        self
    }

    pub fn folder_with_validity(mut self, name: &str, uids: &[u32], uid_validity: u32) -> Self {
        self.folders.insert(
            name.to_string(),
            FolderFixture {
                uids: uids.to_vec(),
                recent: 0,
                uid_validity,
            },
        );
        self
    }

    pub fn structure(mut self, uid: u32, root: StructureNode) -> Self {
        self.structures.insert(uid, root);
        self
    }

    pub fn part(mut self, uid: u32, part_id: &str, content: &[u8]) -> Self {
        self.parts.insert((uid, part_id.to_string()), content.to_vec());
        self
    }

    pub fn capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn build(self) -> MockImap {
        MockImap {
            folders: self.folders,
            structures: self.structures,
            parts: self.parts,
            capabilities: self.capabilities,
            selected: None,
            counters: Arc::new(Counters::default()),
            stored: Arc::new(Mutex::new(Vec::new())),
        }
    }
}
