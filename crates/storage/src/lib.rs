use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use shared::{
    domain::{FlowKind, WizardState},
    error::WizardError,
    protocol::{DraftRecord, DRAFT_FORMAT_VERSION},
};
use tracing::{debug, info, warn};

const MAX_SLOT_KEY_LEN: usize = 128;

/// A durable, string-valued key-value slot.
///
/// Access is synchronous and assumes a single writer; concurrent writers
/// overwrite each other (last writer wins).
pub trait DraftSlot {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local slot. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemorySlot {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DraftSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory slot lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory slot lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory slot lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Directory-backed slot: one `{key}.json` file per key.
#[derive(Debug, Clone)]
pub struct FileSlot {
    root: PathBuf,
}

impl FileSlot {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_root_dir_exists(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn health_check(&self) -> Result<()> {
        let metadata = fs::metadata(&self.root)
            .with_context(|| format!("draft directory '{}' is not accessible", self.root.display()))?;
        if !metadata.is_dir() {
            return Err(anyhow!("draft path '{}' is not a directory", self.root.display()));
        }
        if metadata.permissions().readonly() {
            return Err(anyhow!("draft directory '{}' is read-only", self.root.display()));
        }
        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_slot_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl DraftSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read draft file '{}'", path.display()))
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)
            .with_context(|| format!("failed to write draft file '{}'", staging.display()))?;
        fs::rename(&staging, &path).with_context(|| {
            format!(
                "failed to move '{}' into place at '{}'",
                staging.display(),
                path.display()
            )
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove draft file '{}'", path.display()))
            }
        }
    }
}

pub fn validate_slot_key(key: &str) -> Result<(), WizardError> {
    let well_formed = !key.is_empty()
        && key.len() <= MAX_SLOT_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(WizardError::InvalidSlotKey(key.to_string()))
    }
}

fn ensure_root_dir_exists(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(root)
        .with_context(|| format!("failed to create draft directory '{}'", root.display()))
}

/// Serializes in-progress wizard state to a [`DraftSlot`], one key per flow.
pub struct DraftStore<S> {
    slot: S,
}

impl<S: DraftSlot> DraftStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn try_save(&self, flow: FlowKind, state: &WizardState) -> Result<()> {
        let record = DraftRecord::from_state(flow, state, Utc::now());
        let raw = serde_json::to_string(&record).context("failed to encode draft")?;
        self.slot
            .write(flow.draft_key(), &raw)
            .with_context(|| format!("failed to persist draft for flow {flow}"))
    }

    /// Best-effort save. Failures are logged and reported as `false`.
    pub fn save(&self, flow: FlowKind, state: &WizardState) -> bool {
        match self.try_save(flow, state) {
            Ok(()) => {
                debug!(flow = %flow, step = state.current_step, fields = state.answers.len(), "draft saved");
                true
            }
            Err(err) => {
                warn!(flow = %flow, error = %format!("{err:#}"), "draft not persisted; keeping in-memory state");
                false
            }
        }
    }

    /// Strict load: `Ok(None)` when nothing is stored, `Err` when the slot
    /// cannot be read or the stored record is malformed.
    pub fn try_load(&self, flow: FlowKind) -> Result<Option<WizardState>> {
        let Some(raw) = self.slot.read(flow.draft_key())? else {
            return Ok(None);
        };
        let record = decode_record(flow, &raw)?;
        Ok(Some(record.into_state()))
    }

    /// Tolerant load: missing, unreadable and malformed drafts all yield `None`.
    pub fn load(&self, flow: FlowKind) -> Option<WizardState> {
        match self.try_load(flow) {
            Ok(Some(state)) => {
                info!(flow = %flow, step = state.current_step, fields = state.answers.len(), "draft restored");
                Some(state)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(flow = %flow, error = %format!("{err:#}"), "ignoring unusable draft");
                None
            }
        }
    }

    pub fn clear(&self, flow: FlowKind) -> bool {
        match self.slot.remove(flow.draft_key()) {
            Ok(()) => {
                debug!(flow = %flow, "draft cleared");
                true
            }
            Err(err) => {
                warn!(flow = %flow, error = %format!("{err:#}"), "failed to clear draft");
                false
            }
        }
    }
}

fn decode_record(flow: FlowKind, raw: &str) -> Result<DraftRecord, WizardError> {
    let record: DraftRecord =
        serde_json::from_str(raw).map_err(|err| WizardError::MalformedDraft(err.to_string()))?;
    if record.version != DRAFT_FORMAT_VERSION {
        return Err(WizardError::MalformedDraft(format!(
            "unsupported draft version {}",
            record.version
        )));
    }
    if record.flow != flow {
        return Err(WizardError::MalformedDraft(format!(
            "draft belongs to flow {}, expected {flow}",
            record.flow
        )));
    }
    if record.total_steps == 0 || !(1..=record.total_steps).contains(&record.current_step) {
        return Err(WizardError::MalformedDraft(format!(
            "step {} outside 1..={}",
            record.current_step, record.total_steps
        )));
    }
    Ok(record)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
