//! # State File — JSON Persistence for the CLI
//!
//! Serializes the store snapshot and the maintenance ledger to one JSON
//! document. Restoring re-verifies the audit hash chain, so a hand-edited
//! history is rejected at load time rather than silently accepted.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use hms_rooms::RoomStateMachine;
use hms_store::{InMemoryStore, MaintenanceLedger, MaintenanceRequest, StoreSnapshot};

use crate::CliMachine;

/// On-disk document: rooms plus audit chain plus maintenance requests.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    #[serde(flatten)]
    store: StoreSnapshot,
    maintenance: Vec<MaintenanceRequest>,
}

/// A JSON state file holding the whole property.
#[derive(Debug)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Wrap a path; nothing is read until [`StateFile::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The wrapped path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the machine from the file, or start empty if the file does
    /// not exist yet.
    pub fn load(&self) -> anyhow::Result<CliMachine> {
        if !self.path.exists() {
            return Ok(RoomStateMachine::new(
                InMemoryStore::new(),
                MaintenanceLedger::new(),
            ));
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading state file {}", self.path.display()))?;
        let state: PersistedState = serde_json::from_str(&raw)
            .with_context(|| format!("parsing state file {}", self.path.display()))?;
        let store = InMemoryStore::restore(state.store)
            .with_context(|| format!("restoring state file {}", self.path.display()))?;
        let ledger = MaintenanceLedger::restore(state.maintenance);
        Ok(RoomStateMachine::new(store, ledger))
    }

    /// Write the machine's committed state back to the file.
    pub fn save(&self, machine: &CliMachine) -> anyhow::Result<()> {
        let state = PersistedState {
            store: machine.store().snapshot(),
            maintenance: machine.oracle().snapshot(),
        };
        let raw = serde_json::to_string_pretty(&state).context("serializing state")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("writing state file {}", self.path.display()))?;
        Ok(())
    }
}
