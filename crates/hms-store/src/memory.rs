//! # In-Memory Reference Store
//!
//! Implements [`RoomStore`] with per-room lock slots. Each room lives in a
//! slot whose `locked` flag is guarded by a `Mutex` and signalled through a
//! `Condvar`; a transaction holds the flag from `get_room_for_update` until
//! commit, abort, or drop. Waiters park on the condvar with a deadline and
//! fail with [`StoreError::Contention`] when it passes.
//!
//! Mutations are buffered in the transaction handle and applied only at
//! commit, so readers and later transactions never observe partial state.
//!
//! The audit log is a single append-only vector with a SHA-256 hash chain:
//! every row's `entry_hash` covers the previous row's hash, making
//! retroactive edits detectable via [`InMemoryStore::verify_chain`].

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use hms_core::{RoomId, RoomNumber};

use crate::record::{Room, RoomStatusLog, StatusLogEntry};
use crate::traits::{RoomStore, StoreError};

/// Hash the chain starts from.
const ZERO_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Default lock acquisition timeout.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory [`RoomStore`] backend.
#[derive(Debug)]
pub struct InMemoryStore {
    rooms: RwLock<HashMap<RoomId, Arc<RoomSlot>>>,
    chain: Mutex<AuditChain>,
    lock_timeout: Duration,
}

#[derive(Debug)]
struct RoomSlot {
    state: Mutex<SlotState>,
    released: Condvar,
}

#[derive(Debug)]
struct SlotState {
    room: Room,
    locked: bool,
}

#[derive(Debug, Default)]
struct AuditChain {
    entries: Vec<RoomStatusLog>,
    next_seq: u64,
    head_hash: Option<String>,
}

impl AuditChain {
    fn head(&self) -> &str {
        self.head_hash.as_deref().unwrap_or(ZERO_HASH)
    }

    fn append(&mut self, entry: StatusLogEntry) {
        let seq = self.next_seq;
        let previous_hash = self.head().to_string();
        let entry_hash = chain_hash(&previous_hash, &entry, seq);
        self.entries.push(RoomStatusLog {
            seq,
            room_id: entry.room_id,
            old_status: entry.old_status,
            new_status: entry.new_status,
            actor_id: entry.actor_id,
            notes: entry.notes,
            timestamp: entry.timestamp,
            previous_hash,
            entry_hash: entry_hash.clone(),
        });
        self.head_hash = Some(entry_hash);
        self.next_seq = seq + 1;
    }
}

/// Transaction handle for [`InMemoryStore`]. Dropping it without commit
/// behaves like abort: buffered mutations are discarded and the room lock
/// is released.
#[derive(Debug)]
pub struct MemoryTx {
    slot: Arc<RoomSlot>,
    room_id: RoomId,
    pending_room: Option<Room>,
    pending_log: Vec<StatusLogEntry>,
    finished: bool,
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        if !self.finished {
            let mut state = lock(&self.slot.state);
            state.locked = false;
            drop(state);
            self.slot.released.notify_all();
        }
    }
}

impl InMemoryStore {
    /// Create an empty store with the default lock timeout.
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an empty store with a custom lock acquisition timeout.
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            chain: Mutex::new(AuditChain::default()),
            lock_timeout,
        }
    }

    /// Insert a newly provisioned room.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateRoom`] if a room with the same number (or the
    /// same id) already exists.
    pub fn insert_room(&self, room: Room) -> Result<(), StoreError> {
        let mut rooms = self
            .rooms
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let duplicate = rooms.contains_key(&room.id)
            || rooms
                .values()
                .any(|slot| lock(&slot.state).room.number == room.number);
        if duplicate {
            return Err(StoreError::DuplicateRoom {
                number: room.number,
            });
        }
        rooms.insert(
            room.id,
            Arc::new(RoomSlot {
                state: Mutex::new(SlotState {
                    room,
                    locked: false,
                }),
                released: Condvar::new(),
            }),
        );
        Ok(())
    }

    /// Verify the audit hash chain end to end.
    pub fn verify_chain(&self) -> ChainIntegrity {
        let chain = lock(&self.chain);
        verify_entries(&chain.entries)
    }

    /// Snapshot the committed state for persistence.
    pub fn snapshot(&self) -> StoreSnapshot {
        let audit = lock(&self.chain).entries.clone();
        StoreSnapshot {
            rooms: self.list_rooms(),
            audit,
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] if the snapshot's audit chain does not
    /// verify; [`StoreError::DuplicateRoom`] on duplicate room numbers.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let StoreSnapshot { rooms, mut audit } = snapshot;
        audit.sort_by_key(|e| e.seq);

        let integrity = verify_entries(&audit);
        if !integrity.chain_valid {
            return Err(StoreError::Backend(format!(
                "audit chain failed verification: {} broken link(s) in {} entries",
                integrity.broken_links, integrity.total_entries
            )));
        }

        let store = Self::new();
        for room in rooms {
            store.insert_room(room)?;
        }
        let mut chain = lock(&store.chain);
        chain.next_seq = audit.last().map(|e| e.seq + 1).unwrap_or(0);
        chain.head_hash = audit.last().map(|e| e.entry_hash.clone());
        chain.entries = audit;
        drop(chain);
        Ok(store)
    }

    fn slot(&self, id: RoomId) -> Result<Arc<RoomSlot>, StoreError> {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(StoreError::RoomNotFound { room_id: id })
    }

    fn slots(&self) -> Vec<Arc<RoomSlot>> {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomStore for InMemoryStore {
    type Tx = MemoryTx;

    fn get_room_for_update(&self, id: RoomId) -> Result<(MemoryTx, Room), StoreError> {
        let slot = self.slot(id)?;
        let deadline = Instant::now() + self.lock_timeout;

        let mut state = lock(&slot.state);
        while state.locked {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(StoreError::Contention { room_id: id });
            }
            let (guard, wait) = slot
                .released
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
            if wait.timed_out() && state.locked {
                return Err(StoreError::Contention { room_id: id });
            }
        }
        state.locked = true;
        let room = state.room.clone();
        drop(state);

        Ok((
            MemoryTx {
                slot,
                room_id: id,
                pending_room: None,
                pending_log: Vec::new(),
                finished: false,
            },
            room,
        ))
    }

    fn save(&self, tx: &mut MemoryTx, room: &Room) -> Result<(), StoreError> {
        if room.id != tx.room_id {
            return Err(StoreError::Backend(format!(
                "{} does not belong to this transaction ({})",
                room.id, tx.room_id
            )));
        }
        tx.pending_room = Some(room.clone());
        Ok(())
    }

    fn append_log(&self, tx: &mut MemoryTx, entry: StatusLogEntry) -> Result<(), StoreError> {
        if entry.room_id != tx.room_id {
            return Err(StoreError::Backend(format!(
                "log entry for {} does not belong to this transaction ({})",
                entry.room_id, tx.room_id
            )));
        }
        tx.pending_log.push(entry);
        Ok(())
    }

    fn commit(&self, mut tx: MemoryTx) -> Result<(), StoreError> {
        {
            let mut chain = lock(&self.chain);
            for entry in tx.pending_log.drain(..) {
                chain.append(entry);
            }
        }
        let mut state = lock(&tx.slot.state);
        if let Some(room) = tx.pending_room.take() {
            state.room = room;
        }
        state.locked = false;
        drop(state);
        tx.slot.released.notify_all();
        tx.finished = true;
        Ok(())
    }

    fn abort(&self, tx: MemoryTx) {
        // Drop releases the lock and discards the buffers.
        drop(tx);
    }

    fn get_room(&self, id: RoomId) -> Result<Room, StoreError> {
        let slot = self.slot(id)?;
        let room = lock(&slot.state).room.clone();
        Ok(room)
    }

    fn find_by_number(&self, number: &RoomNumber) -> Result<Room, StoreError> {
        self.slots()
            .iter()
            .map(|slot| lock(&slot.state).room.clone())
            .find(|room| &room.number == number)
            .ok_or_else(|| StoreError::NumberNotFound {
                number: number.clone(),
            })
    }

    fn list_rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<_> = self
            .slots()
            .iter()
            .map(|slot| lock(&slot.state).room.clone())
            .collect();
        rooms.sort_by(|a, b| a.number.cmp(&b.number));
        rooms
    }

    fn history(&self, id: RoomId) -> Result<Vec<RoomStatusLog>, StoreError> {
        self.slot(id)?;
        let chain = lock(&self.chain);
        Ok(chain
            .entries
            .iter()
            .filter(|e| e.room_id == id)
            .cloned()
            .collect())
    }
}

/// Result of audit chain verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainIntegrity {
    /// Rows inspected.
    pub total_entries: usize,
    /// Rows whose hash linkage did not verify.
    pub broken_links: usize,
    /// Whether the whole chain verified.
    pub chain_valid: bool,
}

/// Serializable committed state of an [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// All rooms, ordered by number.
    pub rooms: Vec<Room>,
    /// All audit rows, in commit order.
    pub audit: Vec<RoomStatusLog>,
}

/// Compute the hash of one audit row given its predecessor's hash.
///
/// Covers the row's identity fields (room, statuses, sequence number) and
/// the previous hash, so re-ordering, editing, or deleting any historical
/// row invalidates every hash after it.
fn chain_hash(previous_hash: &str, entry: &StatusLogEntry, seq: u64) -> String {
    let old = entry
        .old_status
        .map(|s| s.as_str())
        .unwrap_or("-");
    let input = format!(
        "{previous_hash}{}{old}{}{seq}",
        entry.room_id, entry.new_status
    );
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn verify_entries(entries: &[RoomStatusLog]) -> ChainIntegrity {
    let mut broken_links = 0;
    let mut expected_prev = ZERO_HASH.to_string();
    for row in entries {
        let reference = StatusLogEntry {
            room_id: row.room_id,
            old_status: row.old_status,
            new_status: row.new_status,
            actor_id: row.actor_id,
            notes: row.notes.clone(),
            timestamp: row.timestamp,
        };
        let recomputed = chain_hash(&row.previous_hash, &reference, row.seq);
        if row.previous_hash != expected_prev || row.entry_hash != recomputed {
            broken_links += 1;
        }
        expected_prev = row.entry_hash.clone();
    }
    ChainIntegrity {
        total_entries: entries.len(),
        broken_links,
        chain_valid: broken_links == 0,
    }
}

/// Lock a mutex, recovering the guard if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
