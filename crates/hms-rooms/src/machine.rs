//! # The Protected State-Change Operation
//!
//! [`RoomStateMachine::change_status`] is the single write path for room
//! status. The sequence per call:
//!
//! 1. Acquire the room's exclusive lock (`get_room_for_update`). Concurrent
//!    callers on the same room serialize here.
//! 2. Validate the transition against the table, unless `force`.
//! 3. If the target is Available, consult the conflict oracle. Blocking
//!    issues reject the change even under `force`; an unreachable oracle
//!    fails open.
//! 4. Mutate the room copy (status, `updated_at`, `last_cleaned` when a
//!    cleaning pass completes).
//! 5. Append the audit row. Append failure is reported and swallowed.
//! 6. Commit atomically; on any error the transaction aborts and the
//!    room's observable state is unchanged.

use hms_core::{RoomId, StaffId, Timestamp};
use hms_state::RoomStatus;
use hms_store::{ConflictOracle, Room, RoomStore, StatusLogEntry};

use crate::error::StatusChangeError;

/// Marker prepended to the audit notes of every forced change.
pub const FORCED_CHANGE_MARKER: &str = "[FORCED CHANGE]";

/// One requested status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The room to change.
    pub room_id: RoomId,
    /// The requested target status.
    pub new_status: RoomStatus,
    /// Who is making the change; `None` for system-initiated changes.
    pub actor_id: Option<StaffId>,
    /// Free-text notes for the audit trail.
    pub notes: Option<String>,
    /// Administrative override: skip transition validation (but not the
    /// conflict check) and flag the audit row.
    pub force: bool,
}

impl StatusChange {
    /// A plain change request with no actor, notes, or override.
    pub fn new(room_id: RoomId, new_status: RoomStatus) -> Self {
        Self {
            room_id,
            new_status,
            actor_id: None,
            notes: None,
            force: false,
        }
    }

    /// Attribute the change to a staff member.
    pub fn by(mut self, actor_id: StaffId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Attach free-text notes to the audit row.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Mark the change as an administrative override.
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

/// The orchestrator. Owns no room state itself; every call round-trips
/// through the store under the room's exclusive lock.
#[derive(Debug)]
pub struct RoomStateMachine<S, O> {
    store: S,
    oracle: O,
}

impl<S: RoomStore, O: ConflictOracle> RoomStateMachine<S, O> {
    /// Build a machine over a store and a conflict oracle.
    pub fn new(store: S, oracle: O) -> Self {
        Self { store, oracle }
    }

    /// Access the underlying store (reads, provisioning, snapshots).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the conflict oracle (maintenance workflows file and resolve
    /// requests through it).
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Execute one status change under the room's exclusive lock.
    ///
    /// Returns the updated room on success. On any error the transaction
    /// is aborted and the room's observable status is unchanged; see
    /// [`StatusChangeError`] for which failures are retryable.
    pub fn change_status(&self, change: StatusChange) -> Result<Room, StatusChangeError> {
        let room_id = change.room_id;
        let force = change.force;

        let (mut tx, room) = self.store.get_room_for_update(room_id)?;
        let old_status = room.status;

        match self.apply(&mut tx, room, change) {
            Ok(updated) => {
                self.store.commit(tx)?;
                tracing::info!(
                    room = %updated.number,
                    from = %old_status,
                    to = %updated.status,
                    forced = force,
                    "room status changed"
                );
                Ok(updated)
            }
            Err(err) => {
                self.store.abort(tx);
                Err(err)
            }
        }
    }

    /// Validate and buffer the change inside the open transaction.
    fn apply(
        &self,
        tx: &mut S::Tx,
        room: Room,
        change: StatusChange,
    ) -> Result<Room, StatusChangeError> {
        let StatusChange {
            room_id,
            new_status,
            actor_id,
            notes,
            force,
        } = change;
        let old_status = room.status;

        if !force {
            hms_state::validate(old_status, new_status)?;
        }

        if new_status == RoomStatus::Available {
            match self.oracle.count_blocking_issues(room_id) {
                Ok(0) => {}
                Ok(blocking) => {
                    return Err(StatusChangeError::Conflict { room_id, blocking });
                }
                Err(err) => {
                    tracing::warn!(
                        room = %room.number,
                        error = %err,
                        "conflict oracle unavailable; failing open"
                    );
                }
            }
        }

        let now = Timestamp::now();
        let mut updated = room;
        updated.status = new_status;
        updated.updated_at = now;
        if new_status == RoomStatus::Available
            && matches!(old_status, RoomStatus::Cleaning | RoomStatus::Checkout)
        {
            updated.last_cleaned = Some(now);
        }

        let entry = StatusLogEntry {
            room_id,
            old_status: Some(old_status),
            new_status,
            actor_id,
            notes: compose_notes(force, notes),
            timestamp: now,
        };
        if let Err(err) = self.store.append_log(tx, entry) {
            // Audit is best-effort relative to the primary invariant: the
            // room's status must reflect reality.
            tracing::error!(
                room = %updated.number,
                error = %err,
                "audit append failed; status change proceeds"
            );
        }

        self.store.save(tx, &updated)?;
        Ok(updated)
    }
}

fn compose_notes(force: bool, notes: Option<String>) -> Option<String> {
    match (force, notes) {
        (false, notes) => notes,
        (true, Some(notes)) => Some(format!("{FORCED_CHANGE_MARKER} {notes}")),
        (true, None) => Some(FORCED_CHANGE_MARKER.to_string()),
    }
}
