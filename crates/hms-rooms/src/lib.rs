//! # hms-rooms — Room Lifecycle Orchestrator
//!
//! The protected path every room status change takes:
//!
//! ```text
//! lock room ─▶ validate transition ─▶ conflict check ─▶ mutate ─▶ audit ─▶ commit
//! ```
//!
//! [`RoomStateMachine`] is the only component allowed to move a room
//! between states. It is generic over the storage backend
//! (`hms_store::RoomStore`) and the maintenance conflict oracle
//! (`hms_store::ConflictOracle`), so the same orchestration runs against
//! the in-memory reference store in tests and a SQL-backed store in
//! production.
//!
//! ## Guarantees
//!
//! - Two concurrent changes to the same room are serialized by the store's
//!   per-room exclusive lock; the second caller validates against the
//!   first's committed result, never against stale state.
//! - Exactly one audit row per successful change, zero per failed call.
//! - A failed call leaves the room's observable status untouched.
//! - A room can become Available only when the conflict oracle reports no
//!   blocking maintenance issues — `force` does not bypass this check.
//!
//! Introspection (`valid_transitions`, `can_transition`, [`describe()`])
//! never mutates state and is safe for display layers to call freely.

pub mod error;
pub mod machine;

pub use error::StatusChangeError;
pub use machine::{RoomStateMachine, StatusChange, FORCED_CHANGE_MARKER};

// The introspection surface is the state crate's; re-exported so callers
// of the orchestrator need only one import.
pub use hms_state::{can_transition, valid_transitions, RoomStatus, TransitionError};

/// Human-readable description of a status, for display layers.
pub fn describe(status: RoomStatus) -> &'static str {
    status.description()
}
