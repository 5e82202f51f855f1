//! # Domain Records
//!
//! The persisted shapes of the room subsystem: the room row itself, the
//! immutable audit row, and the input an audit row is built from.

use serde::{Deserialize, Serialize};

use hms_core::{RoomId, RoomNumber, StaffId, Timestamp};
use hms_state::RoomStatus;

/// A physical, bookable unit.
///
/// `status` always reflects the last successfully committed transition.
/// All mutation flows through the state machine in `hms-rooms`; writing the
/// record directly would bypass validation, conflict checks, and audit,
/// which the storage layer cannot itself prevent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable opaque identifier.
    pub id: RoomId,
    /// Unique human-readable room number.
    pub number: RoomNumber,
    /// Current operational status.
    pub status: RoomStatus,
    /// Set only when a transition into Available originates from Cleaning
    /// or Checkout.
    pub last_cleaned: Option<Timestamp>,
    /// When the room was provisioned.
    pub created_at: Timestamp,
    /// When the room last committed a change.
    pub updated_at: Timestamp,
}

impl Room {
    /// Provision a new room. Rooms start Available with no cleaning record.
    pub fn provision(number: RoomNumber) -> Self {
        let now = Timestamp::now();
        Self {
            id: RoomId::new(),
            number,
            status: RoomStatus::Available,
            last_cleaned: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for one audit row, produced by the state machine inside a
/// transaction. The store assigns the sequence number and hash chain at
/// commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLogEntry {
    /// The room whose status changed.
    pub room_id: RoomId,
    /// Status before the change. `None` only for a first recorded change
    /// with no known predecessor.
    pub old_status: Option<RoomStatus>,
    /// Status after the change.
    pub new_status: RoomStatus,
    /// Who initiated the change. `None` for system-initiated changes.
    pub actor_id: Option<StaffId>,
    /// Free-text notes; forced changes carry the `[FORCED CHANGE]` prefix.
    pub notes: Option<String>,
    /// When the change was made.
    pub timestamp: Timestamp,
}

/// One committed audit row. Immutable once written.
///
/// Rows form a store-wide SHA-256 hash chain: `entry_hash` covers
/// `previous_hash`, so editing or deleting any historical row breaks every
/// hash after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatusLog {
    /// Store-assigned, strictly monotonic commit order.
    pub seq: u64,
    /// The room whose status changed.
    pub room_id: RoomId,
    /// Status before the change.
    pub old_status: Option<RoomStatus>,
    /// Status after the change.
    pub new_status: RoomStatus,
    /// Who initiated the change, if anyone.
    pub actor_id: Option<StaffId>,
    /// Free-text notes, possibly carrying the forced-change marker.
    pub notes: Option<String>,
    /// When the change was made.
    pub timestamp: Timestamp,
    /// `entry_hash` of the previous row; the zero hash for the first row.
    pub previous_hash: String,
    /// SHA-256 over this row's identity and the previous hash.
    pub entry_hash: String,
}
