//! # Status-Change Error Taxonomy
//!
//! Every way `change_status` can fail, as a typed enum. Validation errors
//! (`NotFound`, `Transition`, `Conflict`) represent caller decisions and
//! are never worth retrying unchanged; `Contention` and `Persistence` are
//! transient and safe to retry with the same arguments.

use thiserror::Error;

use hms_core::RoomId;
use hms_state::TransitionError;
use hms_store::StoreError;

/// A status change was rejected or failed.
#[derive(Error, Debug)]
pub enum StatusChangeError {
    /// The referenced room does not exist.
    #[error("room not found: {room_id}")]
    NotFound {
        /// The missing room.
        room_id: RoomId,
    },

    /// The transition was rejected by the table or a named business rule.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Blocking maintenance issues prevent the move into Available.
    /// Resolve them first; retrying unchanged fails identically.
    #[error("{blocking} blocking maintenance issue(s) must be resolved before {room_id} can be made available")]
    Conflict {
        /// The room with open issues.
        room_id: RoomId,
        /// How many issues block.
        blocking: usize,
    },

    /// The per-room lock could not be acquired; a concurrent change was in
    /// flight. Safe to retry.
    #[error("a concurrent status change holds {room_id}; retry")]
    Contention {
        /// The contended room.
        room_id: RoomId,
    },

    /// Storage failed during the operation. The transaction rolled back;
    /// the room's prior state is intact. Safe to retry.
    #[error("storage failure, room state unchanged: {0}")]
    Persistence(#[source] StoreError),
}

impl StatusChangeError {
    /// Whether the caller may retry with the same arguments.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Contention { .. } | Self::Persistence(_))
    }
}

impl From<StoreError> for StatusChangeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RoomNotFound { room_id } => Self::NotFound { room_id },
            StoreError::Contention { room_id } => Self::Contention { room_id },
            other => Self::Persistence(other),
        }
    }
}
