//! # The Storage Contract
//!
//! `RoomStore` is what the state machine in `hms-rooms` consumes. The
//! in-memory backend in this crate implements it; a SQL backend would
//! implement the same trait with `SELECT ... FOR UPDATE` and a database
//! transaction.

use thiserror::Error;

use hms_core::{RoomId, RoomNumber};

use crate::record::{Room, RoomStatusLog, StatusLogEntry};

/// All errors a `RoomStore` implementation can return.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No room with the given id.
    #[error("room not found: {room_id}")]
    RoomNotFound {
        /// The missing room.
        room_id: RoomId,
    },

    /// No room with the given number.
    #[error("no room with number {number}")]
    NumberNotFound {
        /// The missing number.
        number: RoomNumber,
    },

    /// A room with this number already exists.
    #[error("room number {number} already exists")]
    DuplicateRoom {
        /// The conflicting number.
        number: RoomNumber,
    },

    /// The per-room lock could not be acquired within the configured
    /// timeout. Transient; safe to retry.
    #[error("room {room_id} is locked by a concurrent transaction")]
    Contention {
        /// The contended room.
        room_id: RoomId,
    },

    /// A backend-specific failure (I/O, serialization, connection).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Transactional room storage with per-room exclusive locking.
///
/// ## Transaction lifecycle
///
/// 1. [`get_room_for_update`](RoomStore::get_room_for_update) acquires an
///    exclusive lock scoped to exactly one room and returns a transaction
///    handle plus the committed room state.
/// 2. [`save`](RoomStore::save) and [`append_log`](RoomStore::append_log)
///    buffer mutations inside the transaction. Nothing is visible to other
///    callers yet.
/// 3. [`commit`](RoomStore::commit) applies the buffered room mutation and
///    audit rows together and releases the lock, or
///    [`abort`](RoomStore::abort) discards everything. Dropping a
///    transaction without committing must behave like `abort`.
///
/// ## Locking contract
///
/// A second `get_room_for_update` on the same room blocks until the first
/// transaction resolves, or fails with [`StoreError::Contention`] after the
/// backend's acquisition timeout. Transactions on different rooms never
/// contend. Because a transaction holds exactly one room lock, callers that
/// never span two rooms in one operation cannot deadlock.
///
/// ## Reads
///
/// The non-locking reads return the last committed state; they never
/// observe a transaction's buffered mutations.
pub trait RoomStore: Send + Sync + 'static {
    /// The transaction handle. Holds the room lock until commit/abort/drop.
    type Tx: Send;

    /// Begin a transaction: acquire the exclusive lock on `id` and return
    /// the committed room state.
    ///
    /// # Errors
    ///
    /// [`StoreError::RoomNotFound`] if the room does not exist (no lock is
    /// held); [`StoreError::Contention`] if the lock cannot be acquired in
    /// time.
    fn get_room_for_update(&self, id: RoomId) -> Result<(Self::Tx, Room), StoreError>;

    /// Buffer an updated room record inside the transaction.
    fn save(&self, tx: &mut Self::Tx, room: &Room) -> Result<(), StoreError>;

    /// Buffer an audit row inside the transaction. The store assigns the
    /// sequence number and hash chain at commit.
    fn append_log(&self, tx: &mut Self::Tx, entry: StatusLogEntry) -> Result<(), StoreError>;

    /// Apply all buffered mutations atomically and release the room lock.
    fn commit(&self, tx: Self::Tx) -> Result<(), StoreError>;

    /// Discard all buffered mutations and release the room lock.
    fn abort(&self, tx: Self::Tx);

    /// Read a room by id (last committed state).
    fn get_room(&self, id: RoomId) -> Result<Room, StoreError>;

    /// Read a room by number (last committed state).
    fn find_by_number(&self, number: &RoomNumber) -> Result<Room, StoreError>;

    /// All rooms, ordered by number.
    fn list_rooms(&self) -> Vec<Room>;

    /// Committed audit rows for one room, in commit order.
    ///
    /// # Errors
    ///
    /// [`StoreError::RoomNotFound`] if the room does not exist.
    fn history(&self, id: RoomId) -> Result<Vec<RoomStatusLog>, StoreError>;
}
