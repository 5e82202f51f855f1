//! # hms-store — Persistence Boundary
//!
//! Defines what the room lifecycle subsystem needs from storage, and ships
//! an in-memory reference implementation.
//!
//! ## Pieces
//!
//! - **Records** (`record.rs`): `Room`, the immutable `RoomStatusLog` audit
//!   row, and the `StatusLogEntry` input it is built from.
//!
//! - **Store trait** (`traits.rs`): `RoomStore`, a transactional contract
//!   with per-room exclusive locking. `get_room_for_update` acquires the
//!   lock, `save`/`append_log` buffer mutations, `commit` makes them visible
//!   atomically, `abort` (or dropping the transaction) discards them.
//!
//! - **In-memory store** (`memory.rs`): `InMemoryStore`, the reference
//!   backend. Each room is a slot guarded by `Mutex` + `Condvar`; lock
//!   acquisition past the configured timeout fails with
//!   `StoreError::Contention`. The audit log is a SHA-256 hash chain in the
//!   style of a tamper-evident ledger.
//!
//! - **Conflict oracle** (`oracle.rs`): maintenance request records, the
//!   `ConflictOracle` read-only capability consulted before a room may
//!   become Available, and `MaintenanceLedger`, its in-memory backing.
//!
//! ## Contract
//!
//! Implementations must serialize concurrent transactions on the same room
//! and must never make a transaction's buffered mutations visible before
//! `commit`. A SQL backend would satisfy the same trait with
//! `SELECT ... FOR UPDATE` and a real transaction; the contract is written
//! so that swap is invisible to `hms-rooms`.

pub mod memory;
pub mod oracle;
pub mod record;
pub mod traits;

pub use memory::{ChainIntegrity, InMemoryStore, MemoryTx, StoreSnapshot};
pub use oracle::{
    ConflictOracle, MaintenanceCategory, MaintenanceLedger, MaintenancePriority,
    MaintenanceRequest, MaintenanceStatus, NullOracle, OracleError,
};
pub use record::{Room, RoomStatusLog, StatusLogEntry};
pub use traits::{RoomStore, StoreError};
