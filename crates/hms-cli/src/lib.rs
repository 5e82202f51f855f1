//! # hms-cli — Operator Tooling for the HMS Stack
//!
//! Subcommand handlers for the `hms` binary. All state lives in a JSON
//! state file (rooms, the audit chain, and the maintenance ledger); each
//! invocation loads the file, runs one operation through the same
//! `RoomStateMachine` the library exposes, and writes the file back if
//! anything changed.
//!
//! The state file's audit chain is verified on every load; a tampered
//! file refuses to load.

pub mod audit;
pub mod maintenance;
pub mod rooms;
pub mod statefile;
pub mod status;

use hms_store::{InMemoryStore, MaintenanceLedger};

/// The machine every CLI command operates on.
pub type CliMachine = hms_rooms::RoomStateMachine<InMemoryStore, MaintenanceLedger>;
