//! # hms-core — Foundational Types for the HMS Stack
//!
//! This crate is the bedrock of the HMS Stack. It defines the primitives
//! shared by every other crate in the workspace; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `RoomId`, `StaffId`,
//!    `RequestId`, `RoomNumber` — all newtypes with validated constructors
//!    where validation applies. No bare strings or UUIDs for identifiers.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision, so audit rows serialize identically
//!    regardless of the host timezone.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hms-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::HmsError;
pub use identity::{RequestId, RoomId, RoomNumber, StaffId};
pub use temporal::Timestamp;
