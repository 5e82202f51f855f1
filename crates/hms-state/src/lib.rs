//! # hms-state — Room Lifecycle State Machine
//!
//! Implements the room status graph that governs how a physical room moves
//! between operational states under the hands of receptionists, housekeeping,
//! and maintenance staff.
//!
//! ## States and Transitions
//!
//! ```text
//!                ┌──────────▶ Booked ──────────▶ Occupied
//!                │               │                  │
//!            Available ◀────────┘                   ▼
//!             ▲  ▲  ▲                            Checkout
//!             │  │  │                               │
//!             │  │  └── Cleaning ◀──────────────────┘
//!             │  │          ▲
//!             │  └───── Maintenance ◀── (any state)
//!             │             ▲
//!             └──────── Out-of-Service ◀── (any state)
//! ```
//!
//! Every state can additionally move to `Maintenance` and `OutOfService`;
//! the diagram shows only the guest-facing happy path. The full adjacency
//! set is [`RoomStatus::valid_transitions()`].
//!
//! ## Design
//!
//! Statuses are a closed enum, not strings — an unrecognized status name
//! cannot reach business logic; it is rejected at the parse boundary with
//! [`InvalidStatusError`]. The transition table and the named business-rule
//! exceptions are `&'static` data built into the binary; there is no runtime
//! mutation and therefore no synchronization concern.
//!
//! This crate is pure logic. Locking, persistence, conflict checks, and
//! audit logging live in `hms-store` and `hms-rooms`.

pub mod status;
pub mod transition;

pub use status::{InvalidStatusError, RoomStatus};
pub use transition::{
    business_rule, can_transition, validate, valid_transitions, BusinessRule, TransitionError,
    BUSINESS_RULES,
};
