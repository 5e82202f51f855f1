//! # Error Types — Core Error Hierarchy
//!
//! Defines the error type shared by the foundational primitives. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Domain-specific error taxonomies (transition rejection, storage failure,
//! conflict blocking) live in the crates that own those concerns; this type
//! only covers validation of the core primitives themselves.

use thiserror::Error;

/// Errors produced by the foundational types.
#[derive(Error, Debug)]
pub enum HmsError {
    /// A room number failed validation.
    #[error("invalid room number: {0}")]
    InvalidRoomNumber(String),

    /// A timestamp string failed validation.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
