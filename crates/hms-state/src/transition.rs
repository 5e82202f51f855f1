//! # Transition Validation — Table Lookup and Business Rules
//!
//! Validates a requested status change against the static adjacency table
//! and the named business-rule exceptions.
//!
//! A rejected transition is one of two things:
//!
//! - **Structurally absent**: the edge simply is not in the table. The
//!   error lists the valid targets so the caller can correct course.
//! - **Named business rule**: the edge looks plausible by composing two
//!   hops (Occupied → Available "skips" checkout and cleaning), and front
//!   desk staff request it often enough that a generic message caused
//!   support load. These carry a specific, human-readable reason.
//!
//! Both checks are read-only table lookups; nothing here mutates state.

use thiserror::Error;

use crate::status::RoomStatus;

/// A named business-rule exception: an edge that is structurally absent
/// from the table for an operational reason worth telling the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessRule {
    /// Source state of the forbidden edge.
    pub from: RoomStatus,
    /// Target state of the forbidden edge.
    pub to: RoomStatus,
    /// The reason surfaced to the caller instead of a generic message.
    pub reason: &'static str,
}

/// The named business-rule exceptions.
///
/// Each entry documents why a seemingly-reachable shortcut is forbidden.
/// `OutOfService → Available` is intentionally NOT here — administrative
/// reactivation without a cleaning pass is a legal edge (see
/// [`RoomStatus::valid_transitions()`]).
pub const BUSINESS_RULES: &[BusinessRule] = &[
    BusinessRule {
        from: RoomStatus::Occupied,
        to: RoomStatus::Available,
        reason: "guest must check out and the room must be cleaned before it can be made available",
    },
    BusinessRule {
        from: RoomStatus::Checkout,
        to: RoomStatus::Available,
        reason: "room must be cleaned after checkout before it can be made available",
    },
    BusinessRule {
        from: RoomStatus::Booked,
        to: RoomStatus::Cleaning,
        reason: "a booked room has not been occupied; cancel or check in instead of sending housekeeping",
    },
    BusinessRule {
        from: RoomStatus::Occupied,
        to: RoomStatus::Cleaning,
        reason: "room must pass through checkout before housekeeping takes it over",
    },
];

/// Look up the business rule forbidding `from → to`, if one is named.
pub fn business_rule(from: RoomStatus, to: RoomStatus) -> Option<&'static BusinessRule> {
    BUSINESS_RULES.iter().find(|r| r.from == from && r.to == to)
}

/// A transition was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The edge is not in the adjacency table and matches no named rule.
    /// The message lists the valid alternatives.
    #[error("invalid transition {from} -> {to}; valid targets from {from} are: {}", format_statuses(.valid))]
    NotAllowed {
        /// Current state.
        from: RoomStatus,
        /// Requested target state.
        to: RoomStatus,
        /// Legal targets from `from`.
        valid: &'static [RoomStatus],
    },

    /// The edge matches a named business-rule exception; the specific
    /// reason is surfaced verbatim.
    #[error("cannot move {from} -> {to}: {reason}")]
    BusinessRule {
        /// Current state.
        from: RoomStatus,
        /// Requested target state.
        to: RoomStatus,
        /// The rule's reason text.
        reason: &'static str,
    },
}

/// Validate a requested transition against the table and the business rules.
///
/// # Errors
///
/// - [`TransitionError::BusinessRule`] when the edge matches a named
///   exception.
/// - [`TransitionError::NotAllowed`] for every other edge missing from the
///   table, including self-transitions.
pub fn validate(from: RoomStatus, to: RoomStatus) -> Result<(), TransitionError> {
    if from.valid_transitions().contains(&to) {
        return Ok(());
    }
    if let Some(rule) = business_rule(from, to) {
        return Err(TransitionError::BusinessRule {
            from,
            to,
            reason: rule.reason,
        });
    }
    Err(TransitionError::NotAllowed {
        from,
        to,
        valid: from.valid_transitions(),
    })
}

/// Whether `from → to` is a legal transition. Never errors, never mutates;
/// intended for display layers pre-filtering choices.
pub fn can_transition(from: RoomStatus, to: RoomStatus) -> bool {
    from.valid_transitions().contains(&to)
}

/// The set of states directly reachable from `from`. Introspection wrapper
/// over the same table used by [`validate()`].
pub fn valid_transitions(from: RoomStatus) -> &'static [RoomStatus] {
    from.valid_transitions()
}

fn format_statuses(statuses: &[RoomStatus]) -> String {
    statuses
        .iter()
        .map(RoomStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
