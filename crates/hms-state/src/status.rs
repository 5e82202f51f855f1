//! # Room Status — The Seven Operational States
//!
//! The closed enum of room states, their canonical wire names, display
//! descriptions, and the static adjacency table of legal transitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The operational status of a physical room.
///
/// Canonical wire names are SCREAMING_SNAKE_CASE (`"OUT_OF_SERVICE"`).
/// There is no variant for any other spelling — the parse boundary is
/// [`RoomStatus::parse()`] and everything behind it is exhaustively matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Room ready to be booked.
    #[serde(rename = "AVAILABLE")]
    Available,
    /// Reserved for a future stay, not yet occupied.
    #[serde(rename = "BOOKED")]
    Booked,
    /// Guest currently in residence.
    #[serde(rename = "OCCUPIED")]
    Occupied,
    /// Guest has departed; room not yet cleaned.
    #[serde(rename = "CHECKOUT")]
    Checkout,
    /// Housekeeping actively servicing the room.
    #[serde(rename = "CLEANING")]
    Cleaning,
    /// Room removed from service for repair.
    #[serde(rename = "MAINTENANCE")]
    Maintenance,
    /// Administratively withdrawn, not bookable.
    #[serde(rename = "OUT_OF_SERVICE")]
    OutOfService,
}

impl RoomStatus {
    /// All seven states, in lifecycle order.
    pub const ALL: [RoomStatus; 7] = [
        Self::Available,
        Self::Booked,
        Self::Occupied,
        Self::Checkout,
        Self::Cleaning,
        Self::Maintenance,
        Self::OutOfService,
    ];

    /// The canonical wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Booked => "BOOKED",
            Self::Occupied => "OCCUPIED",
            Self::Checkout => "CHECKOUT",
            Self::Cleaning => "CLEANING",
            Self::Maintenance => "MAINTENANCE",
            Self::OutOfService => "OUT_OF_SERVICE",
        }
    }

    /// Convert a canonical wire name to a `RoomStatus`.
    ///
    /// Returns `None` for any other input. Use [`RoomStatus::parse()`] when
    /// a typed error is needed.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AVAILABLE" => Some(Self::Available),
            "BOOKED" => Some(Self::Booked),
            "OCCUPIED" => Some(Self::Occupied),
            "CHECKOUT" => Some(Self::Checkout),
            "CLEANING" => Some(Self::Cleaning),
            "MAINTENANCE" => Some(Self::Maintenance),
            "OUT_OF_SERVICE" => Some(Self::OutOfService),
            _ => None,
        }
    }

    /// Parse a canonical wire name, rejecting unknown names with a typed
    /// error that lists the known states.
    pub fn parse(name: &str) -> Result<Self, InvalidStatusError> {
        Self::from_name(name).ok_or_else(|| InvalidStatusError {
            got: name.to_string(),
        })
    }

    /// The set of states directly reachable from this state.
    ///
    /// This is the static transition table. No state lists itself — a
    /// self-transition is never a defined move.
    ///
    /// `OutOfService → Available` is deliberate: administrative
    /// reactivation returns a withdrawn room to the floor without a
    /// cleaning pass. Rooms that were last occupied go through
    /// `Cleaning` instead.
    pub fn valid_transitions(&self) -> &'static [RoomStatus] {
        match self {
            Self::Available => &[Self::Booked, Self::Maintenance, Self::OutOfService],
            Self::Booked => &[
                Self::Occupied,
                Self::Available,
                Self::Maintenance,
                Self::OutOfService,
            ],
            Self::Occupied => &[Self::Checkout, Self::Maintenance, Self::OutOfService],
            Self::Checkout => &[Self::Cleaning, Self::Maintenance, Self::OutOfService],
            Self::Cleaning => &[Self::Available, Self::Maintenance, Self::OutOfService],
            Self::Maintenance => &[Self::Available, Self::Cleaning, Self::OutOfService],
            Self::OutOfService => &[Self::Maintenance, Self::Cleaning, Self::Available],
        }
    }

    /// Human-readable description of this state, for display layers.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Available => "Room is clean and ready to be booked.",
            Self::Booked => "Room is reserved for a future stay and is not yet occupied.",
            Self::Occupied => "A guest is currently in residence.",
            Self::Checkout => "The guest has departed; the room has not been cleaned yet.",
            Self::Cleaning => "Housekeeping is actively servicing the room.",
            Self::Maintenance => "Room is removed from service for repair.",
            Self::OutOfService => "Room is administratively withdrawn and cannot be booked.",
        }
    }

    /// Whether a new booking may be taken against this room.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The requested status name is not a member of the known state set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown room status {got:?}; known statuses are: {}", known_statuses())]
pub struct InvalidStatusError {
    /// The rejected input.
    pub got: String,
}

fn known_statuses() -> String {
    RoomStatus::ALL
        .iter()
        .map(RoomStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for status in RoomStatus::ALL {
            assert_eq!(RoomStatus::from_name(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(RoomStatus::OutOfService.to_string(), "OUT_OF_SERVICE");
        assert_eq!(RoomStatus::Available.to_string(), "AVAILABLE");
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = RoomStatus::parse("DIRTY").unwrap_err();
        assert_eq!(err.got, "DIRTY");
        assert!(err.to_string().contains("OUT_OF_SERVICE"));

        // Non-canonical spellings are not statuses.
        assert!(RoomStatus::parse("available").is_err());
        assert!(RoomStatus::parse("Out-of-Service").is_err());
        assert!(RoomStatus::parse("").is_err());
    }

    #[test]
    fn test_from_str_for_clap() {
        let status: RoomStatus = "CLEANING".parse().unwrap();
        assert_eq!(status, RoomStatus::Cleaning);
    }

    #[test]
    fn test_no_state_lists_itself() {
        for status in RoomStatus::ALL {
            assert!(
                !status.valid_transitions().contains(&status),
                "{status} must not be its own transition target"
            );
        }
    }

    #[test]
    fn test_every_state_has_an_exit() {
        // No terminal state: Out-of-Service can always be escalated back.
        for status in RoomStatus::ALL {
            assert!(!status.valid_transitions().is_empty());
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&RoomStatus::OutOfService).unwrap();
        assert_eq!(json, "\"OUT_OF_SERVICE\"");
        let parsed: RoomStatus = serde_json::from_str("\"CHECKOUT\"").unwrap();
        assert_eq!(parsed, RoomStatus::Checkout);
    }

    #[test]
    fn test_descriptions_are_distinct() {
        for a in RoomStatus::ALL {
            for b in RoomStatus::ALL {
                if a != b {
                    assert_ne!(a.description(), b.description());
                }
            }
        }
    }

    #[test]
    fn test_only_available_is_bookable() {
        for status in RoomStatus::ALL {
            assert_eq!(status.is_bookable(), status == RoomStatus::Available);
        }
    }
}
