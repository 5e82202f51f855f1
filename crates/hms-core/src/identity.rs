//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the HMS Stack. These
//! prevent accidental identifier confusion — you cannot pass a `StaffId`
//! where a `RoomId` is expected, and a maintenance `RequestId` can never
//! stand in for either.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HmsError;

/// Unique identifier for a physical room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub Uuid);

/// Unique identifier for a staff member (receptionist, housekeeping,
/// maintenance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub Uuid);

/// Unique identifier for a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RoomId {
    /// Generate a new random room identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl StaffId {
    /// Generate a new random staff identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl RequestId {
    /// Generate a new random maintenance request identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room:{}", self.0)
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "staff:{}", self.0)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request:{}", self.0)
    }
}

/// Human-readable room number as printed on the door (e.g., `"101"`,
/// `"12-B"`).
///
/// Unique across the property. Validated at construction: 1-8 characters,
/// ASCII alphanumeric plus `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Maximum accepted length, matching what fits on a key card label.
    pub const MAX_LEN: usize = 8;

    /// Construct a validated room number.
    ///
    /// # Errors
    ///
    /// Returns [`HmsError::InvalidRoomNumber`] if the input is empty, longer
    /// than [`RoomNumber::MAX_LEN`], or contains characters outside ASCII
    /// alphanumerics and `-`.
    pub fn new(number: impl Into<String>) -> Result<Self, HmsError> {
        let number = number.into();
        if number.is_empty() || number.len() > Self::MAX_LEN {
            return Err(HmsError::InvalidRoomNumber(format!(
                "must be 1-{} characters, got {:?}",
                Self::MAX_LEN,
                number
            )));
        }
        if !number.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(HmsError::InvalidRoomNumber(format!(
                "only ASCII alphanumerics and '-' are allowed, got {number:?}"
            )));
        }
        Ok(Self(number))
    }

    /// Access the room number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_ids_are_unique() {
        assert_ne!(RoomId::new(), RoomId::new());
    }

    #[test]
    fn test_id_display_prefixes() {
        let room = RoomId::new();
        let staff = StaffId::new();
        let request = RequestId::new();
        assert!(room.to_string().starts_with("room:"));
        assert!(staff.to_string().starts_with("staff:"));
        assert!(request.to_string().starts_with("request:"));
    }

    #[test]
    fn test_room_number_valid() {
        let n = RoomNumber::new("101").unwrap();
        assert_eq!(n.as_str(), "101");
        assert_eq!(n.to_string(), "101");

        assert!(RoomNumber::new("12-B").is_ok());
        assert!(RoomNumber::new("PH1").is_ok());
    }

    #[test]
    fn test_room_number_rejects_empty() {
        assert!(RoomNumber::new("").is_err());
    }

    #[test]
    fn test_room_number_rejects_too_long() {
        assert!(RoomNumber::new("123456789").is_err());
    }

    #[test]
    fn test_room_number_rejects_bad_chars() {
        assert!(RoomNumber::new("10 1").is_err());
        assert!(RoomNumber::new("101/a").is_err());
    }

    #[test]
    fn test_room_number_ordering() {
        let a = RoomNumber::new("101").unwrap();
        let b = RoomNumber::new("102").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_id_serialization_round_trip() {
        let id = RoomId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: RoomId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
