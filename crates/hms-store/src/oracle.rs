//! # Conflict Oracle — Maintenance Gate for Availability
//!
//! Read-only queries against maintenance request records, used to decide
//! whether a room may be marked Available. The room subsystem owns no part
//! of the maintenance lifecycle; it only counts blocking issues.
//!
//! ## Blocking policy
//!
//! An issue blocks availability iff all three hold:
//!
//! - category is safety-critical (plumbing, electrical, HVAC, safety),
//! - priority is high or urgent,
//! - status is pending or in progress.
//!
//! Furniture and cosmetic issues never block, whatever their priority.
//!
//! ## Fail-open contract
//!
//! If the maintenance subsystem is unreachable, implementations return
//! [`OracleError::Unavailable`] and the caller treats the room as having no
//! conflicts. Availability of the room subsystem must not depend on an
//! unrelated subsystem being present. Staleness is acceptable: a stale read
//! can only reject conservatively, never accept unsafely.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hms_core::{RequestId, RoomId, Timestamp};

/// Category of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceCategory {
    /// Water supply, drainage, fixtures.
    #[serde(rename = "PLUMBING")]
    Plumbing,
    /// Wiring, sockets, lighting.
    #[serde(rename = "ELECTRICAL")]
    Electrical,
    /// Heating, ventilation, air conditioning.
    #[serde(rename = "HVAC")]
    Hvac,
    /// Locks, alarms, fire equipment.
    #[serde(rename = "SAFETY")]
    Safety,
    /// Beds, desks, chairs.
    #[serde(rename = "FURNITURE")]
    Furniture,
    /// Paint, decor, scuffs.
    #[serde(rename = "COSMETIC")]
    Cosmetic,
}

impl MaintenanceCategory {
    /// Whether an unresolved issue of this category can make a room unsafe
    /// to occupy.
    pub fn is_safety_critical(&self) -> bool {
        matches!(
            self,
            Self::Plumbing | Self::Electrical | Self::Hvac | Self::Safety
        )
    }

    /// The canonical wire name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plumbing => "PLUMBING",
            Self::Electrical => "ELECTRICAL",
            Self::Hvac => "HVAC",
            Self::Safety => "SAFETY",
            Self::Furniture => "FURNITURE",
            Self::Cosmetic => "COSMETIC",
        }
    }
}

impl std::fmt::Display for MaintenanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenancePriority {
    /// Fix when convenient.
    #[serde(rename = "LOW")]
    Low,
    /// Fix this week.
    #[serde(rename = "MEDIUM")]
    Medium,
    /// Fix before the room is next sold.
    #[serde(rename = "HIGH")]
    High,
    /// Fix now.
    #[serde(rename = "URGENT")]
    Urgent,
}

impl MaintenancePriority {
    /// Whether this priority is high enough to block availability.
    pub fn blocks_availability(&self) -> bool {
        matches!(self, Self::High | Self::Urgent)
    }

    /// The canonical wire name of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl std::fmt::Display for MaintenancePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    /// Filed, not yet picked up.
    #[serde(rename = "PENDING")]
    Pending,
    /// A technician is working on it.
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    /// Work completed.
    #[serde(rename = "RESOLVED")]
    Resolved,
    /// Withdrawn without work.
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl MaintenanceStatus {
    /// Whether the request still represents unresolved work.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// The canonical wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A maintenance request as the room subsystem sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    /// Stable request identifier.
    pub id: RequestId,
    /// The room the issue was reported against.
    pub room_id: RoomId,
    /// Issue category.
    pub category: MaintenanceCategory,
    /// Issue priority.
    pub priority: MaintenancePriority,
    /// Lifecycle status.
    pub status: MaintenanceStatus,
    /// Free-text description of the issue.
    pub description: String,
    /// When the issue was reported.
    pub reported_at: Timestamp,
}

impl MaintenanceRequest {
    /// File a new pending request.
    pub fn new(
        room_id: RoomId,
        category: MaintenanceCategory,
        priority: MaintenancePriority,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: RequestId::new(),
            room_id,
            category,
            priority,
            status: MaintenanceStatus::Pending,
            description: description.into(),
            reported_at: Timestamp::now(),
        }
    }

    /// Whether this request blocks the room from becoming Available.
    pub fn is_blocking(&self) -> bool {
        self.category.is_safety_critical()
            && self.priority.blocks_availability()
            && self.status.is_open()
    }
}

/// The maintenance subsystem could not be reached.
#[derive(Error, Debug)]
pub enum OracleError {
    /// Connection, schema, or subsystem absence. Callers fail open.
    #[error("maintenance subsystem unavailable: {0}")]
    Unavailable(String),
}

/// Read-only capability deciding whether maintenance issues block a room
/// from becoming Available.
///
/// Injected into the state machine; see the module docs for the blocking
/// policy and the fail-open contract.
pub trait ConflictOracle: Send + Sync {
    /// Count unresolved, blocking issues for one room.
    fn count_blocking_issues(&self, room_id: RoomId) -> Result<usize, OracleError>;
}

/// In-memory maintenance request ledger backing the oracle.
///
/// Carries just enough of the maintenance workflow to gate room-status
/// transitions: filing a request, moving its status, and listing per room.
/// Scheduling and assignment live elsewhere.
#[derive(Debug, Default)]
pub struct MaintenanceLedger {
    requests: RwLock<HashMap<RequestId, MaintenanceRequest>>,
}

impl MaintenanceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// File a request, returning its id.
    pub fn file(&self, request: MaintenanceRequest) -> RequestId {
        let id = request.id;
        self.read_write().insert(id, request);
        id
    }

    /// Move a request to a new status. Returns the updated request, or
    /// `None` if the id is unknown.
    pub fn update_status(
        &self,
        id: RequestId,
        status: MaintenanceStatus,
    ) -> Option<MaintenanceRequest> {
        let mut requests = self.read_write();
        let request = requests.get_mut(&id)?;
        request.status = status;
        Some(request.clone())
    }

    /// Look up a request by id.
    pub fn get(&self, id: RequestId) -> Option<MaintenanceRequest> {
        self.read_only().get(&id).cloned()
    }

    /// All requests for one room, newest first.
    pub fn requests_for_room(&self, room_id: RoomId) -> Vec<MaintenanceRequest> {
        let mut requests: Vec<_> = self
            .read_only()
            .values()
            .filter(|r| r.room_id == room_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
        requests
    }

    /// All requests, for persistence.
    pub fn snapshot(&self) -> Vec<MaintenanceRequest> {
        let mut requests: Vec<_> = self.read_only().values().cloned().collect();
        requests.sort_by(|a, b| a.reported_at.cmp(&b.reported_at));
        requests
    }

    /// Rebuild a ledger from a snapshot.
    pub fn restore(requests: Vec<MaintenanceRequest>) -> Self {
        Self {
            requests: RwLock::new(requests.into_iter().map(|r| (r.id, r)).collect()),
        }
    }

    fn read_only(&self) -> std::sync::RwLockReadGuard<'_, HashMap<RequestId, MaintenanceRequest>> {
        self.requests.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_write(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<RequestId, MaintenanceRequest>> {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConflictOracle for MaintenanceLedger {
    fn count_blocking_issues(&self, room_id: RoomId) -> Result<usize, OracleError> {
        Ok(self
            .read_only()
            .values()
            .filter(|r| r.room_id == room_id && r.is_blocking())
            .count())
    }
}

/// Oracle for deployments with no maintenance subsystem at all: reports no
/// conflicts for every room.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOracle;

impl ConflictOracle for NullOracle {
    fn count_blocking_issues(&self, _room_id: RoomId) -> Result<usize, OracleError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocking_request(room_id: RoomId) -> MaintenanceRequest {
        MaintenanceRequest::new(
            room_id,
            MaintenanceCategory::Plumbing,
            MaintenancePriority::High,
            "burst pipe under the sink",
        )
    }

    #[test]
    fn test_blocking_policy_table() {
        use MaintenanceCategory::*;
        use MaintenancePriority::*;

        let room_id = RoomId::new();
        let cases = [
            (Plumbing, High, true),
            (Electrical, Urgent, true),
            (Hvac, High, true),
            (Safety, Urgent, true),
            (Plumbing, Low, false),
            (Safety, Medium, false),
            (Furniture, Urgent, false),
            (Cosmetic, High, false),
        ];
        for (category, priority, expected) in cases {
            let request = MaintenanceRequest::new(room_id, category, priority, "test");
            assert_eq!(
                request.is_blocking(),
                expected,
                "category {category}, priority {priority}"
            );
        }
    }

    #[test]
    fn test_resolved_requests_never_block() {
        let room_id = RoomId::new();
        let mut request = blocking_request(room_id);
        request.status = MaintenanceStatus::Resolved;
        assert!(!request.is_blocking());
        request.status = MaintenanceStatus::Cancelled;
        assert!(!request.is_blocking());
    }

    #[test]
    fn test_ledger_counts_only_blocking_for_room() {
        let ledger = MaintenanceLedger::new();
        let room_a = RoomId::new();
        let room_b = RoomId::new();

        ledger.file(blocking_request(room_a));
        ledger.file(MaintenanceRequest::new(
            room_a,
            MaintenanceCategory::Cosmetic,
            MaintenancePriority::Urgent,
            "scuffed wall",
        ));
        ledger.file(blocking_request(room_b));

        assert_eq!(ledger.count_blocking_issues(room_a).unwrap(), 1);
        assert_eq!(ledger.count_blocking_issues(room_b).unwrap(), 1);
        assert_eq!(ledger.count_blocking_issues(RoomId::new()).unwrap(), 0);
    }

    #[test]
    fn test_resolving_unblocks() {
        let ledger = MaintenanceLedger::new();
        let room_id = RoomId::new();
        let id = ledger.file(blocking_request(room_id));

        assert_eq!(ledger.count_blocking_issues(room_id).unwrap(), 1);

        // In progress still blocks; resolved does not.
        ledger.update_status(id, MaintenanceStatus::InProgress);
        assert_eq!(ledger.count_blocking_issues(room_id).unwrap(), 1);
        ledger.update_status(id, MaintenanceStatus::Resolved);
        assert_eq!(ledger.count_blocking_issues(room_id).unwrap(), 0);
    }

    #[test]
    fn test_update_status_unknown_id() {
        let ledger = MaintenanceLedger::new();
        assert!(ledger
            .update_status(RequestId::new(), MaintenanceStatus::Resolved)
            .is_none());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let ledger = MaintenanceLedger::new();
        let room_id = RoomId::new();
        let id = ledger.file(blocking_request(room_id));

        let restored = MaintenanceLedger::restore(ledger.snapshot());
        assert_eq!(restored.get(id).unwrap().room_id, room_id);
        assert_eq!(restored.count_blocking_issues(room_id).unwrap(), 1);
    }

    #[test]
    fn test_null_oracle_reports_no_conflicts() {
        assert_eq!(
            NullOracle.count_blocking_issues(RoomId::new()).unwrap(),
            0
        );
    }
}
