//! End-to-end lifecycle tests: the full guest journey, forced overrides,
//! conflict blocking, cleaning timestamps, fail-open, and audit behavior.

use hms_core::{RoomId, RoomNumber, StaffId};
use hms_rooms::{RoomStateMachine, StatusChange, StatusChangeError, FORCED_CHANGE_MARKER};
use hms_state::{RoomStatus, TransitionError};
use hms_store::{
    ConflictOracle, InMemoryStore, MaintenanceCategory, MaintenanceLedger, MaintenancePriority,
    MaintenanceRequest, MaintenanceStatus, MemoryTx, NullOracle, OracleError, Room, RoomStore,
    StatusLogEntry, StoreError,
};

use RoomStatus::*;

fn machine_with_room(
    number: &str,
) -> (RoomStateMachine<InMemoryStore, MaintenanceLedger>, RoomId) {
    let store = InMemoryStore::new();
    let room = Room::provision(RoomNumber::new(number).unwrap());
    let id = room.id;
    store.insert_room(room).unwrap();
    (
        RoomStateMachine::new(store, MaintenanceLedger::new()),
        id,
    )
}

#[test]
fn test_full_guest_journey_for_room_101() {
    let (machine, id) = machine_with_room("101");

    // Book, check in.
    let room = machine.change_status(StatusChange::new(id, Booked)).unwrap();
    assert_eq!(room.status, Booked);
    machine.change_status(StatusChange::new(id, Occupied)).unwrap();

    // Front desk cannot shortcut an occupied room straight to available.
    let err = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap_err();
    match err {
        StatusChangeError::Transition(TransitionError::BusinessRule { reason, .. }) => {
            assert!(reason.contains("check out"));
        }
        other => panic!("expected the named business rule, got: {other:?}"),
    }

    // The proper path: checkout, cleaning, available.
    machine.change_status(StatusChange::new(id, Checkout)).unwrap();
    machine.change_status(StatusChange::new(id, Cleaning)).unwrap();
    let room = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap();
    assert_eq!(room.status, Available);
    assert!(room.last_cleaned.is_some());

    // Exactly five audit rows, forming a connected chain.
    let history = machine.store().history(id).unwrap();
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].old_status, Some(Available));
    for pair in history.windows(2) {
        assert_eq!(pair[1].old_status, Some(pair[0].new_status));
    }
    assert_eq!(history[4].new_status, Available);
    assert!(machine.store().verify_chain().chain_valid);
}

#[test]
fn test_forced_override_is_marked_in_audit() {
    let (machine, id) = machine_with_room("202");
    machine
        .change_status(StatusChange::new(id, Maintenance))
        .unwrap();

    let actor = StaffId::new();
    let room = machine
        .change_status(StatusChange::new(id, Available).by(actor).forced())
        .unwrap();
    assert_eq!(room.status, Available);

    let history = machine.store().history(id).unwrap();
    let last = history.last().unwrap();
    assert_eq!(last.actor_id, Some(actor));
    assert!(last.notes.as_deref().unwrap().contains(FORCED_CHANGE_MARKER));
}

#[test]
fn test_force_skips_validation_but_not_conflicts() {
    let (machine, id) = machine_with_room("303");
    machine.change_status(StatusChange::new(id, Booked)).unwrap();
    machine.change_status(StatusChange::new(id, Occupied)).unwrap();

    // Occupied -> Available is forbidden; force pushes it through.
    let room = machine
        .change_status(StatusChange::new(id, Available).forced())
        .unwrap();
    assert_eq!(room.status, Available);
    // Occupied is not a cleaning state, so no cleaning timestamp.
    assert!(room.last_cleaned.is_none());

    // With a blocking issue on file, the same override is refused.
    machine.change_status(StatusChange::new(id, Maintenance)).unwrap();
    machine.oracle().file(MaintenanceRequest::new(
        id,
        MaintenanceCategory::Electrical,
        MaintenancePriority::Urgent,
        "exposed wiring behind headboard",
    ));
    let err = machine
        .change_status(StatusChange::new(id, Available).forced())
        .unwrap_err();
    assert!(matches!(
        err,
        StatusChangeError::Conflict { blocking: 1, .. }
    ));
}

#[test]
fn test_blocking_issue_gates_availability_until_resolved() {
    let (machine, id) = machine_with_room("104");
    machine.change_status(StatusChange::new(id, Maintenance)).unwrap();
    machine.change_status(StatusChange::new(id, Cleaning)).unwrap();

    let request_id = machine.oracle().file(MaintenanceRequest::new(
        id,
        MaintenanceCategory::Plumbing,
        MaintenancePriority::High,
        "shower drain backs up",
    ));

    let err = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap_err();
    assert!(matches!(err, StatusChangeError::Conflict { .. }));
    assert!(!err.is_retryable());

    // Room state is untouched by the rejection.
    assert_eq!(machine.store().get_room(id).unwrap().status, Cleaning);

    machine
        .oracle()
        .update_status(request_id, MaintenanceStatus::Resolved);
    let room = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap();
    assert_eq!(room.status, Available);
}

#[test]
fn test_low_priority_cosmetic_issues_never_block() {
    let (machine, id) = machine_with_room("105");
    machine.change_status(StatusChange::new(id, Maintenance)).unwrap();
    machine.change_status(StatusChange::new(id, Cleaning)).unwrap();

    machine.oracle().file(MaintenanceRequest::new(
        id,
        MaintenanceCategory::Furniture,
        MaintenancePriority::Low,
        "wobbly desk leg",
    ));
    machine.oracle().file(MaintenanceRequest::new(
        id,
        MaintenanceCategory::Cosmetic,
        MaintenancePriority::Urgent,
        "scuffed wallpaper",
    ));

    assert!(machine
        .change_status(StatusChange::new(id, Available))
        .is_ok());
}

#[test]
fn test_cleaning_timestamp_rules() {
    // Cleaning -> Available sets it.
    let (machine, id) = machine_with_room("201");
    machine.change_status(StatusChange::new(id, Maintenance)).unwrap();
    machine.change_status(StatusChange::new(id, Cleaning)).unwrap();
    let room = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap();
    let cleaned = room.last_cleaned.unwrap();

    // Maintenance -> Available leaves it alone.
    machine.change_status(StatusChange::new(id, Maintenance)).unwrap();
    let room = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap();
    assert_eq!(room.last_cleaned, Some(cleaned));
}

#[test]
fn test_forced_checkout_to_available_still_counts_as_cleaned() {
    let (machine, id) = machine_with_room("206");
    machine.change_status(StatusChange::new(id, Booked)).unwrap();
    machine.change_status(StatusChange::new(id, Occupied)).unwrap();
    machine.change_status(StatusChange::new(id, Checkout)).unwrap();

    let room = machine
        .change_status(StatusChange::new(id, Available).forced())
        .unwrap();
    assert!(room.last_cleaned.is_some());
}

#[test]
fn test_out_of_service_reactivation() {
    let (machine, id) = machine_with_room("401");
    machine
        .change_status(StatusChange::new(id, OutOfService))
        .unwrap();

    // Administrative reactivation is a legal edge, no force required,
    // and it is not a cleaning pass.
    let room = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap();
    assert_eq!(room.status, Available);
    assert!(room.last_cleaned.is_none());
}

#[test]
fn test_unknown_room_is_not_found() {
    let (machine, _) = machine_with_room("101");
    let err = machine
        .change_status(StatusChange::new(RoomId::new(), Booked))
        .unwrap_err();
    assert!(matches!(err, StatusChangeError::NotFound { .. }));
}

#[test]
fn test_rejected_change_leaves_no_trace() {
    let (machine, id) = machine_with_room("101");

    let err = machine
        .change_status(StatusChange::new(id, Occupied))
        .unwrap_err();
    assert!(matches!(
        err,
        StatusChangeError::Transition(TransitionError::NotAllowed { .. })
    ));

    assert_eq!(machine.store().get_room(id).unwrap().status, Available);
    assert!(machine.store().history(id).unwrap().is_empty());

    // The lock is released; the next valid change goes through.
    assert!(machine.change_status(StatusChange::new(id, Booked)).is_ok());
}

#[test]
fn test_audit_records_actor_and_notes() {
    let (machine, id) = machine_with_room("102");
    let actor = StaffId::new();
    machine
        .change_status(
            StatusChange::new(id, Booked)
                .by(actor)
                .with_notes("two nights, late arrival"),
        )
        .unwrap();

    let history = machine.store().history(id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].actor_id, Some(actor));
    assert_eq!(history[0].notes.as_deref(), Some("two nights, late arrival"));
    // An unforced change never carries the forced marker.
    assert!(!history[0]
        .notes
        .as_deref()
        .unwrap()
        .contains(FORCED_CHANGE_MARKER));
}

// ── Fail-open and audit-swallow doubles ──────────────────────────────

/// Oracle standing in for a maintenance subsystem that is down.
struct UnreachableOracle;

impl ConflictOracle for UnreachableOracle {
    fn count_blocking_issues(&self, _room_id: RoomId) -> Result<usize, OracleError> {
        Err(OracleError::Unavailable("connection refused".into()))
    }
}

#[test]
fn test_oracle_outage_fails_open() {
    let store = InMemoryStore::new();
    let room = Room::provision(RoomNumber::new("501").unwrap());
    let id = room.id;
    store.insert_room(room).unwrap();
    let machine = RoomStateMachine::new(store, UnreachableOracle);

    machine.change_status(StatusChange::new(id, Maintenance)).unwrap();
    machine.change_status(StatusChange::new(id, Cleaning)).unwrap();

    // The room subsystem keeps working without the maintenance subsystem.
    let room = machine
        .change_status(StatusChange::new(id, Available))
        .unwrap();
    assert_eq!(room.status, Available);
}

/// Store whose audit table is broken; everything else works.
struct FailingAuditStore {
    inner: InMemoryStore,
}

impl RoomStore for FailingAuditStore {
    type Tx = MemoryTx;

    fn get_room_for_update(
        &self,
        id: RoomId,
    ) -> Result<(Self::Tx, Room), StoreError> {
        self.inner.get_room_for_update(id)
    }

    fn save(&self, tx: &mut Self::Tx, room: &Room) -> Result<(), StoreError> {
        self.inner.save(tx, room)
    }

    fn append_log(&self, _tx: &mut Self::Tx, _entry: StatusLogEntry) -> Result<(), StoreError> {
        Err(StoreError::Backend("audit relation missing".into()))
    }

    fn commit(&self, tx: Self::Tx) -> Result<(), StoreError> {
        self.inner.commit(tx)
    }

    fn abort(&self, tx: Self::Tx) {
        self.inner.abort(tx)
    }

    fn get_room(&self, id: RoomId) -> Result<Room, StoreError> {
        self.inner.get_room(id)
    }

    fn find_by_number(&self, number: &RoomNumber) -> Result<Room, StoreError> {
        self.inner.find_by_number(number)
    }

    fn list_rooms(&self) -> Vec<Room> {
        self.inner.list_rooms()
    }

    fn history(&self, id: RoomId) -> Result<Vec<hms_store::RoomStatusLog>, StoreError> {
        self.inner.history(id)
    }
}

#[test]
fn test_audit_failure_does_not_abort_the_change() {
    let inner = InMemoryStore::new();
    let room = Room::provision(RoomNumber::new("601").unwrap());
    let id = room.id;
    inner.insert_room(room).unwrap();
    let machine = RoomStateMachine::new(FailingAuditStore { inner }, NullOracle);

    let room = machine.change_status(StatusChange::new(id, Booked)).unwrap();
    assert_eq!(room.status, Booked);
    assert_eq!(machine.store().get_room(id).unwrap().status, Booked);
    assert!(machine.store().history(id).unwrap().is_empty());
}
