//! Maintenance subcommands: just enough of the request workflow to gate
//! room availability (file, progress, resolve, list).

use anyhow::bail;
use clap::{Args, Subcommand};
use uuid::Uuid;

use hms_core::{RequestId, RoomNumber};
use hms_store::{
    MaintenanceCategory, MaintenancePriority, MaintenanceRequest, MaintenanceStatus, RoomStore,
};

use crate::CliMachine;

#[derive(Args, Debug)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceCommand {
    /// File a new request against a room.
    File {
        /// Room number.
        room: String,
        /// Issue category (PLUMBING, ELECTRICAL, HVAC, SAFETY, FURNITURE,
        /// COSMETIC).
        #[arg(long, value_parser = parse_category)]
        category: MaintenanceCategory,
        /// Issue priority (LOW, MEDIUM, HIGH, URGENT).
        #[arg(long, value_parser = parse_priority)]
        priority: MaintenancePriority,
        /// Free-text description of the issue.
        description: String,
    },
    /// Mark a request as being worked on.
    Start {
        /// Request id (UUID).
        request: Uuid,
    },
    /// Mark a request resolved.
    Resolve {
        /// Request id (UUID).
        request: Uuid,
    },
    /// Withdraw a request without work.
    Cancel {
        /// Request id (UUID).
        request: Uuid,
    },
    /// List the requests filed against a room, newest first.
    List {
        /// Room number.
        room: String,
    },
}

/// Execute a maintenance subcommand. Returns whether state was mutated.
pub fn run(machine: &CliMachine, args: MaintenanceArgs) -> anyhow::Result<bool> {
    match args.command {
        MaintenanceCommand::File {
            room,
            category,
            priority,
            description,
        } => {
            let room = machine.store().find_by_number(&RoomNumber::new(room)?)?;
            let request = MaintenanceRequest::new(room.id, category, priority, description);
            let blocking = request.is_blocking();
            let id = machine.oracle().file(request);
            println!("filed {id} ({category}/{priority}) against {}", room.number);
            if blocking {
                println!("note: this issue blocks {} from becoming AVAILABLE", room.number);
            }
            Ok(true)
        }
        MaintenanceCommand::Start { request } => {
            set_status(machine, request, MaintenanceStatus::InProgress)
        }
        MaintenanceCommand::Resolve { request } => {
            set_status(machine, request, MaintenanceStatus::Resolved)
        }
        MaintenanceCommand::Cancel { request } => {
            set_status(machine, request, MaintenanceStatus::Cancelled)
        }
        MaintenanceCommand::List { room } => {
            let room = machine.store().find_by_number(&RoomNumber::new(room)?)?;
            for request in machine.oracle().requests_for_room(room.id) {
                let marker = if request.is_blocking() { " [BLOCKING]" } else { "" };
                println!(
                    "{} {} {}/{} {}{} {}",
                    request.id,
                    request.reported_at,
                    request.category,
                    request.priority,
                    request.status,
                    marker,
                    request.description
                );
            }
            Ok(false)
        }
    }
}

fn set_status(
    machine: &CliMachine,
    request: Uuid,
    status: MaintenanceStatus,
) -> anyhow::Result<bool> {
    let id = RequestId(request);
    match machine.oracle().update_status(id, status) {
        Some(updated) => {
            println!("{} is now {}", updated.id, updated.status);
            Ok(true)
        }
        None => bail!("no maintenance request {id}"),
    }
}

fn parse_category(s: &str) -> Result<MaintenanceCategory, String> {
    match s.to_ascii_uppercase().as_str() {
        "PLUMBING" => Ok(MaintenanceCategory::Plumbing),
        "ELECTRICAL" => Ok(MaintenanceCategory::Electrical),
        "HVAC" => Ok(MaintenanceCategory::Hvac),
        "SAFETY" => Ok(MaintenanceCategory::Safety),
        "FURNITURE" => Ok(MaintenanceCategory::Furniture),
        "COSMETIC" => Ok(MaintenanceCategory::Cosmetic),
        other => Err(format!(
            "unknown category {other:?}; expected PLUMBING, ELECTRICAL, HVAC, SAFETY, FURNITURE, or COSMETIC"
        )),
    }
}

fn parse_priority(s: &str) -> Result<MaintenancePriority, String> {
    match s.to_ascii_uppercase().as_str() {
        "LOW" => Ok(MaintenancePriority::Low),
        "MEDIUM" => Ok(MaintenancePriority::Medium),
        "HIGH" => Ok(MaintenancePriority::High),
        "URGENT" => Ok(MaintenancePriority::Urgent),
        other => Err(format!(
            "unknown priority {other:?}; expected LOW, MEDIUM, HIGH, or URGENT"
        )),
    }
}
