//! Room subcommands: provisioning, listing, status changes, history, and
//! transition queries.

use clap::{Args, Subcommand};
use uuid::Uuid;

use hms_core::{RoomNumber, StaffId};
use hms_rooms::StatusChange;
use hms_state::RoomStatus;
use hms_store::{Room, RoomStore};

use crate::CliMachine;

#[derive(Args, Debug)]
pub struct RoomArgs {
    #[command(subcommand)]
    pub command: RoomCommand,
}

#[derive(Subcommand, Debug)]
pub enum RoomCommand {
    /// Provision a new room. Rooms start Available.
    Add {
        /// Room number as printed on the door (e.g. 101, 12-B).
        number: String,
    },
    /// List all rooms with their current status.
    List,
    /// Show one room in detail.
    Show {
        /// Room number.
        number: String,
    },
    /// Change a room's status through the protected state machine.
    Change {
        /// Room number.
        number: String,
        /// Target status wire name (e.g. BOOKED, CLEANING).
        status: RoomStatus,
        /// Staff member making the change.
        #[arg(long)]
        actor: Option<Uuid>,
        /// Free-text notes for the audit trail.
        #[arg(long)]
        notes: Option<String>,
        /// Administrative override: skip transition validation (blocking
        /// maintenance issues still apply) and flag the audit row.
        #[arg(long)]
        force: bool,
    },
    /// Show a room's audit history.
    History {
        /// Room number.
        number: String,
    },
    /// Show the legal target statuses for a room right now.
    Transitions {
        /// Room number.
        number: String,
    },
}

/// Execute a room subcommand. Returns whether state was mutated.
pub fn run(machine: &CliMachine, args: RoomArgs) -> anyhow::Result<bool> {
    match args.command {
        RoomCommand::Add { number } => {
            let room = Room::provision(RoomNumber::new(number)?);
            let label = format!("{} ({})", room.number, room.id);
            machine.store().insert_room(room)?;
            println!("provisioned {label}");
            Ok(true)
        }
        RoomCommand::List => {
            for room in machine.store().list_rooms() {
                let cleaned = room
                    .last_cleaned
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<8} {:<14} last cleaned {}",
                    room.number.to_string(),
                    room.status.to_string(),
                    cleaned
                );
            }
            Ok(false)
        }
        RoomCommand::Show { number } => {
            let room = resolve(machine, &number)?;
            println!("room       {}", room.number);
            println!("id         {}", room.id);
            println!("status     {} ({})", room.status, room.status.description());
            match room.last_cleaned {
                Some(t) => println!("cleaned    {t}"),
                None => println!("cleaned    never"),
            }
            println!("created    {}", room.created_at);
            println!("updated    {}", room.updated_at);
            Ok(false)
        }
        RoomCommand::Change {
            number,
            status,
            actor,
            notes,
            force,
        } => {
            let room = resolve(machine, &number)?;
            let old_status = room.status;

            let mut change = StatusChange::new(room.id, status);
            if let Some(actor) = actor {
                change = change.by(StaffId(actor));
            }
            if let Some(notes) = notes {
                change = change.with_notes(notes);
            }
            if force {
                change = change.forced();
            }

            let updated = machine.change_status(change)?;
            println!("{}: {} -> {}", updated.number, old_status, updated.status);
            Ok(true)
        }
        RoomCommand::History { number } => {
            let room = resolve(machine, &number)?;
            for row in machine.store().history(room.id)? {
                let old = row
                    .old_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let actor = row
                    .actor_id
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "system".to_string());
                let notes = row.notes.unwrap_or_default();
                println!(
                    "#{:<4} {} {} -> {} by {} {}",
                    row.seq, row.timestamp, old, row.new_status, actor, notes
                );
            }
            Ok(false)
        }
        RoomCommand::Transitions { number } => {
            let room = resolve(machine, &number)?;
            println!("{} is {}; legal targets:", room.number, room.status);
            for target in room.status.valid_transitions() {
                println!("  {:<16} {}", target.to_string(), target.description());
            }
            Ok(false)
        }
    }
}

fn resolve(machine: &CliMachine, number: &str) -> anyhow::Result<Room> {
    Ok(machine
        .store()
        .find_by_number(&RoomNumber::new(number)?)?)
}
