//! # hms CLI Entry Point
//!
//! Assembles subcommands, loads the state file, dispatches, and writes
//! the file back when a command mutated state.

use std::path::PathBuf;

use clap::Parser;

use hms_cli::statefile::StateFile;
use hms_store::RoomStore;

/// HMS Stack CLI — hotel room lifecycle tooling.
///
/// Provisions rooms, drives status changes through the protected state
/// machine, gates availability on maintenance requests, and verifies the
/// audit chain.
#[derive(Parser, Debug)]
#[command(name = "hms", version, about)]
struct Cli {
    /// Path to the JSON state file.
    #[arg(long, global = true, default_value = "hms-state.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Provision and operate rooms.
    Room(hms_cli::rooms::RoomArgs),
    /// Inspect the state graph itself.
    Status(hms_cli::status::StatusArgs),
    /// File and progress maintenance requests.
    Maintenance(hms_cli::maintenance::MaintenanceArgs),
    /// Verify and inspect the audit chain.
    Audit(hms_cli::audit::AuditArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let file = StateFile::new(cli.state_file);
    let machine = file.load()?;
    tracing::debug!(
        rooms = machine.store().list_rooms().len(),
        state_file = %file.path().display(),
        "state file loaded"
    );

    let mutated = match cli.command {
        Commands::Room(args) => hms_cli::rooms::run(&machine, args)?,
        Commands::Status(args) => {
            hms_cli::status::run(args)?;
            false
        }
        Commands::Maintenance(args) => hms_cli::maintenance::run(&machine, args)?,
        Commands::Audit(args) => {
            hms_cli::audit::run(&machine, args)?;
            false
        }
    };

    if mutated {
        file.save(&machine)?;
    }

    Ok(())
}
