//! Status subcommands: reference output about the state graph itself,
//! independent of any particular room.

use clap::{Args, Subcommand};

use hms_state::{RoomStatus, BUSINESS_RULES};

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(subcommand)]
    pub command: StatusCommand,
}

#[derive(Subcommand, Debug)]
pub enum StatusCommand {
    /// List all seven statuses with their descriptions.
    List,
    /// Show the legal targets from a given status, plus any named rules
    /// explaining forbidden shortcuts.
    Transitions {
        /// Source status wire name (e.g. OCCUPIED).
        from: RoomStatus,
    },
}

/// Execute a status subcommand. Never mutates state.
pub fn run(args: StatusArgs) -> anyhow::Result<()> {
    match args.command {
        StatusCommand::List => {
            for status in RoomStatus::ALL {
                println!("{:<16} {}", status.to_string(), status.description());
            }
        }
        StatusCommand::Transitions { from } => {
            println!("legal targets from {from}:");
            for target in from.valid_transitions() {
                println!("  {:<16} {}", target.to_string(), target.description());
            }
            let named: Vec<_> = BUSINESS_RULES.iter().filter(|r| r.from == from).collect();
            if !named.is_empty() {
                println!("forbidden by rule:");
                for rule in named {
                    println!("  {:<16} {}", rule.to.to_string(), rule.reason);
                }
            }
        }
    }
    Ok(())
}
