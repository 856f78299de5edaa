use std::io::Write;

use chrono::Utc;
use clap::Subcommand;
use podium_core::{format_mm_ss, Database, Event, Outcome, SessionController};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded sessions in recording order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every recorded session
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctl = SessionController::init(Database::open()?)?;
    match action {
        HistoryAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ctl.history())?);
            } else {
                for entry in ctl.history().entries() {
                    println!(
                        "{}  {:<13}  {}: {}  [{}]",
                        entry.recorded_at.format("%Y-%m-%d %H:%M"),
                        entry.mode.label(),
                        entry.speaker,
                        format_mm_ss(entry.duration_secs),
                        Outcome::for_entry(entry).label(),
                    );
                }
            }
        }
        HistoryAction::Clear { yes } => {
            if !yes && !confirm(ctl.history().len())? {
                // Declined: print nothing, change nothing.
                return Ok(());
            }
            let removed = ctl.clear_history()?;
            let event = Event::HistoryCleared {
                removed,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}

fn confirm(count: usize) -> Result<bool, Box<dyn std::error::Error>> {
    print!("remove {count} recorded sessions? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
