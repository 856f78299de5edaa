use std::collections::BTreeMap;
use std::str::FromStr;

use clap::Subcommand;
use podium_core::{Database, Mode, SessionController, ThresholdKind, Thresholds, TimeField};

#[derive(Subcommand)]
pub enum ThresholdsAction {
    /// Show threshold sets
    Show {
        /// Mode to show (all modes when omitted)
        mode: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set one threshold field
    Set {
        /// Mode to edit
        mode: String,
        /// Boundary: on-pace, warning or over-time
        kind: String,
        /// Field: minutes or seconds
        field: String,
        /// New value (seconds clamp to 59)
        value: u32,
    },
    /// Restore built-in defaults
    Reset {
        /// Mode to reset (all modes when omitted)
        mode: Option<String>,
    },
}

pub fn run(action: ThresholdsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctl = SessionController::init(Database::open()?)?;
    match action {
        ThresholdsAction::Show { mode, json } => {
            let modes = selected_modes(mode.as_deref())?;
            if json {
                let map: BTreeMap<&str, Thresholds> = modes
                    .iter()
                    .map(|&m| (m.cli_name(), ctl.thresholds().get(m)))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for m in modes {
                    print_set(m, &ctl.thresholds().get(m));
                }
            }
        }
        ThresholdsAction::Set {
            mode,
            kind,
            field,
            value,
        } => {
            let mode = Mode::from_str(&mode)?;
            let kind = ThresholdKind::from_str(&kind)?;
            let field = TimeField::from_str(&field)?;
            let updated = ctl.set_threshold(mode, kind, field, value)?;
            print_set(mode, &updated);
        }
        ThresholdsAction::Reset { mode } => {
            for m in selected_modes(mode.as_deref())? {
                let restored = ctl.reset_thresholds(m)?;
                print_set(m, &restored);
            }
        }
    }
    Ok(())
}

fn selected_modes(mode: Option<&str>) -> Result<Vec<Mode>, Box<dyn std::error::Error>> {
    match mode {
        Some(raw) => Ok(vec![Mode::from_str(raw)?]),
        None => Ok(Mode::ALL.to_vec()),
    }
}

fn print_set(mode: Mode, set: &Thresholds) {
    println!("{}", mode.label());
    for kind in ThresholdKind::ALL {
        println!("  {:<9}  {}", kind.label(), set.get(kind));
    }
}
