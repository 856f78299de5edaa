use std::str::FromStr;
use std::time::Duration;

use clap::Subcommand;
use colored::Colorize;
use podium_core::{format_mm_ss, Config, Database, DisplayState, Mode, SessionController};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Time a speaker live (Enter stops and records, Ctrl-C abandons)
    Run {
        /// Speaker name
        #[arg(long)]
        speaker: String,
        /// Speaking mode: introductions, table-topics or speeches
        /// (defaults to the configured timer.default_mode)
        #[arg(long)]
        mode: Option<String>,
        /// Stop automatically after N seconds (for scripting)
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            speaker,
            mode,
            ticks,
        } => run_session(&speaker, mode.as_deref(), ticks),
        TimerAction::Status => {
            // Sessions live only inside `timer run`, so the snapshot is
            // always idle here.
            let ctl = SessionController::init(Database::open()?)?;
            println!("{}", serde_json::to_string_pretty(&ctl.snapshot())?);
            Ok(())
        }
    }
}

fn run_session(
    speaker: &str,
    mode: Option<&str>,
    ticks: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mode = match mode {
        Some(raw) => Mode::from_str(raw)?,
        None => config.timer.default_mode,
    };

    let mut ctl = SessionController::init(Database::open()?)?;
    let started = ctl.start(speaker, mode)?;
    println!("{}", serde_json::to_string_pretty(&started)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session_loop(&mut ctl, ticks, config.ui.color))
}

/// Drive the session clock: one engine tick per interval fire, Enter
/// stops and records, Ctrl-C abandons. The interval is dropped on every
/// exit path.
async fn session_loop(
    ctl: &mut SessionController,
    tick_limit: Option<u64>,
    color: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first interval fire is immediate; consume it so the first
    // printed line lands at 00:01.
    interval.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                ctl.tick();
                println!("{}", status_line(ctl, color));
                if let Some(limit) = tick_limit {
                    if ctl.elapsed_secs() >= limit {
                        return stop_and_print(ctl);
                    }
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(_) => return stop_and_print(ctl),
                    None => {
                        stdin_open = false;
                        tracing::debug!("stdin closed; running until the tick limit or Ctrl-C");
                    }
                }
            }
            _ = &mut ctrl_c => {
                ctl.reset();
                println!("session abandoned, nothing recorded");
                return Ok(());
            }
        }
    }
}

fn stop_and_print(ctl: &mut SessionController) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(entry) = ctl.stop()? {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    }
    Ok(())
}

fn status_line(ctl: &SessionController, color: bool) -> String {
    let clock = format_mm_ss(ctl.elapsed_secs());
    let state = ctl.display_state();
    if !color {
        return format!("{clock}  {state}");
    }
    let label = state.to_string();
    let painted = match state {
        DisplayState::Default => label.normal(),
        DisplayState::OnPace => label.green(),
        DisplayState::Warning => label.yellow(),
        DisplayState::OverTime => label.red(),
    };
    format!("{clock}  {painted}")
}
