use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use podium_core::{
    export_pdf, render, report_filename, Config, Database, SessionController, TextCanvas,
};
use serde::Serialize;

#[derive(Subcommand)]
pub enum ReportAction {
    /// Render the categorized history into a PDF file
    Export {
        /// Output directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the report layout as plain text
    Preview,
}

#[derive(Serialize)]
struct ExportSummary {
    path: PathBuf,
    bytes: usize,
}

pub fn run(action: ReportAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let ctl = SessionController::init(Database::open()?)?;
    let categorized = ctl.categorized();

    match action {
        ReportAction::Export { out, json } => {
            let dir = out.unwrap_or_else(|| PathBuf::from("."));
            let path = dir.join(report_filename(&config.report.prefix, Utc::now()));
            let bytes = export_pdf(&categorized, &config.report.title, &path)?;
            if json {
                let summary = ExportSummary { path, bytes };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", path.display());
            }
        }
        ReportAction::Preview => {
            let mut canvas = TextCanvas::new();
            render(&mut canvas, &categorized, &config.report.title, Utc::now());
            print!("{}", canvas.to_text());
        }
    }
    Ok(())
}
