//! Paginated report rendering and export.
//!
//! The layout engine walks a categorized history snapshot and issues
//! draw commands to a [`ReportCanvas`]; everything below the trait
//! (fonts, units, page assembly) belongs to the backend. Two backends
//! ship: a minimal built-in PDF writer and a plain-text renderer for
//! previews and tests.

mod layout;
mod pdf;
mod text;

pub use layout::render;
pub use pdf::PdfCanvas;
pub use text::TextCanvas;

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::error::Result;
use crate::history::CategorizedHistory;

/// Draw-command surface the layout engine renders through.
///
/// Coordinates are millimeters from the top-left of an A4 portrait
/// page.
pub trait ReportCanvas {
    /// Set the font size for subsequent text, in points.
    fn set_font_size(&mut self, pt: f64);
    /// Set the text gray level: 0 is black, 255 is white.
    fn set_gray(&mut self, level: u8);
    /// Draw `s` with its baseline at (`x_mm`, `y_mm`).
    fn text(&mut self, x_mm: f64, y_mm: f64, s: &str);
    /// Draw `s` horizontally centered at `y_mm`.
    fn text_centered(&mut self, y_mm: f64, s: &str);
    /// Start a new page; subsequent commands draw there.
    fn add_page(&mut self);
}

/// Filename for an exported report: the prefix plus a UTC timestamp at
/// second precision, e.g. `Podium_Timer_Report_2026-08-24_14_03_59.pdf`.
pub fn report_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.pdf", prefix, now.format("%Y-%m-%d_%H_%M_%S"))
}

/// Render `categorized` into a PDF file at `path`, headed by `title`
/// and the current timestamp. Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn export_pdf(categorized: &CategorizedHistory, title: &str, path: &Path) -> Result<usize> {
    let mut canvas = PdfCanvas::new();
    render(&mut canvas, categorized, title, Utc::now());
    let bytes = canvas.finish();
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "report exported");
    Ok(bytes.len())
}
