//! Layout walk shared by every canvas backend.

use chrono::{DateTime, Utc};

use super::ReportCanvas;
use crate::history::{CategorizedHistory, Outcome};
use crate::thresholds::format_mm_ss;

// Vertical cursor, in millimeters from the top of the page.
const FIRST_PAGE_TOP: f64 = 20.0;
const CONTINUATION_TOP: f64 = 10.0;
const PAGE_BOTTOM: f64 = 280.0;
const LINE_STEP: f64 = 6.0;

/// Walk the categorized snapshot and issue draw commands: a centered
/// title, one heading per mode, one subheading per non-empty bucket in
/// fixed order, one `speaker: mm:ss` line per entry. The cursor breaks
/// to a new page once it moves past the bottom margin.
pub fn render(
    canvas: &mut dyn ReportCanvas,
    categorized: &CategorizedHistory,
    title: &str,
    now: DateTime<Utc>,
) {
    let mut y = FIRST_PAGE_TOP;

    canvas.set_font_size(18.0);
    canvas.set_gray(0);
    canvas.text_centered(y, &format!("{} - {}", title, now.format("%Y-%m-%d %H:%M:%S")));
    y += 10.0;

    for (mode, buckets) in categorized {
        canvas.set_font_size(16.0);
        canvas.set_gray(0);
        y += 10.0;
        canvas.text(10.0, y, mode.label());
        y += LINE_STEP;

        for outcome in Outcome::ALL {
            let entries = buckets.bucket(outcome);
            if entries.is_empty() {
                continue;
            }
            canvas.set_font_size(14.0);
            canvas.set_gray(100);
            canvas.text(14.0, y, outcome.label());
            y += LINE_STEP;

            for entry in entries {
                canvas.set_font_size(12.0);
                canvas.set_gray(50);
                let line = format!("{}: {}", entry.speaker, format_mm_ss(entry.duration_secs));
                canvas.text(18.0, y, &line);
                y += LINE_STEP;

                if y > PAGE_BOTTOM {
                    canvas.add_page();
                    y = CONTINUATION_TOP;
                }
            }
        }
    }
}
