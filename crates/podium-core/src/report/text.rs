//! Plain-text canvas for terminal previews and layout tests.

use super::ReportCanvas;

// Columns used to center the title line.
const CENTER_COLUMNS: usize = 80;

/// Renders draw commands as indented lines, one `Vec<String>` per page.
/// Font size and gray are presentation-only and ignored here.
pub struct TextCanvas {
    pages: Vec<Vec<String>>,
}

impl TextCanvas {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
        }
    }

    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    /// All pages as one string, separated by `--- page N ---` lines.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, lines) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push_str(&format!("--- page {} ---\n", i + 1));
            }
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    fn push_line(&mut self, line: String) {
        if let Some(page) = self.pages.last_mut() {
            page.push(line);
        }
    }
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCanvas for TextCanvas {
    fn set_font_size(&mut self, _pt: f64) {}

    fn set_gray(&mut self, _level: u8) {}

    fn text(&mut self, x_mm: f64, _y_mm: f64, s: &str) {
        // Map the layout's x positions (10/14/18mm) onto two-space
        // indent levels.
        let level = (((x_mm - 10.0) / 4.0).max(0.0)) as usize;
        self.push_line(format!("{}{}", "  ".repeat(level), s));
    }

    fn text_centered(&mut self, _y_mm: f64, s: &str) {
        let line = format!("{:^width$}", s, width = CENTER_COLUMNS);
        self.push_line(line.trim_end().to_string());
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }
}
