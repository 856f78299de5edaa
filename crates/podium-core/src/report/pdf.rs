//! Minimal built-in PDF backend.
//!
//! Emits PDF 1.4 with a single Type1 Helvetica font and text-only
//! content streams: enough to carry the report layout, not a general
//! PDF library. Pages are A4 portrait; the layout's top-down millimeter
//! coordinates are converted to PDF's bottom-up point space here.

use super::ReportCanvas;

const PAGE_WIDTH_PT: f64 = 595.28;
const PAGE_HEIGHT_PT: f64 = 841.89;
const MM_TO_PT: f64 = 72.0 / 25.4;

// Average Helvetica glyph width as a fraction of the font size. Centering
// uses this instead of embedded font metrics.
const AVG_GLYPH_WIDTH: f64 = 0.5;

/// Accumulates draw commands into per-page content streams and
/// assembles the document in [`PdfCanvas::finish`].
pub struct PdfCanvas {
    completed: Vec<String>,
    current: String,
    font_size: f64,
    gray: u8,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            completed: Vec::new(),
            current: String::new(),
            font_size: 12.0,
            gray: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.completed.len() + 1
    }

    fn draw(&mut self, x_pt: f64, y_mm: f64, s: &str) {
        let y_pt = PAGE_HEIGHT_PT - y_mm * MM_TO_PT;
        self.current.push_str(&format!(
            "BT\n/F1 {} Tf\n{:.3} g\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            self.font_size,
            f64::from(self.gray) / 255.0,
            x_pt,
            y_pt,
            escape(s),
        ));
    }

    /// Assemble the document: header, object table, xref, trailer.
    pub fn finish(mut self) -> Vec<u8> {
        self.completed.push(self.current);
        let page_count = self.completed.len();

        // Object 1 is the catalog, 2 the page tree, 3 the font; page i
        // (0-based) takes 4+2i and its content stream 5+2i.
        let mut objects: Vec<String> = Vec::with_capacity(3 + 2 * page_count);
        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 4 + 2 * i))
            .collect();
        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ));
        objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

        for (i, content) in self.completed.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT} {PAGE_HEIGHT_PT}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ));
        }

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }

        let xref_offset = out.len();
        out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            out.push_str(&format!("{offset:010} 00000 n \n"));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));
        out.into_bytes()
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCanvas for PdfCanvas {
    fn set_font_size(&mut self, pt: f64) {
        self.font_size = pt;
    }

    fn set_gray(&mut self, level: u8) {
        self.gray = level;
    }

    fn text(&mut self, x_mm: f64, y_mm: f64, s: &str) {
        self.draw(x_mm * MM_TO_PT, y_mm, s);
    }

    fn text_centered(&mut self, y_mm: f64, s: &str) {
        let width_pt = s.chars().count() as f64 * self.font_size * AVG_GLYPH_WIDTH;
        let x_pt = ((PAGE_WIDTH_PT - width_pt) / 2.0).max(0.0);
        self.draw(x_pt, y_mm, s);
    }

    fn add_page(&mut self) {
        self.completed.push(std::mem::take(&mut self.current));
    }
}

/// Escape the three characters PDF literal strings reserve.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish_to_string(canvas: PdfCanvas) -> String {
        String::from_utf8(canvas.finish()).unwrap()
    }

    #[test]
    fn single_page_document_has_the_fixed_skeleton() {
        let mut canvas = PdfCanvas::new();
        canvas.set_font_size(18.0);
        canvas.text(10.0, 20.0, "hello");
        let doc = finish_to_string(canvas);

        assert!(doc.starts_with("%PDF-1.4\n"));
        assert!(doc.contains("/Type /Catalog"));
        assert!(doc.contains("/Count 1"));
        assert!(doc.contains("/BaseFont /Helvetica"));
        assert!(doc.contains("/F1 18 Tf"));
        assert!(doc.contains("(hello) Tj"));
        assert!(doc.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn add_page_extends_the_page_tree() {
        let mut canvas = PdfCanvas::new();
        canvas.text(10.0, 20.0, "one");
        canvas.add_page();
        canvas.text(10.0, 10.0, "two");
        assert_eq!(canvas.page_count(), 2);

        let doc = finish_to_string(canvas);
        assert!(doc.contains("/Count 2"));
        assert_eq!(doc.matches("/Type /Page ").count(), 2);
        assert!(doc.contains("/Kids [4 0 R 6 0 R]"));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let mut canvas = PdfCanvas::new();
        canvas.text(10.0, 20.0, r"a(b)c\d");
        let doc = finish_to_string(canvas);
        assert!(doc.contains(r"(a\(b\)c\\d) Tj"));
    }

    #[test]
    fn y_axis_is_flipped_into_point_space() {
        let mut canvas = PdfCanvas::new();
        canvas.text(0.0, 0.0, "top");
        let doc = finish_to_string(canvas);
        // y_mm = 0 sits at the top of the page, which is y_pt = 841.89.
        assert!(doc.contains("0.00 841.89 Td"));
    }

    #[test]
    fn xref_offsets_point_at_their_objects() {
        let mut canvas = PdfCanvas::new();
        canvas.text(10.0, 20.0, "hello");
        let doc = finish_to_string(canvas);

        let startxref = doc
            .split("startxref\n")
            .nth(1)
            .and_then(|tail| tail.lines().next())
            .and_then(|line| line.parse::<usize>().ok())
            .unwrap();
        assert!(doc[startxref..].starts_with("xref\n"));

        // First in-use entry must point at object 1.
        let first_offset = doc[startxref..]
            .lines()
            .nth(3)
            .and_then(|line| line.split_whitespace().next())
            .and_then(|field| field.parse::<usize>().ok())
            .unwrap();
        assert!(doc[first_offset..].starts_with("1 0 obj"));
    }
}
