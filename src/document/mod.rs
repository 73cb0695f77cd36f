pub mod invoice;
pub mod receipt;
pub mod stock_report;

pub use invoice::build_invoice;
pub use receipt::build_receipt;
pub use stock_report::build_stock_report;

/// Horizontal alignment of a text run, relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Alignment of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

/// One layout primitive for the rendering backend. Coordinates and
/// lengths are millimeters from the top-left page corner; font sizes are
/// points.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Text {
        content: String,
        x: f64,
        y: f64,
        align: Align,
        /// Wrap width; rendering must not draw past it.
        max_width: Option<f64>,
        font_size: f64,
        bold: bool,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        start_y: f64,
        alignments: Vec<ColumnAlign>,
    },
}

/// Physical page the instructions are laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    /// Narrow thermal-style receipt: fixed width, computed height (mm).
    Receipt { width: f64, height: f64 },
    A4,
}

/// What to do with the rendered document.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputAction {
    Save(String),
    /// Open the rendered document once per physical copy wanted.
    Print { filename: String, copies: u32 },
    Share { filename: String, caption: String },
}

/// A fully laid-out document, ready to hand to the rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSize,
    pub instructions: Vec<Instruction>,
    pub action: OutputAction,
}

const MM_PER_PT: f64 = 0.3528;
/// Average glyph advance as a fraction of the font size, close enough to
/// Helvetica for wrap decisions on short labels.
const GLYPH_WIDTH_EM: f64 = 0.5;

/// Greedy word wrap measured against `max_width` millimeters at the given
/// font size. Long names wrap onto extra lines, never truncate. A single
/// word wider than the limit gets a line of its own.
pub fn wrap_to_width(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let glyph_mm = font_size * MM_PER_PT * GLYPH_WIDTH_EM;
    let max_chars = ((max_width / glyph_mm).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_to_width("ZPHS Main", 48.0, 8.0), vec!["ZPHS Main"]);
    }

    #[test]
    fn long_names_wrap_instead_of_truncating() {
        let lines = wrap_to_width(
            "Zilla Parishad High School Kotananduru Mandal Campus",
            48.0,
            8.0,
        );
        assert!(lines.len() > 1);
        assert_eq!(
            lines.join(" "),
            "Zilla Parishad High School Kotananduru Mandal Campus"
        );
    }

    #[test]
    fn empty_text_still_occupies_one_line() {
        assert_eq!(wrap_to_width("", 48.0, 8.0), vec![""]);
    }
}
