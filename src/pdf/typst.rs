use std::fmt::Write as _;
use std::path::Path;
use std::process::Command;

use crate::document::{Align, ColumnAlign, Document, Instruction, PageSize};
use crate::error::{ReportError, Result};

/// Tables sit inside the page with the same side margin the layouts were
/// measured against (mm).
const TABLE_MARGIN_X: f64 = 14.0;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '#' | '[' | ']' | '*' | '_' | '`' | '$' | '<' | '>' | '@') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn column_align(align: ColumnAlign) -> &'static str {
    match align {
        ColumnAlign::Left => "left",
        ColumnAlign::Center => "center",
        ColumnAlign::Right => "right",
    }
}

/// Translate a laid-out document into Typst markup. Everything is placed
/// absolutely from the top-left corner, matching the coordinates the
/// layout engines computed.
pub fn typst_source(doc: &Document) -> String {
    let mut src = String::new();

    match doc.page {
        PageSize::Receipt { width, height } => {
            let _ = writeln!(
                src,
                "#set page(width: {width:.1}mm, height: {height:.1}mm, margin: 0mm)"
            );
        }
        PageSize::A4 => {
            let _ = writeln!(src, "#set page(paper: \"a4\", margin: 0mm)");
        }
    }
    let _ = writeln!(src, "#set text(font: \"Helvetica\", size: 10pt)");

    for instruction in &doc.instructions {
        match instruction {
            Instruction::Text {
                content,
                x,
                y,
                align,
                max_width,
                font_size,
                bold,
            } => {
                let weight = if *bold { ", weight: \"bold\"" } else { "" };
                let body = format!("#text(size: {font_size}pt{weight})[{}]", escape(content));
                let body = match max_width {
                    Some(w) => format!("#box(width: {w:.1}mm)[{body}]"),
                    None => body,
                };
                match align {
                    Align::Left => {
                        let _ = writeln!(
                            src,
                            "#place(top + left, dx: {x:.1}mm, dy: {y:.1}mm)[{body}]"
                        );
                    }
                    // Centered runs center on the page, the x coordinate is
                    // the page midline by construction.
                    Align::Center => {
                        let _ = writeln!(src, "#place(top + center, dy: {y:.1}mm)[{body}]");
                    }
                }
            }
            Instruction::Line { x1, y1, x2, y2, width } => {
                let _ = writeln!(
                    src,
                    "#place(top + left, dx: {x1:.1}mm, dy: {y1:.1}mm)[#line(end: ({:.1}mm, {:.1}mm), stroke: {width}mm + black)]",
                    x2 - x1,
                    y2 - y1,
                );
            }
            Instruction::Table {
                headers,
                rows,
                start_y,
                alignments,
            } => {
                let columns = vec!["1fr"; headers.len()].join(", ");
                let aligns = alignments
                    .iter()
                    .copied()
                    .map(column_align)
                    .collect::<Vec<_>>()
                    .join(", ");

                let _ = writeln!(
                    src,
                    "#place(top + left, dx: {TABLE_MARGIN_X:.1}mm, dy: {start_y:.1}mm)[#table("
                );
                let _ = writeln!(src, "  columns: ({columns}),");
                let _ = writeln!(src, "  align: ({aligns}),");
                let _ = writeln!(src, "  stroke: 0.5pt + black,");
                let _ = writeln!(
                    src,
                    "  table.header({}),",
                    headers
                        .iter()
                        .map(|h| format!("[*{}*]", escape(h)))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                for row in rows {
                    let _ = writeln!(
                        src,
                        "  {},",
                        row.iter()
                            .map(|cell| format!("[{}]", escape(cell)))
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                }
                let _ = writeln!(src, ")]");
            }
        }
    }

    src
}

/// Compile a document to PDF using the Typst CLI.
pub fn compile(doc: &Document, output_path: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();
    if typst_check.is_err() {
        return Err(ReportError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join("supplytrack");
    std::fs::create_dir_all(&temp_dir)?;

    let template_path = temp_dir.join("document.typ");
    std::fs::write(&template_path, typst_source(doc))?;

    let output = Command::new("typst")
        .args([
            "compile",
            "--root",
            temp_dir.to_str().unwrap_or("."),
            template_path.to_str().unwrap_or("document.typ"),
        ])
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReportError::PdfGeneration(stderr.to_string()));
    }

    let _ = std::fs::remove_file(&template_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{OutputAction, PageSize};

    #[test]
    fn receipt_page_size_is_emitted_in_mm() {
        let doc = Document {
            page: PageSize::Receipt {
                width: 58.0,
                height: 90.0,
            },
            instructions: vec![],
            action: OutputAction::Save("receipt.pdf".to_string()),
        };
        let src = typst_source(&doc);
        assert!(src.contains("width: 58.0mm, height: 90.0mm"));
    }

    #[test]
    fn markup_characters_are_escaped() {
        let doc = Document {
            page: PageSize::A4,
            instructions: vec![Instruction::Text {
                content: "Crayons #3 [boxed]".to_string(),
                x: 5.0,
                y: 10.0,
                align: Align::Left,
                max_width: None,
                font_size: 8.0,
                bold: false,
            }],
            action: OutputAction::Save("x.pdf".to_string()),
        };
        let src = typst_source(&doc);
        assert!(src.contains(r"Crayons \#3 \[boxed\]"));
    }

    #[test]
    fn table_emits_alignments_in_order() {
        let doc = Document {
            page: PageSize::A4,
            instructions: vec![Instruction::Table {
                headers: vec!["Product Name".into(), "Received".into()],
                rows: vec![vec!["Chalk".into(), "5".into()]],
                start_y: 35.0,
                alignments: vec![ColumnAlign::Left, ColumnAlign::Right],
            }],
            action: OutputAction::Save("x.pdf".to_string()),
        };
        let src = typst_source(&doc);
        assert!(src.contains("align: (left, right)"));
        assert!(src.contains("dy: 35.0mm"));
        assert!(src.contains("[*Product Name*]"));
    }
}
