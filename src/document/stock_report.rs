use crate::config::Organization;
use crate::report::ReconciledStock;

use super::{Align, ColumnAlign, Document, Instruction, OutputAction, PageSize};

/// Header block positions on the A4 page, mm.
const ORG_NAME_Y: f64 = 10.0;
const REGION_Y: f64 = 18.0;
const TITLE_Y: f64 = 26.0;
const TABLE_START_Y: f64 = 35.0;

/// Global report, so the filename is a fixed literal rather than being
/// parameterized by school.
const STOCK_REPORT_FILENAME: &str = "Stock_Report.pdf";

/// Build the page-width stock table over the whole reconciled set. There
/// is no selection step and nothing to validate, so this cannot fail.
pub fn build_stock_report(stock: &[ReconciledStock], org: &Organization) -> Document {
    let centered = |content: String, y: f64, font_size: f64| Instruction::Text {
        content,
        x: 0.0, // centered on the page, x unused
        y,
        align: Align::Center,
        max_width: None,
        font_size,
        bold: false,
    };

    let headers = ["Product Name", "Received", "Balance", "Disbursed"]
        .map(String::from)
        .to_vec();
    let rows: Vec<Vec<String>> = stock
        .iter()
        .map(|item| {
            vec![
                item.product_name.clone(),
                item.received.to_string(),
                item.balance.to_string(),
                item.disbursed.to_string(),
            ]
        })
        .collect();

    let instructions = vec![
        centered(org.name.clone(), ORG_NAME_Y, 14.0),
        centered(org.region.clone(), REGION_Y, 12.0),
        centered("Stock Report".to_string(), TITLE_Y, 16.0),
        Instruction::Table {
            headers,
            rows,
            start_y: TABLE_START_Y,
            alignments: vec![
                ColumnAlign::Left,
                ColumnAlign::Right,
                ColumnAlign::Right,
                ColumnAlign::Right,
            ],
        },
    ];

    Document {
        page: PageSize::A4,
        instructions,
        action: OutputAction::Save(STOCK_REPORT_FILENAME.to_string()),
    }
}
