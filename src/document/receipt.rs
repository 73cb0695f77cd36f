use chrono::Local;

use crate::config::Organization;
use crate::error::{ReportError, Result};
use crate::model::School;
use crate::report::{GroupedRequests, SelectionTracker};

use super::{wrap_to_width, Align, Document, Instruction, OutputAction, PageSize};

/// Receipt paper is 58 mm thermal stock; all geometry below is mm on that
/// page.
pub const RECEIPT_WIDTH: f64 = 58.0;
const CONTENT_LEFT: f64 = 5.0;
const CONTENT_RIGHT: f64 = 53.0;
const CENTER_X: f64 = RECEIPT_WIDTH / 2.0;
/// Quantity column of the item table.
const QTY_X: f64 = 45.0;
/// Wrapped receiver name starts right of the "Receiver:" label.
const RECEIVER_TEXT_X: f64 = 20.0;

/// Height formula inputs. The distinct product count is unbounded, so the
/// page height is computed rather than templated.
const BASE_HEIGHT: f64 = 50.0;
const ITEM_ROW_HEIGHT: f64 = 5.0;
/// Space for the three signature fields.
const FOOTER_HEIGHT: f64 = 20.0;
const BOTTOM_MARGIN: f64 = 5.0;

/// Receiver name wraps at this width instead of truncating.
const NAME_WRAP_WIDTH: f64 = 48.0;
/// Product names in the item table wrap tighter, clear of the qty column.
const ITEM_WRAP_WIDTH: f64 = 35.0;

const RULE_WIDTH: f64 = 0.5;

/// Which sink the receipt is headed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptOutput {
    Save,
    /// Two physical copies, issuer and receiver.
    Print,
    Share,
}

/// Required page height for a receipt listing `product_count` distinct
/// products.
pub fn receipt_height(product_count: usize) -> f64 {
    BASE_HEIGHT + ITEM_ROW_HEIGHT * product_count as f64 + FOOTER_HEIGHT + BOTTOM_MARGIN
}

/// Sum selected quantities per product across every date group, walking
/// requests in arrival order so products keep the order they were first
/// encountered in. Requests without a resolved product aggregate under
/// one placeholder row.
fn aggregate_products(
    selection: &SelectionTracker,
    grouped: &GroupedRequests,
) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();

    for request in grouped.flat_arrival() {
        if !selection.is_selected(&request.request_id) {
            continue;
        }
        let name = request
            .product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown Product");

        match totals.iter_mut().find(|(n, _)| n == name) {
            Some((_, qty)) => *qty += u64::from(request.requested_quantity),
            None => totals.push((name.to_string(), u64::from(request.requested_quantity))),
        }
    }

    totals
}

/// Build the compact per-school receipt for the currently selected
/// requests. Fails with `MissingContext` when no school context is
/// present; no partial receipt is produced.
pub fn build_receipt(
    selection: &SelectionTracker,
    grouped: &GroupedRequests,
    school: Option<&School>,
    org: &Organization,
    output: ReceiptOutput,
) -> Result<Document> {
    let school = school.ok_or(ReportError::MissingContext("school context"))?;

    let products = aggregate_products(selection, grouped);
    let height = receipt_height(products.len());

    let mut ins = Vec::new();
    let mut y = 10.0;

    let text = |content: &str, x: f64, y: f64, align: Align, max_width: Option<f64>, size: f64, bold: bool| {
        Instruction::Text {
            content: content.to_string(),
            x,
            y,
            align,
            max_width,
            font_size: size,
            bold,
        }
    };
    let rule = |y: f64| Instruction::Line {
        x1: CONTENT_LEFT,
        y1: y,
        x2: CONTENT_RIGHT,
        y2: y,
        width: RULE_WIDTH,
    };

    // Title block
    let title = format!("{} RECEIPT", org.short_name);
    ins.push(text(&title, CENTER_X, y, Align::Center, None, 12.0, true));
    y += 6.0;

    let issuer = format!("Issuer: {}", org.issuer);
    ins.push(text(&issuer, CONTENT_LEFT, y, Align::Left, None, 9.0, false));
    y += 6.0;

    // Receiver block: label on the left, wrapped school name next to it.
    ins.push(text("Receiver:", CONTENT_LEFT, y, Align::Left, None, 9.0, false));
    let name_lines = wrap_to_width(&school.school_name, NAME_WRAP_WIDTH, 8.0);
    for line in &name_lines {
        ins.push(text(
            line,
            RECEIVER_TEXT_X,
            y,
            Align::Left,
            Some(NAME_WRAP_WIDTH),
            8.0,
            false,
        ));
        y += 5.0;
    }

    // Date/time stamp, local 24-hour clock.
    let now = Local::now();
    let stamp = format!(
        "Date: {} | Time: {}",
        now.format("%d-%m-%Y"),
        now.format("%H:%M")
    );
    ins.push(text(&stamp, CENTER_X, y, Align::Center, None, 8.0, false));

    y += 4.0;
    ins.push(rule(y));
    y += 4.0;

    // Item/quantity table, manual two-column layout.
    ins.push(text("Item", CONTENT_LEFT, y, Align::Left, None, 8.0, false));
    ins.push(text("Qty", QTY_X, y, Align::Left, None, 8.0, false));
    y += 3.0;
    ins.push(rule(y));
    y += 4.0;

    for (product, quantity) in &products {
        ins.push(text(
            product,
            CONTENT_LEFT,
            y,
            Align::Left,
            Some(ITEM_WRAP_WIDTH),
            8.0,
            false,
        ));
        ins.push(text(
            &quantity.to_string(),
            QTY_X,
            y,
            Align::Left,
            None,
            8.0,
            false,
        ));
        y += ITEM_ROW_HEIGHT;
    }

    y += 2.0;
    ins.push(rule(y));
    y += 4.0;

    // Footer: thank-you line and three underlined signature fields.
    ins.push(text("Thank you!", CENTER_X, y, Align::Center, None, 8.0, false));
    y += 6.0;

    for label in ["Receiver Cell No:", "Receiver Sign:", "Issuer Sign:"] {
        ins.push(text(label, CONTENT_LEFT, y, Align::Left, None, 8.0, false));
        ins.push(rule(y + 2.0));
        y += 6.0;
    }

    let action = match output {
        ReceiptOutput::Save => OutputAction::Save("receipt.pdf".to_string()),
        ReceiptOutput::Print => OutputAction::Print {
            filename: "receipt.pdf".to_string(),
            copies: 2,
        },
        ReceiptOutput::Share => OutputAction::Share {
            filename: "receipt.pdf".to_string(),
            caption: format!("Here is your receipt from {}", school.school_name),
        },
    };

    Ok(Document {
        page: PageSize::Receipt {
            width: RECEIPT_WIDTH,
            height,
        },
        instructions: ins,
        action,
    })
}
