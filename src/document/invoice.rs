use crate::config::Organization;
use crate::error::{ReportError, Result};
use crate::model::Request;
use crate::report::grouping::date_key;

use super::{Align, ColumnAlign, Document, Instruction, OutputAction, PageSize};

/// Vertical positions on the A4 page, mm.
const MAIN_TITLE_Y: f64 = 15.0;
const SUBTITLE_Y: f64 = 25.0;
const TABLE_START_Y: f64 = 35.0;

const TITLE_FONT_SIZE: f64 = 12.0;

/// Filenames keep the school name, spaces folded to underscores.
fn invoice_filename(school_name: &str) -> String {
    format!(
        "Approved_Requests_Invoice_{}.pdf",
        school_name.replace(' ', "_")
    )
}

/// Build the full-page invoice: one table row per selected request, no
/// aggregation. Fails with `EmptySelection` when nothing is selected.
pub fn build_invoice(
    selected: &[&Request],
    school_name: &str,
    org: &Organization,
) -> Result<Document> {
    if selected.is_empty() {
        return Err(ReportError::EmptySelection);
    }

    let centered = |content: String, y: f64| Instruction::Text {
        content,
        x: 0.0, // centered on the page, x unused
        y,
        align: Align::Center,
        max_width: None,
        font_size: TITLE_FONT_SIZE,
        bold: false,
    };

    let headers = ["Product", "Quantity", "Status", "Created At"]
        .map(String::from)
        .to_vec();
    let rows: Vec<Vec<String>> = selected
        .iter()
        .map(|request| {
            vec![
                request.product_name().to_string(),
                request.requested_quantity.to_string(),
                request.status.to_string(),
                date_key(request.created_at),
            ]
        })
        .collect();

    let instructions = vec![
        centered(org.name.clone(), MAIN_TITLE_Y),
        centered(
            format!("Approved Requests Invoice of {school_name}"),
            SUBTITLE_Y,
        ),
        Instruction::Table {
            headers,
            rows,
            start_y: TABLE_START_Y,
            alignments: vec![ColumnAlign::Center; 4],
        },
    ];

    Ok(Document {
        page: PageSize::A4,
        instructions,
        action: OutputAction::Save(invoice_filename(school_name)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequestStatus;
    use crate::report::grouping::test_request;
    use chrono::{TimeZone, Utc};

    fn org() -> Organization {
        Organization {
            name: "Sample Supply Mission".to_string(),
            short_name: "SSM".to_string(),
            issuer: "District Office".to_string(),
            region: "Sample Mandal".to_string(),
        }
    }

    #[test]
    fn empty_selection_is_refused() {
        let err = build_invoice(&[], "ZPHS Main", &org()).unwrap_err();
        assert!(matches!(err, ReportError::EmptySelection));
    }

    #[test]
    fn one_row_per_request_no_aggregation() {
        let day = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = test_request("a", "Pencils", 10, day);
        let b = test_request("b", "Pencils", 3, day);

        let doc = build_invoice(&[&a, &b], "ZPHS Main", &org()).unwrap();

        let Instruction::Table { rows, alignments, .. } = &doc.instructions[2] else {
            panic!("third instruction should be the table");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["Pencils", "10", "Approved", "01/05/2024"]);
        assert_eq!(alignments, &vec![ColumnAlign::Center; 4]);
    }

    #[test]
    fn unresolved_product_uses_placeholder() {
        let day = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut req = test_request("a", "x", 1, day);
        req.product = None;
        req.status = RequestStatus::Pending;

        let doc = build_invoice(&[&req], "ZPHS Main", &org()).unwrap();
        let Instruction::Table { rows, .. } = &doc.instructions[2] else {
            panic!("third instruction should be the table");
        };
        assert_eq!(rows[0][0], "N/A");
        assert_eq!(rows[0][2], "Pending");
    }

    #[test]
    fn filename_incorporates_school_name() {
        let day = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = test_request("a", "Pencils", 10, day);

        let doc = build_invoice(&[&a], "ZPHS Main Campus", &org()).unwrap();
        assert_eq!(
            doc.action,
            OutputAction::Save("Approved_Requests_Invoice_ZPHS_Main_Campus.pdf".to_string())
        );
    }

    #[test]
    fn header_names_the_organization_and_school() {
        let day = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = test_request("a", "Pencils", 10, day);
        let doc = build_invoice(&[&a], "ZPHS Main", &org()).unwrap();

        let Instruction::Text { content, align, .. } = &doc.instructions[0] else {
            panic!("first instruction should be the main title");
        };
        assert_eq!(content, "Sample Supply Mission");
        assert_eq!(*align, Align::Center);

        let Instruction::Text { content, .. } = &doc.instructions[1] else {
            panic!("second instruction should be the subtitle");
        };
        assert_eq!(content, "Approved Requests Invoice of ZPHS Main");
    }
}
