//! Rendering a [`PayReport`] into its artifact text.
//!
//! The Markdown layout mirrors the printed pay report drivers hand on: the
//! driver's name, then one table with a row per trip and five summary rows.
//! GFM has no merged cells, so each summary value sits in the ORDER column
//! and the remaining cells stay blank.

use crate::config::ReportFormat;
use crate::error::SettlementError;
use crate::output::{PayReport, Settlement, EMPTY_REPORT_BODY};

/// Column headings of the pay table.
pub const TABLE_HEADER: [&str; 5] = ["DATE", "ORDER", "MILES", "RATE (cents)", "PICKUPS"];

/// Summary row labels, in print order.
pub const SUMMARY_LABELS: [&str; 5] = [
    "TOTAL MILES",
    "TOTAL PAY",
    "TOTAL PICKUPS",
    "HST",
    "FINAL PAY",
];

/// Render `report` in the requested format.
pub fn render(report: &PayReport, format: ReportFormat) -> Result<String, SettlementError> {
    match format {
        ReportFormat::Markdown => Ok(render_markdown(report)),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)
                .map_err(|e| SettlementError::Internal(format!("JSON serialisation: {e}")))?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render `report` as a Markdown document.
pub fn render_markdown(report: &PayReport) -> String {
    match report {
        PayReport::Empty => format!("{EMPTY_REPORT_BODY}\n"),
        PayReport::Settlement(s) => render_settlement(s),
    }
}

fn render_settlement(s: &Settlement) -> String {
    let mut out = String::with_capacity(256 + s.trips.len() * 96);
    out.push_str(&escape_cell(&s.driver_name));
    out.push_str("\n\n");

    push_row(&mut out, TABLE_HEADER.iter().map(|h| format!("**{h}**")));
    push_row(&mut out, TABLE_HEADER.iter().map(|_| "---".to_string()));

    let rate = s.rate.to_string();
    for trip in &s.trips {
        push_row(
            &mut out,
            [
                escape_cell(&s.date_range),
                escape_cell(&trip.summary()),
                trip.miles.to_string(),
                rate.clone(),
                trip.pickups.to_string(),
            ],
        );
    }

    let t = &s.totals;
    let values = [
        t.total_miles.to_string(),
        t.total_pay.to_string(),
        t.total_pickup_fee.to_string(),
        t.hst.to_string(),
        t.final_pay.to_string(),
    ];
    for (label, value) in SUMMARY_LABELS.iter().zip(values) {
        push_row(
            &mut out,
            [
                format!("**{label}**"),
                value,
                String::new(),
                String::new(),
                String::new(),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, cells: impl IntoIterator<Item = String>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&cell);
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
