//! End-to-end tests over synthetic settlement text.
//!
//! The fixtures reproduce the flattened layout of a real driver settlement:
//! a fixed-position header, glued `KM'sTrip` trip openers, a two-token footer
//! and the itemised PICKUP/MILEAGE lines. PDF tests plug in a fixed-text
//! extractor so no pdfium library is needed.

use settlement_payreport::{
    build_report, convert, convert_to_dir, report, write_report, Money, PayReport, ReportConfig,
    ReportFormat, SettlementError, TextExtractor,
};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

// ── Fixtures ─────────────────────────────────────────────────────────────────

const HEADER: &str = "FALCON MOTOR FREIGHT LTD DRIVER SETTLEMENT STATEMENT Page 1 \
(the) JANE DOE - Period: Mar 03 2024Statement Mar 16 2024Driver\n";

const TRIP_1: &str = "1001KM'sTrip UNIT001234 T1234MILTON ONPICKUP T1234LAVAL QCDELIVER\n";

const TRIP_2: &str = "1002KM'sTrip UNIT001234 Trip T1234NORTH BAY ONPICKUP \
T1234SAINT JEAN RICHELIEU QCDELIVER\n";

const FOOTER: &str = "Trip NoDescriptionQtyRateCAD\n";

const CHARGES: &str = "MILEAGE 100 PICKUP 2 MILEAGE 200 DateSupplier MILEAGE 999\n";

fn settlement_text() -> String {
    [HEADER, TRIP_1, TRIP_2, FOOTER, CHARGES].concat()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct FixedText(String);

impl TextExtractor for FixedText {
    fn extract_text(&self, _path: &Path, _pw: Option<&str>) -> Result<String, SettlementError> {
        Ok(self.0.clone())
    }
}

fn fake_pdf() -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    f.write_all(b"%PDF-1.4\n%fixture\n").unwrap();
    f
}

fn config_with_text(text: String) -> ReportConfig {
    ReportConfig::builder()
        .extractor(Arc::new(FixedText(text)))
        .build()
        .unwrap()
}

// ── Core parsing ─────────────────────────────────────────────────────────────

#[test]
fn full_settlement_report() {
    init_tracing();
    let report = build_report(&settlement_text(), &ReportConfig::default()).unwrap();
    let s = report.settlement().expect("settlement");

    assert_eq!(s.driver_name, "JANE DOE");
    assert_eq!(s.date_range, "Mar 03 2024 to Mar 16 2024");
    assert_eq!(s.rate, 24);

    assert_eq!(s.trips.len(), 2);
    assert_eq!(s.trips[0].summary(), "MILTON, ON to LAVAL, QC");
    assert_eq!((s.trips[0].miles, s.trips[0].pickups), (100, 0));
    assert_eq!(s.trips[1].pickup_location, "NORTH BAY, ON");
    assert_eq!(s.trips[1].delivery_location, "SAINT JEANRICHELIEU, QC");
    assert_eq!((s.trips[1].miles, s.trips[1].pickups), (200, 2));

    assert!(s.alignment.is_aligned());
    assert_eq!(s.totals.total_miles, 300);
    assert_eq!(s.totals.total_pay, Money::from_cents(7200));
    assert_eq!(s.totals.total_pickup_fee, 10);
    assert_eq!(s.totals.hst, Money::from_cents(936));
    assert_eq!(s.totals.final_pay, 91);

    assert_eq!(report.artifact_name(), "JANE DOE Mar 03 2024 to Mar 16 2024");
}

#[test]
fn custom_rate_flows_into_pay_and_rows() {
    let config = ReportConfig::builder().rate(30).build().unwrap();
    let report = build_report(&settlement_text(), &config).unwrap();
    let s = report.settlement().unwrap();
    assert_eq!(s.rate, 30);
    assert_eq!(s.totals.total_pay.to_string(), "90.00");
    assert_eq!(s.totals.hst.to_string(), "11.70");
    // 90.00 + 11.70 + 10 = 111.70
    assert_eq!(s.totals.final_pay, 112);

    let md = report::render_markdown(&report);
    assert!(md.contains("| 100 | 30 | 0 |"), "got:\n{md}");
}

#[test]
fn empty_text_produces_nothing_found() {
    for text in ["", "   \n\n"] {
        let report = build_report(text, &ReportConfig::default()).unwrap();
        assert_eq!(report, PayReport::Empty);
        assert_eq!(report.artifact_name(), "Error");
        assert_eq!(report::render_markdown(&report), "Nothing Found in PDF\n");
    }
}

#[test]
fn short_header_aborts() {
    let err = build_report("FALCON MOTOR FREIGHT", &ReportConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SettlementError::HeaderTooShort {
            found: 3,
            required: 18
        }
    ));
}

#[test]
fn no_trip_markers_gives_zero_rows() {
    let text = [HEADER, FOOTER, "MILEAGE 50 DateSupplier"].concat();
    let report = build_report(&text, &ReportConfig::default()).unwrap();
    let s = report.settlement().unwrap();
    assert!(s.trips.is_empty());
    assert_eq!(s.alignment.trip_blocks, 0);
    // Totals still cover every mileage line.
    assert_eq!(s.totals.total_miles, 50);
}

#[test]
fn missing_footer_is_tolerated() {
    let text = [HEADER, TRIP_1, TRIP_2].concat();
    let report = build_report(&text, &ReportConfig::default()).unwrap();
    let s = report.settlement().unwrap();
    assert_eq!(s.alignment.trip_blocks, 2);
    assert_eq!(s.alignment.mileages, 0);
    assert!(s.trips.is_empty());
    assert_eq!(s.totals.final_pay, 0);
}

#[test]
fn bad_quantity_aborts() {
    let text = [HEADER, TRIP_1, FOOTER, "MILEAGE lots DateSupplier"].concat();
    let err = build_report(&text, &ReportConfig::default()).unwrap_err();
    assert!(matches!(err, SettlementError::InvalidQuantity { marker: "MILEAGE", .. }));
}

#[test]
fn out_of_range_mileage_aborts_instead_of_wrapping() {
    let text = [HEADER, TRIP_1, FOOTER, "MILEAGE 1e18 DateSupplier"].concat();
    let err = build_report(&text, &ReportConfig::default()).unwrap_err();
    assert!(matches!(err, SettlementError::AmountOverflow { .. }));
}

// ── Trip/figure alignment ────────────────────────────────────────────────────

/// Two trip blocks but only one mileage line.
fn misaligned_text() -> String {
    [HEADER, TRIP_1, TRIP_2, FOOTER, "PICKUP 1 MILEAGE 150 DateSupplier"].concat()
}

#[test]
fn misalignment_is_flagged_in_lenient_mode() {
    let report = build_report(&misaligned_text(), &ReportConfig::default()).unwrap();
    let s = report.settlement().unwrap();

    assert!(!s.alignment.is_aligned());
    assert_eq!(s.alignment.trip_blocks, 2);
    assert_eq!(s.alignment.pickup_counts, 1);
    assert_eq!(s.alignment.mileages, 1);

    // Only rows with every column are reported; nothing is invented.
    assert_eq!(s.trips.len(), 1);
    assert_eq!(s.trips[0].miles, 150);
    assert_eq!(s.trips[0].pickups, 1);
    assert_eq!(s.totals.total_miles, 150);
}

#[test]
fn misalignment_fails_in_strict_mode() {
    let config = ReportConfig::builder().strict_alignment(true).build().unwrap();
    let err = build_report(&misaligned_text(), &config).unwrap_err();
    assert!(matches!(
        err,
        SettlementError::Misaligned {
            trips: 2,
            pickups: 1,
            mileages: 1
        }
    ));
}

#[test]
fn aligned_settlement_passes_strict_mode() {
    let config = ReportConfig::builder().strict_alignment(true).build().unwrap();
    assert!(build_report(&settlement_text(), &config).is_ok());
}

// ── PDF entry points ─────────────────────────────────────────────────────────

#[tokio::test]
async fn convert_uses_configured_extractor() {
    let pdf = fake_pdf();
    let report = convert(pdf.path(), &config_with_text(settlement_text()))
        .await
        .unwrap();
    assert_eq!(report.settlement().unwrap().trips.len(), 2);
}

#[tokio::test]
async fn convert_missing_file() {
    let err = convert("/nonexistent/falcon.pdf", &ReportConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SettlementError::FileNotFound { .. }));
}

#[tokio::test]
async fn convert_to_dir_writes_named_markdown() {
    let pdf = fake_pdf();
    let out = tempfile::tempdir().unwrap();
    let path = convert_to_dir(pdf.path(), out.path(), &config_with_text(settlement_text()))
        .await
        .unwrap();

    assert_eq!(
        path.file_name().unwrap(),
        "JANE DOE Mar 03 2024 to Mar 16 2024.md"
    );
    let body = std::fs::read_to_string(&path).unwrap();
    assert!(body.starts_with("JANE DOE\n\n"));
    assert!(body.contains("| **FINAL PAY** | 91 |"));
    // No temp file left behind.
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn empty_pdf_writes_error_artifact() {
    let pdf = fake_pdf();
    let out = tempfile::tempdir().unwrap();
    let path = convert_to_dir(pdf.path(), out.path(), &config_with_text(String::new()))
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "Error.md");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Nothing Found in PDF\n"
    );
}

#[tokio::test]
async fn json_artifact() {
    let report = build_report(&settlement_text(), &ReportConfig::default()).unwrap();
    let config = ReportConfig::builder()
        .format(ReportFormat::Json)
        .build()
        .unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = write_report(&report, out.path(), &config).await.unwrap();

    assert_eq!(path.extension().unwrap(), "json");
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["totals"]["final_pay"], 91);
    assert_eq!(v["alignment"]["trip_blocks"], 2);
}
