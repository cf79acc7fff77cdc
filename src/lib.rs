//! # settlement-payreport
//!
//! Turn a trucking driver settlement PDF into a per-trip pay report.
//!
//! ## Why this crate?
//!
//! Carrier settlements are printed statements, not data. Once their text is
//! extracted and flattened there is no grammar left: trips are recognisable
//! only by glued marker words (`KM'sTrip`, `PICKUP`, `MILEAGE`) and by fields
//! sitting at fixed distances from them. This crate segments that token
//! stream, recovers each trip's route and figures, and prices the period so a
//! driver can pay others from it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract    pdfium text of every page (spawn_blocking)
//!  ├─ 2. Normalise  tokens minus stop-words and punctuation
//!  ├─ 3. Header     driver name + settlement period
//!  ├─ 4. Segment    trip blocks │ pickups region
//!  ├─ 5. Resolve    pickup/delivery per trip, figures per trip
//!  ├─ 6. Price      miles × rate, HST, pickup fees, final pay
//!  └─ 7. Render     Markdown table or JSON
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use settlement_payreport::{convert, report, ReportConfig, ReportFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReportConfig::builder().rate(26).build()?;
//!     let report = convert("settlement.pdf", &config).await?;
//!     print!("{}", report::render(&report, ReportFormat::Markdown)?);
//!     Ok(())
//! }
//! ```
//!
//! Already have the text? [`build_report`] is synchronous and needs no pdfium.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `payreport` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ReportConfig, ReportConfigBuilder, ReportFormat};
pub use convert::{build_report, convert, convert_sync, convert_to_dir, write_report};
pub use error::SettlementError;
pub use output::{Alignment, Money, PayReport, PayTotals, Settlement, TripRecord};
pub use pipeline::extract::{PdfiumExtractor, TextExtractor};
