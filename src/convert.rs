//! Conversion entry points.
//!
//! [`build_report`] is the whole parsing core: a synchronous, pure function
//! from flattened settlement text to a [`PayReport`]. The async functions
//! wrap it with input validation, pdfium extraction on a blocking thread, and
//! an atomic artifact write.

use crate::config::ReportConfig;
use crate::error::SettlementError;
use crate::output::{Alignment, PayReport, Settlement, TripRecord};
use crate::pipeline::extract::{self, PdfiumExtractor, TextExtractor};
use crate::pipeline::location::{self, TripLocations};
use crate::pipeline::pickups::{self, PickupsAndMileage};
use crate::pipeline::{header, normalize, pay, segment};
use crate::report;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parse flattened settlement text into a pay report.
///
/// # Errors
/// Returns `Err(SettlementError)` only for fatal conditions: a header shorter
/// than 18 tokens, a trip block without a truck number, an unreadable or
/// out-of-range pickup or mileage quantity, a pay total overflowing `i64`
/// cents, or (with `strict_alignment`) mismatched trip columns. Empty text
/// yields [`PayReport::Empty`].
pub fn build_report(text: &str, config: &ReportConfig) -> Result<PayReport, SettlementError> {
    if text.trim().is_empty() {
        warn!("Settlement text is empty; producing the nothing-found report");
        return Ok(PayReport::Empty);
    }

    // ── Step 1: Normalise ────────────────────────────────────────────────
    let tokens = normalize::normalize(text);

    // ── Step 2: Header ───────────────────────────────────────────────────
    let header = header::extract_header(&tokens)?;
    info!(
        "Settlement for {} ({})",
        header.driver_name, header.date_range
    );

    // ── Step 3: Trip locations ───────────────────────────────────────────
    let blocks = segment::trip_blocks(tokens.as_slice());
    let locations = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| location::resolve_trip(block, i))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Resolved locations for {} trips", locations.len());

    // ── Step 4: Pickups and mileage ──────────────────────────────────────
    let region = segment::pickups_region(tokens.as_slice());
    let figures = pickups::extract_pickups_and_mileage(region)?;

    // ── Step 5: Pay ──────────────────────────────────────────────────────
    let totals = pay::calculate_pay(&figures, &config.pay_rates())?;

    // ── Step 6: Join rows ────────────────────────────────────────────────
    let alignment = Alignment {
        trip_blocks: locations.len(),
        pickup_counts: figures.pickup_counts.len(),
        mileages: figures.mileages.len(),
    };
    if !alignment.is_aligned() {
        if config.strict_alignment {
            return Err(SettlementError::Misaligned {
                trips: alignment.trip_blocks,
                pickups: alignment.pickup_counts,
                mileages: alignment.mileages,
            });
        }
        warn!(
            "Trip columns disagree: {} trip blocks, {} pickup counts, {} mileages; \
             only the first {} rows are reported",
            alignment.trip_blocks,
            alignment.pickup_counts,
            alignment.mileages,
            alignment.joined_rows()
        );
    }
    let trips = join_trips(locations, &figures);

    info!(
        "Report ready: {} trips, {} miles, final pay ${}",
        trips.len(),
        totals.total_miles,
        totals.final_pay
    );

    Ok(PayReport::Settlement(Settlement {
        driver_name: header.driver_name,
        date_range: header.date_range,
        rate: config.rate,
        trips,
        totals,
        alignment,
    }))
}

/// Positional join of trip locations with the numeric columns.
fn join_trips(locations: Vec<TripLocations>, figures: &PickupsAndMileage) -> Vec<TripRecord> {
    locations
        .into_iter()
        .zip(figures.mileages.iter().zip(&figures.pickup_counts))
        .map(|(loc, (&miles, &pickups))| TripRecord {
            pickup_location: loc.pickup,
            delivery_location: loc.delivery,
            miles,
            pickups,
        })
        .collect()
}

/// Extract, parse and price a settlement PDF.
///
/// # Arguments
/// * `input`  — Local path to the settlement PDF
/// * `config` — Rates, strictness, password and optional custom extractor
pub async fn convert(
    input: impl AsRef<Path>,
    config: &ReportConfig,
) -> Result<PayReport, SettlementError> {
    let start = Instant::now();
    let input = input.as_ref();
    info!("Starting conversion: {}", input.display());

    let path = extract::resolve_local(input)?;
    let extractor: Arc<dyn TextExtractor> = match config.extractor {
        Some(ref e) => Arc::clone(e),
        None => Arc::new(PdfiumExtractor),
    };
    let text = extract::extract_text(extractor, &path, config.password.as_deref()).await?;
    debug!("Extracted {} chars of text", text.len());

    let report = build_report(&text, config)?;
    info!("Conversion complete in {}ms", start.elapsed().as_millis());
    Ok(report)
}

/// Convert a settlement and write the rendered artifact into `output_dir`.
///
/// The file is named after [`PayReport::artifact_name`] (path separators
/// replaced by `-`) with the extension of `config.format`. Uses atomic write
/// (temp file + rename) to prevent partial files. Returns the written path.
pub async fn convert_to_dir(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ReportConfig,
) -> Result<PathBuf, SettlementError> {
    let report = convert(input, config).await?;
    write_report(&report, output_dir.as_ref(), config).await
}

/// Render `report` and write it atomically into `output_dir`.
pub async fn write_report(
    report: &PayReport,
    output_dir: &Path,
    config: &ReportConfig,
) -> Result<PathBuf, SettlementError> {
    let body = report::render(report, config.format)?;
    let file_name = report.artifact_name().replace(['/', '\\'], "-");
    let path = output_dir.join(format!("{}.{}", file_name, config.format.extension()));
    let write_err = |e| SettlementError::OutputWriteFailed {
        path: path.clone(),
        source: e,
    };

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(write_err)?;

    let tmp_path = path.with_extension(format!("{}.tmp", config.format.extension()));
    tokio::fs::write(&tmp_path, body).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(write_err)?;

    info!("Wrote {}", path.display());
    Ok(path)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input: impl AsRef<Path>,
    config: &ReportConfig,
) -> Result<PayReport, SettlementError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| SettlementError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input, config))
}
